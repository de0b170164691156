//! Error types for value parsing and parser registration.
//!
//! Two families of failure exist:
//!
//! - [`ParseError`] is a user input problem raised by a strategy when raw
//!   text cannot be converted. It is meant to be shown to the end user.
//! - [`RegistryError`] is a programming error raised while registering or
//!   resolving strategies. It is meant for the code that configures parsing.

use std::fmt;

use thiserror::Error;

// =============================================================================
// Parse Errors
// =============================================================================

/// Why a raw value could not be converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    /// The text is not in the expected format.
    InvalidFormat(String),

    /// The text is a well-formed number that does not fit the target width.
    OutOfRange {
        /// Smallest accepted value.
        min: String,
        /// Largest accepted value.
        max: String,
    },

    /// The text does not name a member of the target enumeration.
    UnknownMember {
        /// Valid member names, empty when listing is disabled.
        choices: Vec<&'static str>,
    },

    /// The strategy produced a value of a different type than requested.
    TypeMismatch {
        /// Display name of the type that was produced.
        produced: &'static str,
    },

    /// Failure reported by a custom strategy.
    Custom(String),
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(detail) => f.write_str(detail),
            Self::OutOfRange { min, max } => {
                write!(f, "out of range, expected a value between {min} and {max}")
            }
            Self::UnknownMember { choices } if choices.is_empty() => {
                f.write_str("not a recognised member")
            }
            Self::UnknownMember { choices } => {
                write!(f, "expected one of: {}", choices.join(", "))
            }
            Self::TypeMismatch { produced } => write!(f, "parser produced a {produced}"),
            Self::Custom(message) => f.write_str(message),
        }
    }
}

/// A raw argument value could not be converted to the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value '{value}' for '{arg_name}' ({target}): {reason}")]
pub struct ParseError {
    /// Name of the argument being parsed.
    pub arg_name: String,
    /// The offending raw text.
    pub value: String,
    /// Display name of the target type.
    pub target: &'static str,
    /// What went wrong.
    pub reason: ParseFailure,
}

impl ParseError {
    /// Creates a parse error.
    pub fn new(
        arg_name: impl Into<String>,
        value: impl Into<String>,
        target: &'static str,
        reason: ParseFailure,
    ) -> Self {
        Self {
            arg_name: arg_name.into(),
            value: value.into(),
            target,
            reason,
        }
    }

    /// Creates an invalid format error with a short explanation.
    pub fn invalid_format(
        arg_name: &str,
        value: &str,
        target: &'static str,
        detail: impl Into<String>,
    ) -> Self {
        Self::new(
            arg_name,
            value,
            target,
            ParseFailure::InvalidFormat(detail.into()),
        )
    }

    /// Creates an error for a custom strategy.
    pub fn custom(
        arg_name: &str,
        value: &str,
        target: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::new(arg_name, value, target, ParseFailure::Custom(message.into()))
    }
}

/// Result type for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;

// =============================================================================
// Registry Errors
// =============================================================================

/// Errors raised while registering or resolving parsers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A registration was handed an unusable type or parser.
    #[error("invalid argument '{param}': {reason}")]
    InvalidArgument {
        /// Which argument was rejected.
        param: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// A parser is already registered for the type.
    #[error("a parser is already registered for type '{type_name}'")]
    DuplicateRegistration {
        /// Display name of the type.
        type_name: &'static str,
    },

    /// No parser is registered or can be synthesized for the type.
    #[error("no parser available for type '{type_name}'")]
    NotFound {
        /// Display name of the type.
        type_name: &'static str,
    },

    /// An enumeration parser was requested for a type that is not an enumeration.
    #[error("type '{type_name}' is not an enumeration")]
    NotAnEnum {
        /// Display name of the type.
        type_name: &'static str,
    },

    /// The process-wide registry was already constructed.
    #[error("the global parser registry is already initialized")]
    GlobalAlreadyInitialized,
}

impl RegistryError {
    /// Creates an invalid argument error.
    pub fn invalid_argument(param: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            param,
            reason: reason.into(),
        }
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

// =============================================================================
// Combined
// =============================================================================

/// Error for callers that resolve a parser and run it in one step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgValueError {
    /// Resolution failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Parsing failed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let err = ParseError::invalid_format("count", "abc", "i32", "invalid digit found in string");
        assert_eq!(
            err.to_string(),
            "invalid value 'abc' for 'count' (i32): invalid digit found in string"
        );
    }

    #[test]
    fn test_unknown_member_lists_choices() {
        let reason = ParseFailure::UnknownMember {
            choices: vec!["red", "green"],
        };
        assert_eq!(reason.to_string(), "expected one of: red, green");

        let reason = ParseFailure::UnknownMember { choices: vec![] };
        assert_eq!(reason.to_string(), "not a recognised member");
    }

    #[test]
    fn test_out_of_range_message() {
        let err = ParseError::new(
            "level",
            "300",
            "u8",
            ParseFailure::OutOfRange {
                min: "0".into(),
                max: "255".into(),
            },
        );
        assert!(err.to_string().ends_with("between 0 and 255"));
    }

    #[test]
    fn test_combined_error_from() {
        let err: ArgValueError = RegistryError::NotFound { type_name: "Foo" }.into();
        assert_eq!(err.to_string(), "no parser available for type 'Foo'");
    }
}
