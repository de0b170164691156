//! Built-in strategies for the scalar types.
//!
//! | Type | Accepted input |
//! |------|----------------|
//! | `String` | anything, returned unchanged |
//! | `bool` | `true` / `false` in any case, plus `1` / `0` unless disabled |
//! | `char` | exactly one character |
//! | integers | optional sign and base-10 digits that fit the width |
//! | `f32`, `f64` | decimal or scientific notation, `inf`, `NaN` |
//!
//! Every strategy except `String` and `char` ignores surrounding whitespace.

use std::fmt;
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{ParseError, ParseFailure, ParseResult};
use crate::key::{ArgType, PrimitiveKind, TypeKey};
use crate::parser::{ErasedParser, ValueParser};
use crate::settings::RegistrySettings;

/// Returns the input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringParser;

impl ValueParser for StringParser {
    type Output = String;

    fn parse(&self, _arg_name: &str, value: &str) -> ParseResult<String> {
        Ok(value.to_owned())
    }
}

/// Parses `true` / `false`, optionally `1` / `0`.
#[derive(Debug, Clone, Copy)]
pub struct BoolParser {
    numeric: bool,
}

impl BoolParser {
    /// Accepts `true`, `false`, `1` and `0`.
    pub const WITH_NUMERIC: Self = Self { numeric: true };

    /// Accepts only `true` and `false`.
    pub const STRICT: Self = Self { numeric: false };

    /// Creates a parser, accepting `1` / `0` when `numeric` is set.
    pub const fn new(numeric: bool) -> Self {
        Self { numeric }
    }
}

impl Default for BoolParser {
    fn default() -> Self {
        Self::WITH_NUMERIC
    }
}

impl ValueParser for BoolParser {
    type Output = bool;

    fn parse(&self, arg_name: &str, value: &str) -> ParseResult<bool> {
        let text = value.trim();
        if text.eq_ignore_ascii_case("true") || (self.numeric && text == "1") {
            Ok(true)
        } else if text.eq_ignore_ascii_case("false") || (self.numeric && text == "0") {
            Ok(false)
        } else {
            let expected = if self.numeric {
                "expected true, false, 1 or 0"
            } else {
                "expected true or false"
            };
            Err(ParseError::invalid_format(
                arg_name,
                value,
                PrimitiveKind::Bool.name(),
                expected,
            ))
        }
    }
}

/// Parses a single character.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharParser;

impl ValueParser for CharParser {
    type Output = char;

    fn parse(&self, arg_name: &str, value: &str) -> ParseResult<char> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ParseError::invalid_format(
                arg_name,
                value,
                PrimitiveKind::Char.name(),
                "expected exactly one character",
            )),
        }
    }
}

// =============================================================================
// Numbers
// =============================================================================

/// `-` followed by digits only.
fn is_negative_literal(text: &str) -> bool {
    text.strip_prefix('-')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

fn parse_integer<T>(
    arg_name: &str,
    value: &str,
    kind: PrimitiveKind,
    min: T,
    max: T,
) -> ParseResult<T>
where
    T: FromStr<Err = ParseIntError> + fmt::Display + Default,
{
    let text = value.trim();
    let out_of_range = || {
        ParseError::new(
            arg_name,
            value,
            kind.name(),
            ParseFailure::OutOfRange {
                min: min.to_string(),
                max: max.to_string(),
            },
        )
    };

    match text.parse::<T>() {
        Ok(parsed) => Ok(parsed),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Err(out_of_range()),
            // Unsigned targets reject any sign but a negative number is a range problem.
            IntErrorKind::InvalidDigit if is_negative_literal(text) => {
                if text[1..].bytes().all(|b| b == b'0') {
                    Ok(T::default())
                } else {
                    Err(out_of_range())
                }
            }
            _ => Err(ParseError::invalid_format(
                arg_name,
                value,
                kind.name(),
                err.to_string(),
            )),
        },
    }
}

macro_rules! integer_parsers {
    ($($(#[$doc:meta])* $name:ident => $ty:ty, $kind:ident;)*) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, Default)]
            pub struct $name;

            impl ValueParser for $name {
                type Output = $ty;

                fn parse(&self, arg_name: &str, value: &str) -> ParseResult<$ty> {
                    parse_integer(arg_name, value, PrimitiveKind::$kind, <$ty>::MIN, <$ty>::MAX)
                }
            }
        )*
    };
}

integer_parsers! {
    /// Parses an `i8`.
    I8Parser => i8, I8;
    /// Parses an `i16`.
    I16Parser => i16, I16;
    /// Parses an `i32`.
    I32Parser => i32, I32;
    /// Parses an `i64`.
    I64Parser => i64, I64;
    /// Parses an `isize`.
    IsizeParser => isize, Isize;
    /// Parses a `u8`.
    U8Parser => u8, U8;
    /// Parses a `u16`.
    U16Parser => u16, U16;
    /// Parses a `u32`.
    U32Parser => u32, U32;
    /// Parses a `u64`.
    U64Parser => u64, U64;
    /// Parses a `usize`.
    UsizeParser => usize, Usize;
}

macro_rules! float_parsers {
    ($($(#[$doc:meta])* $name:ident => $ty:ty, $kind:ident;)*) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, Default)]
            pub struct $name;

            impl ValueParser for $name {
                type Output = $ty;

                fn parse(&self, arg_name: &str, value: &str) -> ParseResult<$ty> {
                    value.trim().parse::<$ty>().map_err(|err| {
                        ParseError::invalid_format(
                            arg_name,
                            value,
                            PrimitiveKind::$kind.name(),
                            err.to_string(),
                        )
                    })
                }
            }
        )*
    };
}

float_parsers! {
    /// Parses an `f32`.
    F32Parser => f32, F32;
    /// Parses an `f64`.
    F64Parser => f64, F64;
}

// =============================================================================
// Registration table
// =============================================================================

fn entry<P>(parser: P) -> (TypeKey, Arc<dyn ErasedParser>)
where
    P: ValueParser,
    P::Output: ArgType,
{
    (<P::Output as ArgType>::type_key(), Arc::new(parser))
}

/// All built-in strategies, configured by `settings`.
pub fn builtin_parsers(settings: &RegistrySettings) -> Vec<(TypeKey, Arc<dyn ErasedParser>)> {
    vec![
        entry(StringParser),
        entry(BoolParser::new(settings.numeric_booleans)),
        entry(CharParser),
        entry(I8Parser),
        entry(I16Parser),
        entry(I32Parser),
        entry(I64Parser),
        entry(IsizeParser),
        entry(U8Parser),
        entry(U16Parser),
        entry(U32Parser),
        entry(U64Parser),
        entry(UsizeParser),
        entry(F32Parser),
        entry(F64Parser),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_is_identity() {
        assert_eq!(StringParser.parse("name", "").unwrap(), "");
        assert_eq!(StringParser.parse("name", "  spaced ").unwrap(), "  spaced ");
    }

    #[test]
    fn test_bool() {
        let parser = BoolParser::default();
        assert!(parser.parse("flag", "true").unwrap());
        assert!(parser.parse("flag", "TRUE").unwrap());
        assert!(!parser.parse("flag", " False ").unwrap());
        assert!(parser.parse("flag", "1").unwrap());
        assert!(!parser.parse("flag", "0").unwrap());
        assert!(parser.parse("flag", "yes").is_err());
        assert!(parser.parse("flag", "").is_err());
    }

    #[test]
    fn test_bool_strict() {
        let err = BoolParser::STRICT.parse("flag", "1").unwrap_err();
        assert_eq!(err.target, "bool");
        assert_eq!(
            err.reason,
            ParseFailure::InvalidFormat("expected true or false".into())
        );
    }

    #[test]
    fn test_char() {
        assert_eq!(CharParser.parse("sep", ",").unwrap(), ',');
        assert_eq!(CharParser.parse("sep", "é").unwrap(), 'é');
        assert!(CharParser.parse("sep", "").is_err());
        assert!(CharParser.parse("sep", "ab").is_err());
    }

    #[test]
    fn test_integer_widths() {
        assert_eq!(I8Parser.parse("n", "-128").unwrap(), i8::MIN);
        assert_eq!(U8Parser.parse("n", "255").unwrap(), u8::MAX);
        assert_eq!(I32Parser.parse("n", " +42 ").unwrap(), 42);
        assert_eq!(U64Parser.parse("n", "18446744073709551615").unwrap(), u64::MAX);
    }

    #[test]
    fn test_integer_overflow() {
        let err = U8Parser.parse("n", "256").unwrap_err();
        assert_eq!(
            err.reason,
            ParseFailure::OutOfRange {
                min: "0".into(),
                max: "255".into()
            }
        );

        let err = I16Parser.parse("n", "-32769").unwrap_err();
        assert!(matches!(err.reason, ParseFailure::OutOfRange { .. }));
        assert_eq!(err.target, "i16");
    }

    #[test]
    fn test_unsigned_negative() {
        let err = U32Parser.parse("n", "-1").unwrap_err();
        assert!(matches!(err.reason, ParseFailure::OutOfRange { .. }));
        assert_eq!(U32Parser.parse("n", "-0").unwrap(), 0);
    }

    #[test]
    fn test_integer_format() {
        let err = I32Parser.parse("count", "abc").unwrap_err();
        assert_eq!(err.arg_name, "count");
        assert_eq!(err.value, "abc");
        assert!(matches!(err.reason, ParseFailure::InvalidFormat(_)));

        assert!(I32Parser.parse("count", "").is_err());
        assert!(I32Parser.parse("count", "1.5").is_err());
        assert!(U16Parser.parse("count", "-").is_err());
    }

    #[test]
    fn test_floats() {
        assert_eq!(F64Parser.parse("x", "1.5").unwrap(), 1.5);
        assert_eq!(F64Parser.parse("x", "-2.5e3").unwrap(), -2500.0);
        assert_eq!(F32Parser.parse("x", " .25 ").unwrap(), 0.25);
        assert!(F64Parser.parse("x", "inf").unwrap().is_infinite());
        assert!(F64Parser.parse("x", "one").is_err());
        assert!(F32Parser.parse("x", "").is_err());
    }

    #[test]
    fn test_builtin_table_covers_every_kind() {
        let parsers = builtin_parsers(&RegistrySettings::default());
        assert_eq!(parsers.len(), 15);
        for (key, parser) in &parsers {
            assert_eq!(key.id(), parser.output_type(), "{key}");
        }
    }
}
