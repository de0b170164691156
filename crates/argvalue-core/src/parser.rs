//! The parse strategy capability.
//!
//! A strategy turns one raw argument value into one typed value. Strategies
//! come in two forms:
//!
//! - [`ValueParser`] — the typed trait implementors write.
//! - [`ErasedParser`] — the object-safe form stored by the registry. Every
//!   `ValueParser` is an `ErasedParser` through a blanket impl.
//!
//! Typed lookups hand back a [`Strategy<T>`], which restores the static type
//! on top of the erased parser.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{ParseError, ParseFailure, ParseResult};

/// A parsed value with its static type erased.
pub type ParsedValue = Box<dyn Any + Send>;

/// Converts raw argument text into a typed value.
///
/// Implementations must not keep per-call state; a single instance is shared
/// by every caller of a registry.
pub trait ValueParser: Send + Sync + 'static {
    /// The produced type.
    type Output: Send + 'static;

    /// Parses `value`. `arg_name` is only used for error reporting.
    fn parse(&self, arg_name: &str, value: &str) -> ParseResult<Self::Output>;
}

/// Object-safe form of [`ValueParser`].
pub trait ErasedParser: Send + Sync {
    /// Type id of the produced values.
    fn output_type(&self) -> TypeId;

    /// Display name of the produced type.
    fn output_name(&self) -> &'static str;

    /// Parses `value` into an erased value.
    fn parse_erased(&self, arg_name: &str, value: &str) -> ParseResult<ParsedValue>;
}

impl<P: ValueParser> ErasedParser for P {
    fn output_type(&self) -> TypeId {
        TypeId::of::<P::Output>()
    }

    fn output_name(&self) -> &'static str {
        type_name::<P::Output>()
    }

    fn parse_erased(&self, arg_name: &str, value: &str) -> ParseResult<ParsedValue> {
        self.parse(arg_name, value)
            .map(|parsed| Box::new(parsed) as ParsedValue)
    }
}

// =============================================================================
// Strategy
// =============================================================================

/// A shared parser known to produce `T`.
pub struct Strategy<T> {
    inner: Arc<dyn ErasedParser>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> Strategy<T> {
    pub(crate) fn new(inner: Arc<dyn ErasedParser>) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }

    /// Parses `value` into a `T`.
    pub fn parse(&self, arg_name: &str, value: &str) -> ParseResult<T> {
        let parsed = self.inner.parse_erased(arg_name, value)?;
        parsed.downcast::<T>().map(|parsed| *parsed).map_err(|_| {
            ParseError::new(
                arg_name,
                value,
                type_name::<T>(),
                ParseFailure::TypeMismatch {
                    produced: self.inner.output_name(),
                },
            )
        })
    }

    /// The underlying shared parser.
    pub fn erased(&self) -> &Arc<dyn ErasedParser> {
        &self.inner
    }

    /// Returns `true` if both handles share the same parser instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Clone for Strategy<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Strategy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategy")
            .field("output", &self.inner.output_name())
            .finish()
    }
}

// =============================================================================
// Helpers for custom strategies
// =============================================================================

/// A strategy backed by a closure.
///
/// ```rust,ignore
/// let parser = FnParser::new(|arg_name, value| {
///     value
///         .strip_suffix('%')
///         .and_then(|n| n.parse::<u8>().ok())
///         .map(Percent)
///         .ok_or_else(|| ParseError::custom(arg_name, value, "Percent", "expected e.g. 42%"))
/// });
/// ```
pub struct FnParser<T, F> {
    func: F,
    _marker: PhantomData<fn() -> T>,
}

impl<T, F> FnParser<T, F>
where
    T: Send + 'static,
    F: Fn(&str, &str) -> ParseResult<T> + Send + Sync + 'static,
{
    /// Wraps `func`.
    pub fn new(func: F) -> Self {
        Self {
            func,
            _marker: PhantomData,
        }
    }
}

impl<T, F> ValueParser for FnParser<T, F>
where
    T: Send + 'static,
    F: Fn(&str, &str) -> ParseResult<T> + Send + Sync + 'static,
{
    type Output = T;

    fn parse(&self, arg_name: &str, value: &str) -> ParseResult<T> {
        (self.func)(arg_name, value)
    }
}

/// A strategy for any type implementing [`FromStr`].
///
/// The error's `Display` output becomes the failure reason.
pub struct FromStrParser<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> FromStrParser<T> {
    /// Creates the parser.
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for FromStrParser<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ValueParser for FromStrParser<T>
where
    T: FromStr + Send + 'static,
    T::Err: fmt::Display,
{
    type Output = T;

    fn parse(&self, arg_name: &str, value: &str) -> ParseResult<T> {
        value
            .parse::<T>()
            .map_err(|err| ParseError::custom(arg_name, value, type_name::<T>(), err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;

    #[test]
    fn test_fn_parser() {
        let parser = FnParser::new(|arg_name: &str, value: &str| {
            value
                .strip_suffix('%')
                .and_then(|n| n.parse::<u8>().ok())
                .ok_or_else(|| ParseError::custom(arg_name, value, "percent", "expected e.g. 42%"))
        });

        assert_eq!(parser.parse("ratio", "42%").unwrap(), 42);
        let err = parser.parse("ratio", "42").unwrap_err();
        assert_eq!(err.arg_name, "ratio");
        assert_eq!(err.reason, ParseFailure::Custom("expected e.g. 42%".into()));
    }

    #[test]
    fn test_from_str_parser() {
        let parser = FromStrParser::<Ipv4Addr>::new();
        assert_eq!(
            parser.parse("host", "127.0.0.1").unwrap(),
            Ipv4Addr::LOCALHOST
        );

        let err = parser.parse("host", "localhost").unwrap_err();
        assert_eq!(err.value, "localhost");
        assert!(matches!(err.reason, ParseFailure::Custom(_)));
    }

    #[test]
    fn test_erased_output_type() {
        let parser: Arc<dyn ErasedParser> = Arc::new(FromStrParser::<u32>::new());
        assert_eq!(parser.output_type(), TypeId::of::<u32>());

        let parsed = parser.parse_erased("n", "12").unwrap();
        assert_eq!(*parsed.downcast::<u32>().unwrap(), 12);
    }

    #[test]
    fn test_strategy_type_mismatch() {
        let strategy = Strategy::<i64>::new(Arc::new(FromStrParser::<u32>::new()));
        let err = strategy.parse("n", "12").unwrap_err();
        assert!(matches!(err.reason, ParseFailure::TypeMismatch { produced: "u32" }));
    }

    #[test]
    fn test_strategy_ptr_eq() {
        let shared: Arc<dyn ErasedParser> = Arc::new(FromStrParser::<u32>::new());
        let a = Strategy::<u32>::new(Arc::clone(&shared));
        let b = a.clone();
        let c = Strategy::<u32>::new(Arc::new(FromStrParser::<u32>::new()));

        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
    }
}
