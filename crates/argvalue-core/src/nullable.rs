//! Strategy for `Option<T>` built on top of a strategy for `T`.

use std::any::TypeId;
use std::sync::Arc;

use crate::error::{ParseError, ParseFailure, ParseResult, RegistryError, RegistryResult};
use crate::key::{NullableShape, TypeKey, TypeShape};
use crate::parser::{ErasedParser, ParsedValue};

/// Parses `Option<T>` by delegating to the strategy for `T`.
///
/// The empty string is the absent value and never reaches the inner strategy.
/// Any other input is handed to the inner strategy; its errors pass through
/// unchanged.
pub struct NullableParser {
    key: TypeKey,
    shape: NullableShape,
    inner: Arc<dyn ErasedParser>,
}

impl NullableParser {
    /// Wraps `inner`, which must produce the type wrapped by `key`.
    pub fn new(key: TypeKey, inner: Arc<dyn ErasedParser>) -> RegistryResult<Self> {
        let TypeShape::Nullable(shape) = key.shape() else {
            return Err(RegistryError::invalid_argument(
                "type",
                format!("'{}' is not an Option type", key.name()),
            ));
        };

        if shape.inner().id() != inner.output_type() {
            return Err(RegistryError::invalid_argument(
                "parser",
                format!(
                    "parser produces '{}' but '{}' wraps '{}'",
                    inner.output_name(),
                    key.name(),
                    shape.inner().name()
                ),
            ));
        }

        let shape = shape.clone();
        Ok(Self { key, shape, inner })
    }

    /// The wrapped strategy.
    pub fn inner(&self) -> &Arc<dyn ErasedParser> {
        &self.inner
    }
}

impl ErasedParser for NullableParser {
    fn output_type(&self) -> TypeId {
        self.key.id()
    }

    fn output_name(&self) -> &'static str {
        self.key.name()
    }

    fn parse_erased(&self, arg_name: &str, value: &str) -> ParseResult<ParsedValue> {
        let parsed = if value.is_empty() {
            None
        } else {
            Some(self.inner.parse_erased(arg_name, value)?)
        };

        self.shape.wrap(parsed).ok_or_else(|| {
            ParseError::new(
                arg_name,
                value,
                self.key.name(),
                ParseFailure::TypeMismatch {
                    produced: self.inner.output_name(),
                },
            )
        })
    }
}
