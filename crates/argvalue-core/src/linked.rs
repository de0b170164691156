//! Link-time parser registrations.
//!
//! Crates contribute parsers to the default registry by appending a
//! constructor to [`PARSER_REGISTRATIONS`], normally through the
//! `#[register_parser]` attribute:
//!
//! ```rust,ignore
//! #[register_parser]
//! fn duration_parser() -> FnParser<Duration, _> { ... }
//! ```
//!
//! The default registry applies every entry right after the built-ins. An
//! entry for a type that is already present is skipped with a warning.

use std::sync::Arc;

use linkme::distributed_slice;

use crate::key::{ArgType, TypeKey};
use crate::parser::{ErasedParser, ValueParser};

/// A type key paired with the parser to store under it.
pub struct ParserRegistration {
    key: TypeKey,
    parser: Arc<dyn ErasedParser>,
}

impl ParserRegistration {
    /// Registration keyed by the parser's output type.
    pub fn new<P>(parser: P) -> Self
    where
        P: ValueParser,
        P::Output: ArgType,
    {
        Self {
            key: <P::Output as ArgType>::type_key(),
            parser: Arc::new(parser),
        }
    }

    /// Registration from an explicit key and shared parser.
    pub fn shared(key: TypeKey, parser: Arc<dyn ErasedParser>) -> Self {
        Self { key, parser }
    }

    /// The type this registration targets.
    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    /// Splits into key and parser.
    pub fn into_parts(self) -> (TypeKey, Arc<dyn ErasedParser>) {
        (self.key, self.parser)
    }
}

/// Constructor stored in the distributed slice.
pub type RegistrationFn = fn() -> ParserRegistration;

/// Parsers contributed at link time, one constructor per entry.
#[distributed_slice]
pub static PARSER_REGISTRATIONS: [RegistrationFn];
