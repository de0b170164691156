//! # argvalue core
//!
//! Converts raw command-line argument text into typed values.
//!
//! The central piece is the [`ParserRegistry`], a mapping from a requested
//! type to the strategy that parses it:
//!
//! ```text
//! caller ──▶ ParserRegistry::get::<T>() ──▶ Strategy<T> ──▶ parse(arg, "raw")
//!                 │
//!                 ├─ registered strategy (built-in or custom)
//!                 ├─ synthesized EnumParser      for enumerations
//!                 └─ synthesized NullableParser  for Option<T> of registered T
//! ```
//!
//! ## Layers
//!
//! - **Type identity**: [`TypeKey`] and its [`TypeShape`], obtained through
//!   [`ArgType`]
//! - **Strategies**: [`ValueParser`] / [`ErasedParser`], the built-ins in
//!   [`builtin`], [`FnParser`] and [`FromStrParser`] for custom types
//! - **Adapters**: [`NullableParser`] and [`EnumParser`]
//! - **Registry**: [`ParserRegistry`] with the process-wide default instance
//!   and link-time registrations ([`PARSER_REGISTRATIONS`])
//!
//! ## Example
//!
//! ```rust,ignore
//! use argvalue_core::{ArgType, FnParser, ParseError, ParserRegistry, TypeKey};
//!
//! struct Celsius(f64);
//!
//! impl ArgType for Celsius {
//!     fn type_key() -> TypeKey {
//!         TypeKey::of::<Self>()
//!     }
//! }
//!
//! let registry = ParserRegistry::new();
//! registry.register(FnParser::new(|arg_name: &str, value: &str| {
//!     value
//!         .strip_suffix("C")
//!         .and_then(|n| n.parse().ok())
//!         .map(Celsius)
//!         .ok_or_else(|| ParseError::custom(arg_name, value, "Celsius", "expected e.g. 21.5C"))
//! }))?;
//!
//! let count: i32 = registry.parse("count", "42")?;
//! let temp: Option<Celsius> = registry.parse("temp", "21.5C")?;
//! ```
//!
//! ## Features
//!
//! - `clap`: [`cli::RegistryValueParser`], a clap value parser backed by a registry

// Lets the derive macros refer to this crate by name from its own tests.
extern crate self as argvalue_core;

pub mod builtin;
pub mod enumeration;
pub mod error;
pub mod key;
pub mod linked;
pub mod nullable;
pub mod parser;
pub mod registry;
pub mod settings;

#[cfg(feature = "clap")]
pub mod cli;

pub use enumeration::EnumParser;
pub use error::{
    ArgValueError, ParseError, ParseFailure, ParseResult, RegistryError, RegistryResult,
};
pub use key::{
    ArgEnum, ArgType, EnumDescriptor, EnumMember, NullableShape, PrimitiveKind, TypeKey, TypeShape,
};
pub use linked::{PARSER_REGISTRATIONS, ParserRegistration, RegistrationFn};
pub use nullable::NullableParser;
pub use parser::{ErasedParser, FnParser, FromStrParser, ParsedValue, Strategy, ValueParser};
pub use registry::ParserRegistry;
pub use settings::RegistrySettings;

// Used by `#[register_parser]` expansions.
pub use linkme;

/// Prelude for common imports.
pub mod prelude {
    pub use super::{
        ArgEnum, ArgType, FnParser, FromStrParser, ParseError, ParseResult, ParserRegistry,
        Strategy, TypeKey, ValueParser,
    };
}
