//! Procedural macros for argvalue.
//!
//! This crate provides:
//!
//! - `#[derive(ArgEnum)]` - Describes a fieldless enum so the registry can
//!   parse it by member name
//! - `#[derive(ArgType)]` - Gives a custom type its registry identity
//! - `#[register_parser]` - Registers a parser at link time
//!
//! # ArgEnum Derive Macro
//!
//! ```rust,ignore
//! use argvalue_macros::ArgEnum;
//!
//! #[derive(Debug, Clone, Copy, ArgEnum)]
//! #[arg(display = "log level")]
//! pub enum Level {
//!     Debug,
//!     Info,
//!     #[arg(name = "warning")]
//!     Warn,
//! }
//! ```
//!
//! # Link-time Registration
//!
//! ```rust,ignore
//! use argvalue_core::{FnParser, ValueParser};
//! use argvalue_macros::{ArgType, register_parser};
//!
//! #[derive(ArgType)]
//! pub struct Port(u16);
//!
//! #[register_parser]
//! fn port_parser() -> impl ValueParser<Output = Port> {
//!     FnParser::new(parse_port)
//! }
//! ```
//!
//! Every macro accepts `crate = "..."` to name the core crate when it is only
//! reachable through a re-export, e.g. `#[arg(crate = "::argvalue::core")]`.

mod arg_type;
mod register;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derives `ArgEnum` and `ArgType` for a fieldless enum.
///
/// Member names default to the variant identifiers and are matched
/// case-insensitively. Each member's value is its discriminant.
///
/// # Attributes
///
/// - `#[arg(display = "...")]` on the enum - Name shown in error messages
/// - `#[arg(name = "...")]` on a variant - Override the member name
/// - `#[arg(crate = "...")]` on the enum - Path of the core crate
#[proc_macro_derive(ArgEnum, attributes(arg))]
pub fn derive_arg_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match arg_type::derive_arg_enum(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Derives `ArgType` for a custom type, keyed by the type itself.
///
/// The type still needs a parser registered for it before it can be parsed.
#[proc_macro_derive(ArgType, attributes(arg))]
pub fn derive_arg_type(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match arg_type::derive_arg_type(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Registers the parser returned by the decorated function in every
/// registry built with `ParserRegistry::register_linked`, including the
/// global one.
///
/// The function must take no arguments and return a `ValueParser`.
///
/// ```rust,ignore
/// #[register_parser]
/// fn duration_parser() -> FromStrParser<humantime::Duration> {
///     FromStrParser::new()
/// }
/// ```
#[proc_macro_attribute]
pub fn register_parser(attr: TokenStream, item: TokenStream) -> TokenStream {
    register::register_parser(attr, item)
}
