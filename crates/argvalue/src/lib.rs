//! # argvalue
//!
//! Registry-driven conversion of command-line argument text into typed values.
//!
//! ## Overview
//!
//! A command-line front end knows which type each argument should become;
//! argvalue knows how to get there. Strategies are registered per type in a
//! [`ParserRegistry`](core::ParserRegistry), and types without an explicit
//! entry fall back to synthesized strategies:
//!
//! ```text
//! ┌──────────────┐     ┌────────────────┐     ┌──────────────────────────────┐
//! │  front end   │────▶│ ParserRegistry │────▶│ exact strategy               │
//! │ (arg, text)  │     │   lookup(T)    │────▶│ EnumParser     (enum T)      │
//! └──────────────┘     └────────────────┘────▶│ NullableParser (Option<T>)   │
//!                                             └──────────────────────────────┘
//! ```
//!
//! - **Core**: type identities, strategies, adapters and the registry
//! - **Macros**: `ArgEnum` / `ArgType` derives and `#[register_parser]`
//! - **Runtime**: configuration, logging and [`bootstrap`](runtime::bootstrap)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use argvalue::prelude::*;
//!
//! #[derive(Debug, Clone, Copy, ArgEnum)]
//! #[arg(crate = "::argvalue::core")]
//! enum Color {
//!     Red,
//!     Green,
//! }
//!
//! let registry = ParserRegistry::global();
//! let color: Color = registry.parse("color", "GREEN")?;
//! let limit: Option<u32> = registry.parse("limit", "")?;
//! ```
//!
//! ## Features
//!
//! - `macros`: Enable the derive and attribute macros (default)
//! - `clap`: Enable `core::cli::RegistryValueParser` (default)
//! - `toml-config`: Enable TOML documents in `ConfigLoader` (default)
//! - `json-log`: Enable JSON log output

pub use argvalue_core as core;
pub use argvalue_runtime as runtime;

#[cfg(feature = "macros")]
pub use argvalue_macros::{ArgEnum, ArgType, register_parser};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use argvalue::prelude::*;
/// ```
pub mod prelude {
    // Registry and strategies
    pub use argvalue_core::{
        ArgEnum, ArgType, FnParser, FromStrParser, ParseError, ParseResult, ParserRegistry,
        Strategy, TypeKey, ValueParser,
    };

    // Runtime entry points
    pub use argvalue_runtime::{ArgValueConfig, ConfigLoader, bootstrap};

    // Derive macros share names with the traits they implement
    #[cfg(feature = "macros")]
    pub use argvalue_macros::{ArgEnum, ArgType, register_parser};

    #[cfg(feature = "clap")]
    pub use argvalue_core::cli::RegistryValueParser;
}
