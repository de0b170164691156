//! Configuration module for the argvalue runtime.
//!
//! Layered loading of registry and logging settings, plus validation.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, ENV_PREFIX, load_config};
pub use schema::{ArgValueConfig, LogFormat, LogLevel, LogOutput, LoggingConfig};
pub use validation::validate_config;
