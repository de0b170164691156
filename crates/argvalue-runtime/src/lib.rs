//! argvalue runtime - configuration, logging and bootstrap.
//!
//! This crate provides:
//! - Layered configuration loading ([`ConfigLoader`]) and validation
//! - Logging configuration ([`LoggingBuilder`])
//! - [`bootstrap`], which applies a configuration to the process in one call
//!
//! ```ignore
//! use argvalue_runtime::{bootstrap, config::load_config};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config()?;
//!     let registry = bootstrap(&config)?;
//!
//!     let retries: u8 = registry.parse("retries", "3")?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;

use argvalue_core::ParserRegistry;
use tracing::info;

// Re-exports
pub use config::{
    ArgValueConfig, ConfigError, ConfigLoader, ConfigResult, LogFormat, LogLevel, LogOutput,
    LoggingConfig,
};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::LoggingBuilder;

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Validates `config`, initializes logging and builds the global parser
/// registry with the configured settings.
///
/// Logging initialization is skipped if a subscriber is already installed.
/// Fails with [`RuntimeError::Registry`] if the global registry was already
/// built, including implicitly through [`ParserRegistry::global`].
pub fn bootstrap(config: &ArgValueConfig) -> RuntimeResult<&'static ParserRegistry> {
    config::validate_config(config)?;
    logging::init_from_config(&config.logging);

    let registry = ParserRegistry::init_global(config.registry.clone())?;
    info!(
        parsers = registry.len(),
        numeric_booleans = config.registry.numeric_booleans,
        "argvalue runtime ready"
    );

    Ok(registry)
}

/// Prelude module for convenient imports.
///
/// Provides the commonly used logging macros:
/// - `trace!`, `debug!`, `info!`, `warn!`, `error!`
/// - `span`, `event`
/// - `instrument` attribute
/// - `Level` for span creation
pub mod prelude {
    pub use super::{ArgValueConfig, ConfigLoader, bootstrap};
    pub use tracing::{Level, debug, error, event, info, instrument, span, trace, warn};
}

#[cfg(test)]
mod tests {
    use argvalue_core::{ArgValueError, RegistryError};

    use super::*;

    #[test]
    fn test_bootstrap_installs_global_once() {
        let mut invalid = ArgValueConfig::default();
        invalid
            .logging
            .filters
            .insert(String::new(), LogLevel::Debug);
        assert!(matches!(
            bootstrap(&invalid),
            Err(RuntimeError::Config(ConfigError::Validation { .. }))
        ));

        let mut config = ArgValueConfig::default();
        config.registry.numeric_booleans = false;

        let registry = bootstrap(&config).unwrap();
        assert!(std::ptr::eq(registry, ParserRegistry::global()));
        assert!(!registry.settings().numeric_booleans);
        assert!(matches!(
            registry.parse::<bool>("flag", "1"),
            Err(ArgValueError::Parse(_))
        ));

        assert!(matches!(
            bootstrap(&config),
            Err(RuntimeError::Registry(RegistryError::GlobalAlreadyInitialized))
        ));
    }
}
