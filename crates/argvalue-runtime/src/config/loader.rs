//! Configuration loader using figment.
//!
//! # Configuration Priority (lowest to highest)
//!
//! 1. Built-in defaults
//! 2. TOML documents added with [`ConfigLoader::toml_str`] (`toml-config` feature)
//! 3. Environment variables (`ARGVALUE_*`)
//! 4. Programmatic overrides added with [`ConfigLoader::merge`]
//!
//! # Environment Variable Mapping
//!
//! Environment variables are mapped using the `ARGVALUE_` prefix with `__` as separator:
//!
//! - `ARGVALUE_LOGGING__LEVEL=debug` → `logging.level = "debug"`
//! - `ARGVALUE_REGISTRY__NUMERIC_BOOLEANS=false` → `registry.numeric_booleans = false`
//!
//! # Example
//!
//! ```rust,ignore
//! use argvalue_runtime::config::ConfigLoader;
//!
//! let config = ConfigLoader::new()
//!     .toml_str(include_str!("argvalue.toml"))
//!     .load()?;
//! ```

#[cfg(feature = "toml-config")]
use figment::providers::{Format, Toml};
use figment::Figment;
use figment::providers::{Env, Serialized};
use tracing::{debug, trace};

use super::error::ConfigResult;
use super::schema::ArgValueConfig;
use super::validation::validate_config;

/// Prefix of environment variables read by [`ConfigLoader`].
pub const ENV_PREFIX: &str = "ARGVALUE_";

/// Configuration loader with figment-based multi-source support.
pub struct ConfigLoader {
    /// Programmatic overrides, merged last.
    overrides: Figment,
    /// In-memory TOML documents, merged in order.
    #[cfg(feature = "toml-config")]
    documents: Vec<String>,
    /// Whether to load environment variables.
    load_env: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a new configuration loader with defaults.
    pub fn new() -> Self {
        Self {
            overrides: Figment::new(),
            #[cfg(feature = "toml-config")]
            documents: Vec::new(),
            load_env: true,
        }
    }

    /// Adds a TOML document.
    #[cfg(feature = "toml-config")]
    pub fn toml_str(mut self, document: impl Into<String>) -> Self {
        self.documents.push(document.into());
        self
    }

    /// Enables loading environment variables (default: true).
    pub fn with_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Merges additional configuration programmatically.
    ///
    /// ```rust,ignore
    /// let config = ConfigLoader::new()
    ///     .merge(ArgValueConfig {
    ///         logging: LoggingConfig { level: LogLevel::Debug, ..Default::default() },
    ///         ..Default::default()
    ///     })
    ///     .load()?;
    /// ```
    pub fn merge(mut self, config: ArgValueConfig) -> Self {
        self.overrides = self.overrides.merge(Serialized::defaults(config));
        self
    }

    /// Loads, validates and returns the configuration.
    pub fn load(self) -> ConfigResult<ArgValueConfig> {
        let config: ArgValueConfig = self.build_figment().extract()?;
        validate_config(&config)?;

        debug!(
            logging_level = %config.logging.level,
            numeric_booleans = config.registry.numeric_booleans,
            cache_synthesized = config.registry.cache_synthesized,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Builds the figment instance with all sources.
    fn build_figment(self) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(ArgValueConfig::default()));

        #[cfg(feature = "toml-config")]
        for document in &self.documents {
            figment = figment.merge(Toml::string(document));
        }

        if self.load_env {
            trace!(prefix = ENV_PREFIX, "Loading environment variables");
            figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        }

        figment.merge(self.overrides)
    }
}

/// Loads the configuration from defaults and the environment.
pub fn load_config() -> ConfigResult<ArgValueConfig> {
    ConfigLoader::new().load()
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;
    use crate::config::{ConfigError, LogLevel, LoggingConfig};

    #[test]
    fn test_default_config() {
        let config = ConfigLoader::new().without_env().load().unwrap();

        assert_eq!(config.logging.level.as_str(), "info");
        assert!(config.registry.numeric_booleans);
        assert!(!config.registry.cache_synthesized);
    }

    #[test]
    fn test_env_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("ARGVALUE_REGISTRY__NUMERIC_BOOLEANS", "false");
            jail.set_env("ARGVALUE_LOGGING__LEVEL", "debug");

            let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;
            assert!(!config.registry.numeric_booleans);
            assert_eq!(config.logging.level, LogLevel::Debug);
            Ok(())
        });
    }

    #[test]
    fn test_without_env_ignores_environment() {
        Jail::expect_with(|jail| {
            jail.set_env("ARGVALUE_REGISTRY__CACHE_SYNTHESIZED", "true");

            let config = ConfigLoader::new()
                .without_env()
                .load()
                .map_err(|e| e.to_string())?;
            assert!(!config.registry.cache_synthesized);
            Ok(())
        });
    }

    #[test]
    fn test_merge_overrides_env() {
        Jail::expect_with(|jail| {
            jail.set_env("ARGVALUE_LOGGING__LEVEL", "warn");

            let config = ConfigLoader::new()
                .merge(ArgValueConfig {
                    logging: LoggingConfig {
                        level: LogLevel::Trace,
                        ..Default::default()
                    },
                    ..Default::default()
                })
                .load()
                .map_err(|e| e.to_string())?;
            assert_eq!(config.logging.level, LogLevel::Trace);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_env_value_is_extract_error() {
        Jail::expect_with(|jail| {
            jail.set_env("ARGVALUE_LOGGING__LEVEL", "loud");

            let result = ConfigLoader::new().load();
            assert!(matches!(result, Err(ConfigError::Extract(_))));
            Ok(())
        });
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn test_toml_documents() {
        let config = ConfigLoader::new()
            .without_env()
            .toml_str(
                r#"
                [registry]
                list_enum_choices = false

                [logging]
                level = "error"
                format = "pretty"

                [logging.filters]
                argvalue_core = "trace"
                "#,
            )
            .load()
            .unwrap();

        assert!(!config.registry.list_enum_choices);
        assert!(config.registry.numeric_booleans);
        assert_eq!(config.logging.level, LogLevel::Error);
        assert_eq!(
            config.logging.filters.get("argvalue_core"),
            Some(&LogLevel::Trace)
        );
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn test_invalid_filter_rejected_on_load() {
        let result = ConfigLoader::new()
            .without_env()
            .toml_str("[logging.filters]\n\"bad module\" = \"debug\"\n")
            .load();

        assert!(matches!(result, Err(ConfigError::Validation { .. })));
    }
}
