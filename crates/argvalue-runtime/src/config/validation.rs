//! Configuration validation utilities.

use super::error::{ConfigError, ConfigResult};
use super::schema::{ArgValueConfig, LoggingConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &ArgValueConfig) -> ConfigResult<()> {
    validate_logging_config(&config.logging)?;
    Ok(())
}

/// Validates logging configuration.
fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    for module in logging.filters.keys() {
        if module.trim().is_empty() {
            return Err(ConfigError::validation(
                "Logging filter module name cannot be empty",
            ));
        }

        if module.contains(['=', ',']) || module.contains(char::is_whitespace) {
            return Err(ConfigError::validation(format!(
                "Invalid logging filter module name: {module:?}"
            )));
        }
    }

    Ok(())
}
