//! Runtime error types.

use argvalue_core::RegistryError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while bootstrapping.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The default registry could not be installed.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
