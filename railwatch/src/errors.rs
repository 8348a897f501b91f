//! # **railwatch** error definitions

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying configuration source failure.
    #[error("configuration error: {0}")]
    Build(#[from] config::ConfigError),
    /// A configuration section failed validation.
    #[error("invalid configuration section '{section}': {message}")]
    Validation {
        /// Section that failed.
        section: String,
        /// Validator report.
        message: String,
    },
}
