// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Synfire Configuration System
//!
//! Type-safe configuration loader for the spike-delivery pipeline:
//! - TOML file parsing with automatic file discovery
//! - Environment variable overrides
//! - Validation of cross-field consistency before the pipeline ever sees a
//!   value
//!
//! ## Usage
//!
//! ```rust,no_run
//! use synfire_config::load_config;
//!
//! let config = load_config(None).expect("Failed to load config");
//! let pipeline_config = config.to_pipeline_config();
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{apply_environment_overrides, find_config_file, load_config};
pub use types::*;
pub use validation::{validate_config, ConfigValidationError};

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_converts() {
        let config = SynfireConfig::default();
        let pipeline = config.to_pipeline_config();
        assert_eq!(pipeline.row_max_n_bytes, 512);
        assert_eq!(pipeline.buffer_capacity, 256);
    }
}
