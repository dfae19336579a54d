// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Catches inconsistent files before the pipeline is built. The pipeline
//! itself tolerates some of these (a zero-capacity buffer just overflows on
//! every push), but a config file asking for them is a mistake worth stopping.

use synfire_runtime::row::{ROW_HEADER_BYTES, SYNAPSE_RECORD_BYTES};

use crate::{ConfigError, ConfigResult, SynfireConfig};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    RowMaxTooSmall { value: u32 },
    RowMaxNotWordAligned { value: u32 },
    ZeroBufferCapacity,
    PriorityInversion { packet: u8, deferred: u8 },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RowMaxTooSmall { value } => {
                write!(
                    f,
                    "pipeline.row_max_n_bytes = {} cannot hold a row header ({} bytes minimum)",
                    value, ROW_HEADER_BYTES
                )
            }
            Self::RowMaxNotWordAligned { value } => {
                write!(
                    f,
                    "pipeline.row_max_n_bytes = {} is not a multiple of the {}-byte record size",
                    value, SYNAPSE_RECORD_BYTES
                )
            }
            Self::ZeroBufferCapacity => {
                write!(f, "pipeline.buffer_capacity = 0 would drop every packet")
            }
            Self::PriorityInversion { packet, deferred } => {
                write!(
                    f,
                    "priorities.packet = {} must preempt priorities.deferred = {} (lower value = higher priority)",
                    packet, deferred
                )
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every failed check
pub fn validate_config(config: &SynfireConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    let row_max = config.pipeline.row_max_n_bytes;
    if (row_max as usize) < ROW_HEADER_BYTES {
        errors.push(ConfigValidationError::RowMaxTooSmall { value: row_max });
    } else if row_max as usize % SYNAPSE_RECORD_BYTES != 0 {
        errors.push(ConfigValidationError::RowMaxNotWordAligned { value: row_max });
    }

    if config.pipeline.buffer_capacity == 0 {
        errors.push(ConfigValidationError::ZeroBufferCapacity);
    }

    if config.priorities.packet >= config.priorities.deferred {
        errors.push(ConfigValidationError::PriorityInversion {
            packet: config.priorities.packet,
            deferred: config.priorities.deferred,
        });
    }

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SynfireConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_row_max_too_small() {
        let mut config = SynfireConfig::default();
        config.pipeline.row_max_n_bytes = 2;

        let result = validate_config(&config);
        assert!(result.is_err());
        if let Err(ConfigError::ValidationError(msg)) = result {
            assert!(msg.contains("row_max_n_bytes"));
        }
    }

    #[test]
    fn test_row_max_alignment() {
        let mut config = SynfireConfig::default();
        config.pipeline.row_max_n_bytes = 510;

        let result = validate_config(&config);
        assert!(result.is_err());
        if let Err(ConfigError::ValidationError(msg)) = result {
            assert!(msg.contains("multiple"));
        }
    }

    #[test]
    fn test_zero_buffer_capacity() {
        let mut config = SynfireConfig::default();
        config.pipeline.buffer_capacity = 0;

        let result = validate_config(&config);
        assert!(result.is_err());
        if let Err(ConfigError::ValidationError(msg)) = result {
            assert!(msg.contains("buffer_capacity"));
        }
    }

    #[test]
    fn test_priority_inversion() {
        let mut config = SynfireConfig::default();
        config.priorities.packet = 1;
        config.priorities.deferred = 1;

        let result = validate_config(&config);
        assert!(result.is_err());
        if let Err(ConfigError::ValidationError(msg)) = result {
            assert!(msg.contains("preempt"));
        }
    }

    #[test]
    fn test_multiple_errors_all_reported() {
        let mut config = SynfireConfig::default();
        config.pipeline.buffer_capacity = 0;
        config.priorities.packet = 2;
        config.priorities.deferred = 1;

        if let Err(ConfigError::ValidationError(msg)) = validate_config(&config) {
            assert!(msg.contains("buffer_capacity"));
            assert!(msg.contains("preempt"));
        } else {
            panic!("expected validation failure");
        }
    }
}
