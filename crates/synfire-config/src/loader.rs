// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading and overrides
//!
//! Resolution order: explicit path argument, then the `SYNFIRE_CONFIG`
//! environment variable, then `./synfire.toml`, then `./config/synfire.toml`,
//! then built-in defaults. Environment variable overrides are applied after
//! file parsing, validation last.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::validation::validate_config;
use crate::{ConfigError, ConfigResult, SynfireConfig};

/// Candidate config file locations, in priority order.
pub fn find_config_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("SYNFIRE_CONFIG") {
        return Some(PathBuf::from(path));
    }
    for candidate in ["synfire.toml", "config/synfire.toml"] {
        let path = PathBuf::from(candidate);
        if path.exists() {
            return Some(path);
        }
    }
    None
}

/// Load, override, and validate the configuration.
///
/// With `path = None` the file is discovered via [`find_config_file`];
/// when nothing is found the built-in defaults are used.
pub fn load_config(path: Option<&Path>) -> ConfigResult<SynfireConfig> {
    let mut config = match path.map(PathBuf::from).or_else(find_config_file) {
        Some(file) => {
            if !file.exists() {
                return Err(ConfigError::FileNotFound(file.display().to_string()));
            }
            debug!(file = %file.display(), "loading configuration");
            let contents = std::fs::read_to_string(&file)?;
            toml::from_str(&contents)?
        }
        None => {
            debug!("no configuration file found; using defaults");
            SynfireConfig::default()
        }
    };

    apply_environment_overrides(&mut config);
    validate_config(&config)?;
    Ok(config)
}

/// Apply `SYNFIRE_*` environment overrides on top of the parsed file.
/// Unparseable values are ignored with a warning rather than failing startup.
pub fn apply_environment_overrides(config: &mut SynfireConfig) {
    override_from_env("SYNFIRE_ROW_MAX_N_BYTES", &mut config.pipeline.row_max_n_bytes);
    override_from_env("SYNFIRE_BUFFER_CAPACITY", &mut config.pipeline.buffer_capacity);
    override_from_env(
        "SYNFIRE_CLEAR_LATE_PACKETS",
        &mut config.pipeline.clear_late_packets,
    );
    override_from_env(
        "SYNFIRE_MAX_PENDING_REWIRES",
        &mut config.pipeline.max_pending_rewires,
    );
}

fn override_from_env<T: std::str::FromStr>(name: &str, slot: &mut T) {
    if let Ok(raw) = std::env::var(name) {
        match raw.parse() {
            Ok(value) => *slot = value,
            Err(_) => warn!(name, raw = %raw, "ignoring unparseable environment override"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[pipeline]\nbuffer_capacity = 32\nclear_late_packets = true"
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.pipeline.buffer_capacity, 32);
        assert!(config.pipeline.clear_late_packets);
        // Untouched sections keep their defaults
        assert_eq!(config.priorities.deferred, 1);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = load_config(Some(Path::new("/nonexistent/synfire.toml")));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_invalid_toml_reports_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pipeline\nbuffer_capacity = ").unwrap();

        let result = load_config(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_invalid_file_fails_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pipeline]\nbuffer_capacity = 0").unwrap();

        let result = load_config(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let mut config = SynfireConfig::default();
        std::env::set_var("SYNFIRE_MAX_PENDING_REWIRES", "7");
        apply_environment_overrides(&mut config);
        std::env::remove_var("SYNFIRE_MAX_PENDING_REWIRES");

        assert_eq!(config.pipeline.max_pending_rewires, 7);
        assert_eq!(config.pipeline.buffer_capacity, 256);
    }
}
