//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a company's
//! payroll configuration from a YAML file and resolving it into a
//! fully-populated [`EngineConfig`].

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};

use super::resolver::{resolve, RawEngineConfig, ResolvedConfig};
use super::types::EngineConfig;

/// Loads and provides access to a resolved payroll configuration.
///
/// # File Structure
///
/// A single YAML file with optional sections:
/// ```text
/// rounding:
///   enabled: true
///   check_in: { enabled: true, policy: { interval_minutes: 15, direction: nearest } }
/// break_policy:
///   break_type: unpaid
///   minimum_minutes: 45
///   maximum_minutes: 90
/// overtime:
///   standard_working_minutes_per_day: 480
/// allowances:
///   rules: []
/// deductions:
///   rules: []
/// payroll:
///   salary_rounding: nearest
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("config/company.yaml").unwrap();
/// let config = loader.config();
/// assert!(config.overtime.standard_working_minutes_per_day > 0);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
    defaults_applied: Vec<String>,
}

impl ConfigLoader {
    /// Loads configuration from a YAML file and resolves it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, contains invalid YAML, or
    /// fails policy validation.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let raw: RawEngineConfig =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        debug!(path = %path_str, "loaded raw payroll configuration");
        Self::from_raw(raw)
    }

    /// Parses configuration from a YAML string and resolves it.
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        let raw: RawEngineConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        Self::from_raw(raw)
    }

    /// Resolves a raw configuration value.
    pub fn from_raw(raw: RawEngineConfig) -> EngineResult<Self> {
        let ResolvedConfig {
            config,
            defaults_applied,
        } = resolve(raw)?;

        if !defaults_applied.is_empty() {
            warn!(
                count = defaults_applied.len(),
                "configuration resolved with documented defaults"
            );
        }

        Ok(Self {
            config,
            defaults_applied,
        })
    }

    /// Returns the resolved configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the dotted paths of fields that fell back to defaults.
    pub fn defaults_applied(&self) -> &[String] {
        &self.defaults_applied
    }
}
