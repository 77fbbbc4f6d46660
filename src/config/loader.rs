//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! configuration from a YAML file.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::calculation::OvertimePolicy;
use crate::error::{EngineError, EngineResult};

use super::types::PayrollConfig;

const CONFIG_FILE: &str = "payroll.yaml";

/// Loads and provides access to the payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// └── payroll.yaml   # Overtime, attendance and report settings
/// ```
///
/// # Example
///
/// ```no_run
/// use site_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Weekly threshold: {}", loader.overtime_policy().weekly_threshold_hours);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `payroll.yaml` is missing
    /// - The file contains invalid YAML
    /// - A value is out of range (negative threshold, zero report limit)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let config_path = path.as_ref().join(CONFIG_FILE);
        let config = Self::load_yaml::<PayrollConfig>(&config_path)?;
        Self::validate(&config, &config_path.display().to_string())?;
        Ok(Self { config })
    }

    /// Parses configuration from a YAML string. `origin` is used in errors.
    pub fn from_yaml_str(yaml: &str, origin: &str) -> EngineResult<Self> {
        let config: PayrollConfig =
            serde_yaml::from_str(yaml).map_err(|e| EngineError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;
        Self::validate(&config, origin)?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate(config: &PayrollConfig, path: &str) -> EngineResult<()> {
        let invalid = |message: String| EngineError::ConfigParseError {
            path: path.to_string(),
            message,
        };

        if config.overtime.weekly_threshold_hours < Decimal::ZERO {
            return Err(invalid(format!(
                "overtime.weekly_threshold_hours must not be negative, got {}",
                config.overtime.weekly_threshold_hours
            )));
        }
        if config.reports.top_payroll_limit == 0 {
            return Err(invalid(
                "reports.top_payroll_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the full configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the overtime policy to calculate with.
    pub fn overtime_policy(&self) -> OvertimePolicy {
        self.config.overtime_policy()
    }

    /// Returns whether overnight shifts are accepted at ingestion.
    pub fn allow_overnight_shifts(&self) -> bool {
        self.config.attendance.allow_overnight_shifts
    }

    /// Returns the default size of the top payroll report.
    pub fn top_payroll_limit(&self) -> usize {
        self.config.reports.top_payroll_limit
    }
}
