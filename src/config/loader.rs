//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::Employee;

use super::types::{EmployeesConfig, PayrollConfig, PayrollRules, ServerConfig};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── payroll.yaml    # Server address and pay rules (required)
/// └── employees.yaml  # Seed employee directory (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Deduction rate: {}", loader.rules().deduction_rate);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayrollConfig,
    employees: Vec<Employee>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if `payroll.yaml` is missing.
    /// - [`EngineError::ConfigParseError`] if any file holds invalid YAML or the
    ///   deduction rate lies outside `[0, 1]`.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let payroll_path = path.join("payroll.yaml");
        let config = Self::load_yaml::<PayrollConfig>(&payroll_path)?;
        Self::validate_rules(&payroll_path, &config.payroll)?;

        let employees_path = path.join("employees.yaml");
        let employees = if employees_path.exists() {
            Self::load_yaml::<EmployeesConfig>(&employees_path)?.employees
        } else {
            debug!(path = %employees_path.display(), "No employee seed file");
            Vec::new()
        };

        info!(
            config_dir = %path.display(),
            deduction_rate = %config.payroll.deduction_rate,
            seed_employees = employees.len(),
            "Configuration loaded"
        );

        Ok(Self { config, employees })
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

    fn validate_rules(path: &Path, rules: &PayrollRules) -> EngineResult<()> {
        if rules.deduction_rate < Decimal::ZERO || rules.deduction_rate > Decimal::ONE {
            return Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: format!(
                    "deduction_rate must be between 0 and 1, got {}",
                    rules.deduction_rate
                ),
            });
        }
        Ok(())
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        &self.config.server
    }

    /// Returns the pay rules.
    pub fn rules(&self) -> &PayrollRules {
        &self.config.payroll
    }

    /// Returns the seed employees, in file order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }
}
