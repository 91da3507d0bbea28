//! Configuration types for the payroll engine.
//!
//! These structures are deserialized from the YAML files in a configuration
//! directory. Every field has a default so a partial file is valid.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::default_deduction_rate;
use crate::models::Employee;

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Socket address the server binds to.
    #[serde(default = "default_addr")]
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
        }
    }
}

fn default_addr() -> String {
    "127.0.0.1:8080".to_string()
}

/// Pay rules applied by the calculation pass.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PayrollRules {
    /// Fraction of the basic salary withheld as deductions.
    #[serde(default = "default_deduction_rate")]
    pub deduction_rate: Decimal,
}

impl Default for PayrollRules {
    fn default() -> Self {
        Self {
            deduction_rate: default_deduction_rate(),
        }
    }
}

/// Contents of `payroll.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PayrollConfig {
    /// Server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Pay rules.
    #[serde(default)]
    pub payroll: PayrollRules,
}

/// Contents of `employees.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeesConfig {
    /// Employees loaded into the directory at start-up.
    #[serde(default)]
    pub employees: Vec<Employee>,
}
