//! Configuration loading and management for the payroll engine.
//!
//! This module loads the server settings, pay rules and seed employee
//! directory from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Binding to {}", config.server().addr);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EmployeesConfig, PayrollConfig, PayrollRules, ServerConfig};
