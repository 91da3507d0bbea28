//! Payroll run lifecycle and calculation engine
//!
//! This crate administers monthly payroll runs: it creates runs, computes one
//! pay item per employee, locks runs against further change and rolls the
//! items up into summary and per-department reports.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod reporting;
pub mod store;
