//! Configuration loading and management for the Site Payroll Engine.
//!
//! This module loads the payroll policy (weekly overtime threshold, overnight
//! shift handling and report defaults) from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use site_payroll::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Top payroll limit: {}", config.top_payroll_limit());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AttendanceSettings, DEFAULT_TOP_PAYROLL_LIMIT, OvertimeSettings, PayrollConfig, ReportSettings,
};
