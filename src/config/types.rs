//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from `payroll.yaml`. Every section is optional in the
//! file and falls back to its default.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{OvertimePolicy, WEEKLY_OVERTIME_THRESHOLD};

/// Default number of employees on the top payroll report.
pub const DEFAULT_TOP_PAYROLL_LIMIT: usize = 5;

/// Overtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeSettings {
    /// Hours per ISO week paid at the regular rate.
    #[serde(default = "default_weekly_threshold")]
    pub weekly_threshold_hours: Decimal,
}

fn default_weekly_threshold() -> Decimal {
    WEEKLY_OVERTIME_THRESHOLD
}

impl Default for OvertimeSettings {
    fn default() -> Self {
        Self {
            weekly_threshold_hours: WEEKLY_OVERTIME_THRESHOLD,
        }
    }
}

/// Attendance validation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSettings {
    /// Whether an end time before the start time means the shift ran past
    /// midnight. When false such rows are rejected.
    #[serde(default)]
    pub allow_overnight_shifts: bool,
}

/// Report settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Number of employees on the top payroll report when the caller does not
    /// ask for a specific count.
    #[serde(default = "default_top_payroll_limit")]
    pub top_payroll_limit: usize,
}

fn default_top_payroll_limit() -> usize {
    DEFAULT_TOP_PAYROLL_LIMIT
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            top_payroll_limit: DEFAULT_TOP_PAYROLL_LIMIT,
        }
    }
}

/// The complete payroll configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollConfig {
    /// Overtime settings.
    #[serde(default)]
    pub overtime: OvertimeSettings,
    /// Attendance validation settings.
    #[serde(default)]
    pub attendance: AttendanceSettings,
    /// Report settings.
    #[serde(default)]
    pub reports: ReportSettings,
}

impl PayrollConfig {
    /// Returns the overtime policy these settings describe.
    pub fn overtime_policy(&self) -> OvertimePolicy {
        OvertimePolicy {
            weekly_threshold_hours: self.overtime.weekly_threshold_hours,
        }
    }
}
