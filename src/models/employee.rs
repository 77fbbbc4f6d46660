//! Employee model and related types.
//!
//! This module defines the Employee struct and EmployeeType enum
//! for representing site workers in the payroll system.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EmployeeRateProfile;
use crate::error::{EngineError, EngineResult};

/// Represents the role an employee holds on site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmployeeType {
    /// A regular site worker.
    Employee,
    /// A crew lead.
    Foreman,
    /// A project manager.
    #[serde(rename = "PM")]
    ProjectManager,
}

/// Represents an employee whose attendance is paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's first name.
    pub first_name: String,
    /// The employee's last name.
    pub last_name: String,
    /// The employee's role.
    #[serde(rename = "type")]
    pub employee_type: EmployeeType,
    /// The employee's current regular hourly rate, if recorded.
    #[serde(default)]
    pub regular_rate: Option<Decimal>,
    /// The employee's current overtime hourly rate, if recorded.
    #[serde(default)]
    pub overtime_rate: Option<Decimal>,
}

impl Employee {
    /// Returns "first last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns the employee's current rates as a validated profile.
    ///
    /// Missing rates are an error rather than zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use site_payroll::models::{Employee, EmployeeType};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     first_name: "Ana".to_string(),
    ///     last_name: "Reyes".to_string(),
    ///     employee_type: EmployeeType::Foreman,
    ///     regular_rate: Some(Decimal::from(32)),
    ///     overtime_rate: None,
    /// };
    /// assert!(employee.current_rate_profile().is_err());
    /// ```
    pub fn current_rate_profile(&self) -> EngineResult<EmployeeRateProfile> {
        let missing = |field: &str| EngineError::InvalidRate {
            employee_id: self.id.clone(),
            message: format!("{} is missing", field),
        };

        let regular_rate = self.regular_rate.ok_or_else(|| missing("regular rate"))?;
        let overtime_rate = self.overtime_rate.ok_or_else(|| missing("overtime rate"))?;

        let profile = EmployeeRateProfile {
            employee_id: self.id.clone(),
            regular_rate,
            overtime_rate,
        };
        profile.validate()?;
        Ok(profile)
    }
}
