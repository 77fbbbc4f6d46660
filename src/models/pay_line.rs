//! Pay line model.
//!
//! A [`PayLine`] is the engine's output for one attendance record: how the
//! record's hours split into regular and overtime, at which rates, and the
//! resulting amounts.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The computed pay for a single attendance record.
///
/// # Example
///
/// ```
/// use site_payroll::models::PayLine;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let line = PayLine {
///     record_id: "att_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     job_site_id: "site_north".to_string(),
///     job_site_name: None,
///     date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
///     start_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
///     shift_hours: Decimal::from(8),
///     regular_hours: Decimal::from(8),
///     overtime_hours: Decimal::ZERO,
///     regular_rate: Decimal::from(20),
///     overtime_rate: Decimal::from(30),
///     regular_pay: Decimal::from(160),
///     overtime_pay: Decimal::ZERO,
///     total_pay: Decimal::from(160),
/// };
/// assert!(line.is_balanced());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayLine {
    /// The attendance record this line was computed from.
    pub record_id: String,
    /// The employee being paid.
    pub employee_id: String,
    /// The job site the hours were worked on.
    pub job_site_id: String,
    /// The job site's display name, filled in by reports when the site is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_site_name: Option<String>,
    /// The date of the shift.
    pub date: NaiveDate,
    /// The start time of the shift.
    pub start_time: NaiveTime,
    /// Total hours worked on the shift.
    ///
    /// Hours are worked seconds divided by 3600 and are not rounded. Shifts
    /// that do not fall on whole or quarter hours, such as 20 minutes, carry
    /// 28 significant digits (`0.3333333333333333333333333333`). Amounts
    /// derived from them keep the same precision, so every line stays
    /// balanced. Round for display, not before summing.
    pub shift_hours: Decimal,
    /// Hours paid at the regular rate.
    pub regular_hours: Decimal,
    /// Hours paid at the overtime rate.
    pub overtime_hours: Decimal,
    /// The regular hourly rate applied.
    pub regular_rate: Decimal,
    /// The overtime hourly rate applied.
    pub overtime_rate: Decimal,
    /// regular_hours * regular_rate.
    pub regular_pay: Decimal,
    /// overtime_hours * overtime_rate.
    pub overtime_pay: Decimal,
    /// regular_pay + overtime_pay.
    pub total_pay: Decimal,
}

impl PayLine {
    /// Returns true if hours and pay both add up.
    pub fn is_balanced(&self) -> bool {
        self.regular_hours.checked_add(self.overtime_hours) == Some(self.shift_hours)
            && self.regular_pay.checked_add(self.overtime_pay) == Some(self.total_pay)
    }
}
