//! Weekly overtime calculation.
//!
//! This module splits an employee's attendance for one ISO week into regular
//! and overtime hours. The first [`WEEKLY_OVERTIME_THRESHOLD`] hours of the
//! week are regular time; every hour after that is overtime. Hours are handed
//! out to records in chronological order, so a record that crosses the
//! threshold is split between the two.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, EmployeeRateProfile, PayLine};

/// Hours per ISO week paid at the regular rate.
pub const WEEKLY_OVERTIME_THRESHOLD: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// The overtime policy applied by the engine.
///
/// # Example
///
/// ```
/// use site_payroll::calculation::{OvertimePolicy, WEEKLY_OVERTIME_THRESHOLD};
///
/// assert_eq!(
///     OvertimePolicy::default().weekly_threshold_hours,
///     WEEKLY_OVERTIME_THRESHOLD
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimePolicy {
    /// Hours per ISO week paid at the regular rate.
    pub weekly_threshold_hours: Decimal,
}

impl Default for OvertimePolicy {
    fn default() -> Self {
        Self {
            weekly_threshold_hours: WEEKLY_OVERTIME_THRESHOLD,
        }
    }
}

/// Computes pay lines for one employee's week at a single rate.
///
/// This is [`compute_pay_lines_with`] using the default 40 hour policy and the
/// same `rate` for every record.
///
/// # Errors
///
/// - [`EngineError::InvalidRate`] if either rate is negative or `rate` belongs
///   to a different employee
/// - [`EngineError::MixedScopeInput`] if the records span more than one
///   employee or more than one ISO week
///
/// # Examples
///
/// ## Sixth shift spills into overtime
///
/// ```
/// use site_payroll::calculation::compute_pay_lines;
/// use site_payroll::models::{AttendanceRecord, EmployeeRateProfile};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
/// let records: Vec<AttendanceRecord> = (0..6)
///     .map(|day| {
///         let end = if day == 5 { 12 } else { 15 };
///         AttendanceRecord::new(
///             format!("att_{}", day),
///             "emp_001",
///             "site_north",
///             monday + chrono::Days::new(day),
///             NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
///             NaiveTime::from_hms_opt(end, 0, 0).unwrap(),
///             0,
///             false,
///         )
///         .unwrap()
///     })
///     .collect();
///
/// let rate = EmployeeRateProfile {
///     employee_id: "emp_001".to_string(),
///     regular_rate: Decimal::from(20),
///     overtime_rate: Decimal::from(30),
/// };
///
/// let lines = compute_pay_lines(&records, &rate).unwrap();
/// let total: Decimal = lines.iter().map(|l| l.total_pay).sum();
/// assert_eq!(total, Decimal::from(950));
/// assert_eq!(lines[5].overtime_hours, Decimal::from(5));
/// ```
pub fn compute_pay_lines(
    records: &[AttendanceRecord],
    rate: &EmployeeRateProfile,
) -> EngineResult<Vec<PayLine>> {
    compute_pay_lines_with(records, &OvertimePolicy::default(), |_| Ok(rate.clone()))
}

/// Computes pay lines for one employee's week with a per-record rate lookup.
///
/// Records are ordered by date, then start time, then id. A running total of
/// hours decides how much of each record still fits under the weekly
/// threshold. If any rate is rejected, no pay lines are returned.
///
/// An empty slice yields an empty result.
pub fn compute_pay_lines_with<F>(
    records: &[AttendanceRecord],
    policy: &OvertimePolicy,
    mut rate_for: F,
) -> EngineResult<Vec<PayLine>>
where
    F: FnMut(&AttendanceRecord) -> EngineResult<EmployeeRateProfile>,
{
    check_scope(records)?;

    let mut ordered: Vec<&AttendanceRecord> = records.iter().collect();
    ordered.sort_by(|a, b| {
        (a.date, a.start_time, &a.id).cmp(&(b.date, b.start_time, &b.id))
    });

    let mut hours_this_week = Decimal::ZERO;
    let mut pay_lines = Vec::with_capacity(ordered.len());

    for record in ordered {
        if record.shift_hours < Decimal::ZERO {
            return Err(EngineError::InvalidRecord {
                record_id: record.id.clone(),
                message: format!("shift hours {} are negative", record.shift_hours),
            });
        }

        let rate = rate_for(record)?;
        rate.validate()?;
        if rate.employee_id != record.employee_id {
            return Err(EngineError::InvalidRate {
                employee_id: record.employee_id.clone(),
                message: format!(
                    "rate profile belongs to employee '{}'",
                    rate.employee_id
                ),
            });
        }

        let remaining_regular = (policy.weekly_threshold_hours - hours_this_week).max(Decimal::ZERO);
        let regular_hours = record.shift_hours.min(remaining_regular);
        let overtime_hours = record.shift_hours - regular_hours;

        let regular_pay = price(regular_hours, rate.regular_rate, &record.employee_id, "regular")?;
        let overtime_pay = price(overtime_hours, rate.overtime_rate, &record.employee_id, "overtime")?;
        let total_pay = regular_pay.checked_add(overtime_pay).ok_or_else(|| {
            EngineError::InvalidRate {
                employee_id: record.employee_id.clone(),
                message: format!("total pay for record '{}' overflows", record.id),
            }
        })?;

        pay_lines.push(PayLine {
            record_id: record.id.clone(),
            employee_id: record.employee_id.clone(),
            job_site_id: record.job_site_id.clone(),
            job_site_name: None,
            date: record.date,
            start_time: record.start_time,
            shift_hours: record.shift_hours,
            regular_hours,
            overtime_hours,
            regular_rate: rate.regular_rate,
            overtime_rate: rate.overtime_rate,
            regular_pay,
            overtime_pay,
            total_pay,
        });

        hours_this_week += record.shift_hours;
    }

    Ok(pay_lines)
}

/// Multiplies hours by a rate, rejecting rates too large to price.
fn price(hours: Decimal, rate: Decimal, employee_id: &str, kind: &str) -> EngineResult<Decimal> {
    hours.checked_mul(rate).ok_or_else(|| EngineError::InvalidRate {
        employee_id: employee_id.to_string(),
        message: format!("{} pay for {} hours at {} overflows", kind, hours, rate),
    })
}

/// Ensures every record belongs to the first record's employee and ISO week.
fn check_scope(records: &[AttendanceRecord]) -> EngineResult<()> {
    let Some(first) = records.first() else {
        return Ok(());
    };
    let week = first.iso_week();

    for record in &records[1..] {
        if record.employee_id != first.employee_id {
            return Err(EngineError::MixedScopeInput {
                message: format!(
                    "records span employees '{}' and '{}'",
                    first.employee_id, record.employee_id
                ),
            });
        }
        let other = record.iso_week();
        if other != week {
            return Err(EngineError::MixedScopeInput {
                message: format!(
                    "records span ISO weeks {}-W{:02} and {}-W{:02}",
                    week.year(),
                    week.week(),
                    other.year(),
                    other.week()
                ),
            });
        }
    }

    Ok(())
}
