//! Attendance record model.
//!
//! An [`AttendanceRecord`] is one validated shift: who worked, where, on which
//! date and between which wall-clock times. Worked hours are derived once at
//! construction and never recomputed.

use chrono::{Datelike, IsoWeek, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;

/// A validated attendance shift.
///
/// # Example
///
/// ```
/// use site_payroll::models::AttendanceRecord;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let record = AttendanceRecord::new(
///     "att_001",
///     "emp_001",
///     "site_north",
///     NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
///     NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(15, 30, 0).unwrap(),
///     30,
///     false,
/// )
/// .unwrap();
///
/// assert_eq!(record.shift_hours, Decimal::from(8));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier for the record.
    pub id: String,
    /// The employee who worked the shift.
    pub employee_id: String,
    /// The job site the shift was worked on.
    pub job_site_id: String,
    /// The calendar date the shift started on.
    pub date: NaiveDate,
    /// Wall-clock start time.
    pub start_time: NaiveTime,
    /// Wall-clock end time.
    pub end_time: NaiveTime,
    /// Minutes deducted from the raw span (breaks).
    pub minute_deduct: u32,
    /// True when the shift ends on the following calendar day.
    #[serde(default)]
    pub overnight: bool,
    /// Decimal hours actually worked.
    pub shift_hours: Decimal,
}

impl AttendanceRecord {
    /// Builds a record and derives its worked hours.
    ///
    /// Fails with [`EngineError::InvalidRecord`] when the end time does not come
    /// after the start time (and overnight shifts are not allowed), or when the
    /// deduction exceeds the shift span.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        employee_id: impl Into<String>,
        job_site_id: impl Into<String>,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        minute_deduct: u32,
        allow_overnight: bool,
    ) -> EngineResult<Self> {
        let id = id.into();
        let (shift_hours, overnight) =
            derive_shift_hours(start_time, end_time, minute_deduct, allow_overnight).map_err(
                |message| EngineError::InvalidRecord {
                    record_id: id.clone(),
                    message,
                },
            )?;

        Ok(Self {
            id,
            employee_id: employee_id.into(),
            job_site_id: job_site_id.into(),
            date,
            start_time,
            end_time,
            minute_deduct,
            overnight,
            shift_hours,
        })
    }

    /// Returns the ISO week (Monday to Sunday) the shift falls in.
    pub fn iso_week(&self) -> IsoWeek {
        self.date.iso_week()
    }
}

/// Derives worked hours from a shift's times and deduction.
///
/// Returns the hours and whether the shift crosses midnight. An end time equal
/// to the start time is always rejected; an earlier end time is accepted only
/// when `allow_overnight` is set.
fn derive_shift_hours(
    start_time: NaiveTime,
    end_time: NaiveTime,
    minute_deduct: u32,
    allow_overnight: bool,
) -> Result<(Decimal, bool), String> {
    let (span_seconds, overnight) = if end_time > start_time {
        ((end_time - start_time).num_seconds(), false)
    } else if end_time < start_time && allow_overnight {
        (SECONDS_PER_DAY - (start_time - end_time).num_seconds(), true)
    } else if end_time == start_time {
        return Err(format!(
            "end time {} equals start time",
            end_time.format("%H:%M")
        ));
    } else {
        return Err(format!(
            "end time {} is before start time {}",
            end_time.format("%H:%M"),
            start_time.format("%H:%M")
        ));
    };

    let worked_seconds = span_seconds - i64::from(minute_deduct) * SECONDS_PER_MINUTE;
    if worked_seconds < 0 {
        return Err(format!(
            "minute deduction of {} exceeds the shift span",
            minute_deduct
        ));
    }

    Ok((
        Decimal::from(worked_seconds) / Decimal::from(SECONDS_PER_HOUR),
        overnight,
    ))
}
