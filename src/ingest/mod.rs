//! Validation of raw store rows into domain models.
//!
//! Ingestion is partial-failure tolerant: a malformed row is recorded as a
//! [`SkippedRecord`] and excluded, and the rest of the batch goes through.

mod rows;

pub use rows::{AttendanceRow, EmployeeRow, JobSiteRow, RateCardRow};

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{AttendanceRecord, RateCard};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// A row rejected at ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    /// Identifier of the rejected row.
    pub record_id: String,
    /// Why the row was rejected.
    pub reason: String,
}

impl From<EngineError> for SkippedRecord {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidRecord { record_id, message } => SkippedRecord {
                record_id,
                reason: message,
            },
            other => SkippedRecord {
                record_id: String::new(),
                reason: other.to_string(),
            },
        }
    }
}

/// The outcome of ingesting a batch of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingested<T> {
    /// Rows that passed validation, in input order.
    pub accepted: Vec<T>,
    /// Rows that were rejected.
    pub skipped: Vec<SkippedRecord>,
    /// Rows that parsed but failed validation, kept so their contents can
    /// still be honoured. Only rate cards fill this in.
    pub rejected: Vec<T>,
}

impl<T> Ingested<T> {
    /// Number of rejected rows.
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

impl<T> Default for Ingested<T> {
    fn default() -> Self {
        Self {
            accepted: Vec::new(),
            skipped: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

/// Validates attendance rows.
///
/// A row is skipped when its date or times do not parse, its deduction or
/// stored hours are negative, or its times do not form a valid shift (see
/// [`AttendanceRecord::new`]). Hours are always re-derived from the times;
/// the stored value is only used to detect corrupt rows.
pub fn ingest_attendance(rows: &[AttendanceRow], allow_overnight: bool) -> Ingested<AttendanceRecord> {
    let mut result = Ingested::default();
    for row in rows {
        match attendance_from_row(row, allow_overnight) {
            Ok(record) => result.accepted.push(record),
            Err(err) => result.skipped.push(err.into()),
        }
    }
    result
}

/// Validates rate card rows.
///
/// A card is skipped when its dates do not parse, its window is inverted,
/// or either rate is negative. Cards whose dates parse but which fail
/// validation are also listed in `rejected`, so the dates they cover are
/// not silently paid at some other rate.
pub fn ingest_rate_cards(rows: &[RateCardRow]) -> Ingested<RateCard> {
    let mut result = Ingested::default();
    for row in rows {
        let card = match rate_card_from_row(row) {
            Ok(card) => card,
            Err(err) => {
                result.skipped.push(err.into());
                continue;
            }
        };
        match card.validate() {
            Ok(()) => result.accepted.push(card),
            Err(err) => {
                let reason = match err {
                    EngineError::InvalidRate { message, .. } => message,
                    other => other.to_string(),
                };
                result.skipped.push(SkippedRecord {
                    record_id: card.id.clone(),
                    reason,
                });
                result.rejected.push(card);
            }
        }
    }
    result
}

fn attendance_from_row(row: &AttendanceRow, allow_overnight: bool) -> Result<AttendanceRecord, EngineError> {
    let invalid = |message: String| EngineError::InvalidRecord {
        record_id: row.id.clone(),
        message,
    };

    let date = parse_date(&row.date).map_err(invalid)?;
    let start_time = parse_time(&row.start_time).map_err(invalid)?;
    let end_time = parse_time(&row.end_time).map_err(invalid)?;

    let minute_deduct = match row.minute_deduct {
        None => 0,
        Some(minutes) => u32::try_from(minutes)
            .map_err(|_| invalid(format!("minute deduction {} is negative", minutes)))?,
    };

    if let Some(stored) = row.shift_hours {
        if stored < Decimal::ZERO {
            return Err(invalid(format!("stored shift hours {} are negative", stored)));
        }
    }

    AttendanceRecord::new(
        row.id.clone(),
        row.employee_id.clone(),
        row.jobsite_id.clone(),
        date,
        start_time,
        end_time,
        minute_deduct,
        allow_overnight,
    )
}

fn rate_card_from_row(row: &RateCardRow) -> Result<RateCard, EngineError> {
    let invalid = |message: String| EngineError::InvalidRecord {
        record_id: row.id.clone(),
        message,
    };

    let valid_from = parse_date(&row.valid_from).map_err(invalid)?;
    let valid_to = match row.valid_to.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(parse_date(raw).map_err(invalid)?),
    };

    Ok(RateCard {
        id: row.id.clone(),
        employee_id: row.employee_id.clone(),
        regular_rate: row.regular_pay_rate,
        overtime_rate: row.overtime_pay_rate,
        valid_from,
        valid_to,
    })
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|e| format!("invalid date '{}': {}", raw, e))
}

fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    let raw = raw.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| format!("invalid time '{}'", raw))
}
