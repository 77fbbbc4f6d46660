//! Batch payroll over many employees and weeks.
//!
//! [`run_payroll`] partitions attendance by employee and ISO week and hands
//! each partition to the weekly overtime calculation, so callers never have
//! to pre-partition.

use std::collections::BTreeMap;

use super::rate_book::RateBook;
use super::weekly_overtime::{OvertimePolicy, compute_pay_lines_with};
use crate::error::EngineResult;
use crate::models::{AttendanceRecord, PayLine};

/// Computes pay lines for any mix of employees and weeks.
///
/// Partitions are processed in employee then week order, and the combined
/// output is sorted by date, start time, employee and record id. Rates are
/// looked up per record on the record's date.
///
/// # Errors
///
/// Fails with the first [`crate::error::EngineError::InvalidRate`] hit in any
/// partition; no partial result is returned.
pub fn run_payroll(
    records: &[AttendanceRecord],
    rates: &RateBook,
    policy: &OvertimePolicy,
) -> EngineResult<Vec<PayLine>> {
    let mut partitions: BTreeMap<(&str, i32, u32), Vec<AttendanceRecord>> = BTreeMap::new();
    for record in records {
        let week = record.iso_week();
        partitions
            .entry((record.employee_id.as_str(), week.year(), week.week()))
            .or_default()
            .push(record.clone());
    }

    let mut pay_lines = Vec::with_capacity(records.len());
    for partition in partitions.values() {
        let lines = compute_pay_lines_with(partition, policy, |record| {
            rates.rate_for(&record.employee_id, record.date)
        })?;
        pay_lines.extend(lines);
    }

    pay_lines.sort_by(|a, b| {
        (a.date, a.start_time, &a.employee_id, &a.record_id)
            .cmp(&(b.date, b.start_time, &b.employee_id, &b.record_id))
    });

    Ok(pay_lines)
}
