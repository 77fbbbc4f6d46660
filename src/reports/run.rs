//! A single payroll run over already-fetched rows.

use serde::{Deserialize, Serialize};

use crate::aggregation::summarize;
use crate::calculation::{RateBook, run_payroll};
use crate::config::PayrollConfig;
use crate::error::EngineResult;
use crate::ingest::{AttendanceRow, RateCardRow, SkippedRecord, ingest_attendance, ingest_rate_cards};
use crate::models::{Employee, JobSite, PayLine, PayrollTotals, job_site_name};

/// Pay lines for a batch of rows, with headline totals and the rows that
/// were rejected at ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// One line per accepted attendance row, in chronological order.
    pub pay_lines: Vec<PayLine>,
    /// Totals over `pay_lines`.
    pub totals: PayrollTotals,
    /// Attendance rows and rate cards that were skipped.
    pub skipped: Vec<SkippedRecord>,
}

impl PayrollRun {
    /// Number of skipped rows.
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Ingests raw rows and computes pay lines under `config`.
///
/// Malformed attendance rows and rate cards are skipped and listed in the
/// result. A missing or negative rate for any accepted row fails the whole
/// run with [`crate::error::EngineError::InvalidRate`], as does a row dated
/// inside the window of a rejected rate card.
pub fn compute_run(
    attendance: &[AttendanceRow],
    employees: &[Employee],
    rate_cards: &[RateCardRow],
    config: &PayrollConfig,
) -> EngineResult<PayrollRun> {
    let records = ingest_attendance(attendance, config.attendance.allow_overnight_shifts);
    let cards = ingest_rate_cards(rate_cards);

    let mut book = RateBook::from_parts(employees.iter().cloned(), cards.accepted);
    for card in cards.rejected {
        book.add_rejected_card(card);
    }
    let pay_lines = run_payroll(&records.accepted, &book, &config.overtime_policy())?;
    let totals = summarize(&pay_lines)?;

    let mut skipped = records.skipped;
    skipped.extend(cards.skipped);

    Ok(PayrollRun {
        pay_lines,
        totals,
        skipped,
    })
}

/// Fills in each line's `job_site_name` from `sites`.
pub fn label_pay_lines(pay_lines: &mut [PayLine], sites: &[JobSite]) {
    for line in pay_lines {
        line.job_site_name = job_site_name(sites, &line.job_site_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::EmployeeType;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn row(id: &str, date: &str, start: &str, end: &str) -> AttendanceRow {
        AttendanceRow {
            id: id.to_string(),
            employee_id: "emp_001".to_string(),
            jobsite_id: "site_north".to_string(),
            date: date.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            minute_deduct: Some(0),
            shift_hours: None,
        }
    }

    fn employee(regular: Option<&str>) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Reyes".to_string(),
            employee_type: EmployeeType::Employee,
            regular_rate: regular.map(dec),
            overtime_rate: Some(dec("30")),
        }
    }

    #[test]
    fn test_run_skips_bad_rows_and_totals_the_rest() {
        let attendance = vec![
            row("a1", "2026-01-12", "07:00", "15:00"),
            row("a2", "2026-01-13", "15:00", "07:00"),
            row("a3", "2026-01-14", "07:00", "11:00"),
        ];

        let run = compute_run(
            &attendance,
            &[employee(Some("20"))],
            &[],
            &PayrollConfig::default(),
        )
        .unwrap();

        assert_eq!(run.pay_lines.len(), 2);
        assert_eq!(run.skipped_count(), 1);
        assert_eq!(run.skipped[0].record_id, "a2");
        assert_eq!(run.totals.total_hours, dec("12"));
        assert_eq!(run.totals.total_pay, dec("240"));
    }

    #[test]
    fn test_overnight_setting_is_honoured() {
        let attendance = vec![row("night", "2026-01-12", "22:00", "06:00")];
        let mut config = PayrollConfig::default();
        config.attendance.allow_overnight_shifts = true;

        let run = compute_run(&attendance, &[employee(Some("20"))], &[], &config).unwrap();
        assert_eq!(run.skipped_count(), 0);
        assert_eq!(run.pay_lines[0].shift_hours, dec("8"));
    }

    fn negative_card(from: &str, to: Option<&str>) -> RateCardRow {
        RateCardRow {
            id: "rc_bad".to_string(),
            employee_id: "emp_001".to_string(),
            regular_pay_rate: dec("-5"),
            overtime_pay_rate: dec("30"),
            valid_from: from.to_string(),
            valid_to: to.map(str::to_string),
        }
    }

    #[test]
    fn test_rejected_rate_card_window_fails_instead_of_falling_back() {
        let result = compute_run(
            &[row("a1", "2026-01-12", "07:00", "15:00")],
            &[employee(Some("20"))],
            &[negative_card("2026-01-01", None)],
            &PayrollConfig::default(),
        );

        match result {
            Err(EngineError::InvalidRate { message, .. }) => {
                assert!(message.contains("rc_bad"));
            }
            other => panic!("Expected InvalidRate, got {:?}", other),
        }
    }

    #[test]
    fn test_rejected_rate_card_outside_window_is_only_skipped() {
        let run = compute_run(
            &[row("a1", "2026-01-12", "07:00", "15:00")],
            &[employee(Some("20"))],
            &[negative_card("2025-01-01", Some("2025-12-31"))],
            &PayrollConfig::default(),
        )
        .unwrap();

        assert_eq!(run.skipped[0].record_id, "rc_bad");
        assert_eq!(run.pay_lines[0].regular_rate, dec("20"));
    }

    #[test]
    fn test_huge_rate_is_an_error_not_a_panic() {
        let mut huge = employee(Some("20"));
        huge.regular_rate = Some(Decimal::MAX);

        let result = compute_run(
            &[row("a1", "2026-01-12", "07:00", "15:00")],
            &[huge],
            &[],
            &PayrollConfig::default(),
        );
        assert!(matches!(result, Err(EngineError::InvalidRate { .. })));
    }

    #[test]
    fn test_label_pay_lines_uses_site_names() {
        let mut run = compute_run(
            &[row("a1", "2026-01-12", "07:00", "15:00")],
            &[employee(Some("20"))],
            &[],
            &PayrollConfig::default(),
        )
        .unwrap();
        assert_eq!(run.pay_lines[0].job_site_name, None);

        let sites = vec![JobSite {
            id: "site_north".to_string(),
            name: "North Yard".to_string(),
            address: None,
        }];
        label_pay_lines(&mut run.pay_lines, &sites);
        assert_eq!(run.pay_lines[0].job_site_name.as_deref(), Some("North Yard"));
    }

    #[test]
    fn test_missing_rate_fails_the_run() {
        let result = compute_run(
            &[row("a1", "2026-01-12", "07:00", "15:00")],
            &[employee(None)],
            &[],
            &PayrollConfig::default(),
        );

        assert!(matches!(result, Err(EngineError::InvalidRate { .. })));
    }
}
