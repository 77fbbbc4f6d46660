//! Composable row filters applied before aggregation.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, Employee, EmployeeType, PayLine};

/// A row that can be filtered by employee, job site and date.
pub trait PayrollRow {
    /// The employee the row belongs to.
    fn employee_id(&self) -> &str;
    /// The job site the row belongs to.
    fn job_site_id(&self) -> &str;
    /// The calendar date of the row.
    fn date(&self) -> NaiveDate;
}

impl PayrollRow for AttendanceRecord {
    fn employee_id(&self) -> &str {
        &self.employee_id
    }

    fn job_site_id(&self) -> &str {
        &self.job_site_id
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl PayrollRow for PayLine {
    fn employee_id(&self) -> &str {
        &self.employee_id
    }

    fn job_site_id(&self) -> &str {
        &self.job_site_id
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// An inclusive date range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First date, inclusive.
    pub start: NaiveDate,
    /// Last date, inclusive.
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range, failing with [`EngineError::InvalidRange`] if
    /// `start > end`. The bounds are never swapped.
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if start > end {
            return Err(EngineError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns true if `date` lies within the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Keeps rows dated between `start` and `end`, both inclusive.
///
/// # Errors
///
/// Returns [`EngineError::InvalidRange`] if `start > end`.
pub fn filter_by_date_range<T: PayrollRow>(
    rows: Vec<T>,
    start: NaiveDate,
    end: NaiveDate,
) -> EngineResult<Vec<T>> {
    let range = DateRange::new(start, end)?;
    Ok(rows.into_iter().filter(|r| range.contains(r.date())).collect())
}

/// Keeps rows worked on `job_site_id`.
pub fn filter_by_job_site<T: PayrollRow>(rows: Vec<T>, job_site_id: &str) -> Vec<T> {
    rows.into_iter()
        .filter(|r| r.job_site_id() == job_site_id)
        .collect()
}

/// Keeps rows whose employee has `employee_type` in `roster`.
///
/// Rows for employees missing from the roster are dropped.
pub fn filter_by_employee_type<T: PayrollRow>(
    rows: Vec<T>,
    roster: &[Employee],
    employee_type: EmployeeType,
) -> Vec<T> {
    let matching: HashSet<&str> = roster
        .iter()
        .filter(|e| e.employee_type == employee_type)
        .map(|e| e.id.as_str())
        .collect();

    rows.into_iter()
        .filter(|r| matching.contains(r.employee_id()))
        .collect()
}

/// Optional filters a report applies, in order: date range, job site,
/// employee type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilter {
    /// Inclusive date range.
    #[serde(default)]
    pub range: Option<DateRange>,
    /// Job site to keep.
    #[serde(default)]
    pub job_site_id: Option<String>,
    /// Employee type to keep.
    #[serde(default)]
    pub employee_type: Option<EmployeeType>,
}

impl ReportFilter {
    /// A filter restricted to `range`.
    pub fn for_range(range: DateRange) -> Self {
        Self {
            range: Some(range),
            ..Self::default()
        }
    }

    /// Applies every filter that is set.
    pub fn apply<T: PayrollRow>(&self, rows: Vec<T>, roster: &[Employee]) -> Vec<T> {
        let mut rows = match self.range {
            Some(range) => rows.into_iter().filter(|r| range.contains(r.date())).collect(),
            None => rows,
        };
        if let Some(job_site_id) = &self.job_site_id {
            rows = filter_by_job_site(rows, job_site_id);
        }
        if let Some(employee_type) = self.employee_type {
            rows = filter_by_employee_type(rows, roster, employee_type);
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    fn record(id: &str, employee_id: &str, site: &str, day: u32) -> AttendanceRecord {
        AttendanceRecord::new(
            id,
            employee_id,
            site,
            date(day),
            NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            0,
            false,
        )
        .unwrap()
    }

    fn person(id: &str, employee_type: EmployeeType) -> Employee {
        Employee {
            id: id.to_string(),
            first_name: id.to_string(),
            last_name: "Tester".to_string(),
            employee_type,
            regular_rate: None,
            overtime_rate: None,
        }
    }

    fn rows() -> Vec<AttendanceRecord> {
        vec![
            record("a1", "emp_1", "site_n", 12),
            record("a2", "emp_1", "site_s", 14),
            record("a3", "emp_2", "site_n", 16),
            record("a4", "emp_3", "site_n", 18),
        ]
    }

    fn ids(rows: &[AttendanceRecord]) -> Vec<&str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_date_range_is_inclusive_on_both_ends() {
        let kept = filter_by_date_range(rows(), date(14), date(16)).unwrap();
        assert_eq!(ids(&kept), vec!["a2", "a3"]);
    }

    #[test]
    fn test_single_day_range() {
        let kept = filter_by_date_range(rows(), date(18), date(18)).unwrap();
        assert_eq!(ids(&kept), vec!["a4"]);
    }

    #[test]
    fn test_inverted_range_is_rejected_not_swapped() {
        match filter_by_date_range(rows(), date(16), date(14)) {
            Err(EngineError::InvalidRange { start, end }) => {
                assert_eq!(start, date(16));
                assert_eq!(end, date(14));
            }
            other => panic!("Expected InvalidRange, got {:?}", other),
        }
    }

    #[test]
    fn test_filter_by_job_site() {
        let kept = filter_by_job_site(rows(), "site_n");
        assert_eq!(ids(&kept), vec!["a1", "a3", "a4"]);
    }

    #[test]
    fn test_filter_by_employee_type_drops_unknown_employees() {
        let roster = vec![
            person("emp_1", EmployeeType::Foreman),
            person("emp_2", EmployeeType::Employee),
        ];
        let kept = filter_by_employee_type(rows(), &roster, EmployeeType::Foreman);
        assert_eq!(ids(&kept), vec!["a1", "a2"]);

        let kept = filter_by_employee_type(rows(), &roster, EmployeeType::Employee);
        assert_eq!(ids(&kept), vec!["a3"]);
    }

    #[test]
    fn test_report_filter_composes() {
        let roster = vec![
            person("emp_1", EmployeeType::Foreman),
            person("emp_2", EmployeeType::Foreman),
            person("emp_3", EmployeeType::Employee),
        ];
        let filter = ReportFilter {
            range: Some(DateRange::new(date(12), date(17)).unwrap()),
            job_site_id: Some("site_n".to_string()),
            employee_type: Some(EmployeeType::Foreman),
        };

        let kept = filter.apply(rows(), &roster);
        assert_eq!(ids(&kept), vec!["a1", "a3"]);
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let kept = ReportFilter::default().apply(rows(), &[]);
        assert_eq!(kept.len(), 4);
    }
}
