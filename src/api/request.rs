//! Request types for the Site Payroll Engine API.
//!
//! This module defines the JSON body of `POST /pay-lines` and the query
//! strings of the report endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregation::{DateRange, ReportFilter};
use crate::error::EngineResult;
use crate::ingest::{AttendanceRow, EmployeeRow, JobSiteRow, RateCardRow};
use crate::models::{Employee, EmployeeType, JobSite};

/// Request body for the `/pay-lines` endpoint.
///
/// Carries raw store rows; malformed attendance rows are skipped and
/// reported rather than rejecting the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayLinesRequest {
    /// Attendance rows to pay.
    pub attendance: Vec<AttendanceRow>,
    /// Employee roster with current rates.
    pub employees: Vec<EmployeeRow>,
    /// Date-scoped rate cards.
    #[serde(default)]
    pub rate_cards: Vec<RateCardRow>,
    /// Job sites used to name the pay lines' sites.
    #[serde(default)]
    pub job_sites: Vec<JobSiteRow>,
}

impl PayLinesRequest {
    /// Converts the roster rows into employees.
    pub fn roster(&self) -> Vec<Employee> {
        self.employees.iter().cloned().map(Employee::from).collect()
    }

    /// Converts the job site rows into job sites.
    pub fn sites(&self) -> Vec<JobSite> {
        self.job_sites.iter().cloned().map(JobSite::from).collect()
    }
}

/// Query string shared by the report endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportQuery {
    /// First date, inclusive.
    pub start: NaiveDate,
    /// Last date, inclusive.
    pub end: NaiveDate,
    /// Keep only this job site.
    #[serde(default)]
    pub job_site_id: Option<String>,
    /// Keep only employees of this type.
    #[serde(default)]
    pub employee_type: Option<EmployeeType>,
}

impl ReportQuery {
    /// Validates the date range.
    pub fn range(&self) -> EngineResult<DateRange> {
        DateRange::new(self.start, self.end)
    }

    /// Builds the report filter for `range`.
    pub fn filter(&self, range: DateRange) -> ReportFilter {
        ReportFilter {
            range: Some(range),
            job_site_id: self.job_site_id.clone(),
            employee_type: self.employee_type,
        }
    }
}

/// Query string for the `/reports/top-payroll` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopPayrollQuery {
    /// First date, inclusive.
    pub start: NaiveDate,
    /// Last date, inclusive.
    pub end: NaiveDate,
    /// Number of employees to return.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl TopPayrollQuery {
    /// Validates the date range.
    pub fn range(&self) -> EngineResult<DateRange> {
        DateRange::new(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_pay_lines_request_defaults_rate_cards() {
        let json = r#"{"attendance": [], "employees": []}"#;
        let request: PayLinesRequest = serde_json::from_str(json).unwrap();
        assert!(request.rate_cards.is_empty());
        assert!(request.job_sites.is_empty());
    }

    #[test]
    fn test_pay_lines_request_missing_employees_fails() {
        let json = r#"{"attendance": []}"#;
        let result: Result<PayLinesRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_report_query_builds_filter() {
        let query = ReportQuery {
            start: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            job_site_id: Some("site_n".to_string()),
            employee_type: Some(EmployeeType::ProjectManager),
        };
        let range = query.range().unwrap();
        let filter = query.filter(range);

        assert_eq!(filter.range, Some(range));
        assert_eq!(filter.job_site_id.as_deref(), Some("site_n"));
        assert_eq!(filter.employee_type, Some(EmployeeType::ProjectManager));
    }

    #[test]
    fn test_report_query_inverted_range() {
        let query = TopPayrollQuery {
            start: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            limit: None,
        };
        assert!(matches!(query.range(), Err(EngineError::InvalidRange { .. })));
    }
}
