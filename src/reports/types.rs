//! Report shapes returned by [`super::ReportService`].

use serde::{Deserialize, Serialize};

use crate::aggregation::{DateRange, ReportFilter};
use crate::ingest::SkippedRecord;
use crate::models::{
    AggregatedPayroll, Employee, EmployeeType, JobSite, PayLine, PayrollTotals, job_site_name,
};

/// An aggregate row labelled with the employee's name and type, and the job
/// site's name for per-site rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// "First Last", when the employee is on the roster.
    #[serde(default)]
    pub employee_name: Option<String>,
    /// The employee's type, when the employee is on the roster.
    #[serde(default)]
    pub employee_type: Option<EmployeeType>,
    /// The job site's name, for rows keyed by a known job site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_site_name: Option<String>,
    /// The rolled-up figures.
    #[serde(flatten)]
    pub payroll: AggregatedPayroll,
}

impl ReportRow {
    /// Labels `payroll` from `roster` and `sites`.
    pub fn labelled(payroll: AggregatedPayroll, roster: &[Employee], sites: &[JobSite]) -> Self {
        let employee = roster.iter().find(|e| e.id == payroll.employee_id);
        Self {
            employee_name: employee.map(Employee::full_name),
            employee_type: employee.map(|e| e.employee_type),
            job_site_name: payroll
                .job_site_id
                .as_deref()
                .and_then(|id| job_site_name(sites, id)),
            payroll,
        }
    }
}

/// Per-employee payroll for a date range, with totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollReport {
    /// The reported range.
    pub range: DateRange,
    /// The filters that were applied.
    pub filter: ReportFilter,
    /// Totals over every row.
    pub totals: PayrollTotals,
    /// One row per employee.
    pub rows: Vec<ReportRow>,
    /// The underlying pay lines.
    pub pay_lines: Vec<PayLine>,
    /// Rows rejected at ingestion.
    pub skipped: Vec<SkippedRecord>,
}

/// Per-employee payroll split by ISO week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyReport {
    /// The reported range.
    pub range: DateRange,
    /// One row per employee per week.
    pub rows: Vec<ReportRow>,
    /// Totals over every row.
    pub totals: PayrollTotals,
    /// Rows rejected at ingestion.
    pub skipped: Vec<SkippedRecord>,
}

/// Headline figures for the master report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterSummary {
    /// Distinct employees with hours in range.
    pub employee_count: usize,
    /// Distinct job sites with hours in range.
    pub job_site_count: usize,
    /// Totals over every row.
    pub totals: PayrollTotals,
}

/// Cross-site payroll, one row per employee and job site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterReport {
    /// The reported range.
    pub range: DateRange,
    /// The filters that were applied.
    pub filter: ReportFilter,
    /// Headline figures.
    pub summary: MasterSummary,
    /// One row per employee and job site.
    pub rows: Vec<ReportRow>,
    /// Rows rejected at ingestion.
    pub skipped: Vec<SkippedRecord>,
}

/// One employee's payroll with daily detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeReport {
    /// The reported range.
    pub range: DateRange,
    /// The employee.
    pub employee: Employee,
    /// Rolled-up figures; all zero when nothing was worked.
    pub summary: AggregatedPayroll,
    /// The employee's pay lines in chronological order.
    pub pay_lines: Vec<PayLine>,
    /// The employee's attendance rows and rate cards rejected at ingestion.
    pub skipped: Vec<SkippedRecord>,
}

/// The best-paid employees for a range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopPayrollReport {
    /// The reported range.
    pub range: DateRange,
    /// The number of rows asked for.
    pub limit: usize,
    /// Up to `limit` rows, highest pay first.
    pub rows: Vec<ReportRow>,
    /// Rows rejected at ingestion.
    pub skipped: Vec<SkippedRecord>,
}
