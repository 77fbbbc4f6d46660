//! Report orchestration: fetch, ingest, compute, filter, aggregate.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{Datelike, Days, NaiveDate};
use tracing::{debug, warn};

use super::run::{PayrollRun, compute_run, label_pay_lines};
use super::types::{
    EmployeeReport, MasterReport, MasterSummary, PayrollReport, ReportRow, TopPayrollReport,
    WeeklyReport,
};
use crate::aggregation::{
    DateRange, PeriodGranularity, ReportFilter, aggregate_by_employee,
    aggregate_by_employee_and_job_site, aggregate_by_employee_and_period, summarize,
    top_n_by_pay,
};
use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::ingest::SkippedRecord;
use crate::models::{AggregatedPayroll, Employee, JobSite, PayLine};
use crate::repository::{AttendanceRepository, JobSiteRepository, RateRepository};

/// Builds reports from the repositories on demand.
///
/// Every call refetches and recomputes; nothing is cached between calls.
#[derive(Clone)]
pub struct ReportService {
    attendance: Arc<dyn AttendanceRepository>,
    rates: Arc<dyn RateRepository>,
    sites: Arc<dyn JobSiteRepository>,
    config: PayrollConfig,
}

/// Pay lines in range together with the reference data they were computed
/// and labelled against.
struct Snapshot {
    run: PayrollRun,
    roster: Vec<Employee>,
    sites: Vec<JobSite>,
    /// Employee behind each fetched attendance row and rate card, by row id.
    owners: HashMap<String, String>,
}

impl Snapshot {
    /// Skipped rows belonging to `employee_id`.
    fn skipped_for(&self, employee_id: &str) -> Vec<SkippedRecord> {
        self.run
            .skipped
            .iter()
            .filter(|s| self.owners.get(&s.record_id).is_some_and(|owner| owner == employee_id))
            .cloned()
            .collect()
    }
}

impl ReportService {
    /// Creates a service over the given repositories.
    pub fn new(
        attendance: Arc<dyn AttendanceRepository>,
        rates: Arc<dyn RateRepository>,
        sites: Arc<dyn JobSiteRepository>,
        config: PayrollConfig,
    ) -> Self {
        Self {
            attendance,
            rates,
            sites,
            config,
        }
    }

    /// Returns the configuration reports are computed under.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Fetches and computes pay lines dated within `range`.
    ///
    /// Attendance is fetched for the whole ISO weeks the range touches, so a
    /// shift just inside the range still sees the hours worked earlier in its
    /// week. Lines outside the range are then dropped, as are skipped
    /// attendance rows dated outside it. A skipped row whose date does not
    /// parse cannot be placed, so it is always reported.
    async fn snapshot(&self, range: DateRange) -> EngineResult<Snapshot> {
        let (fetch_start, fetch_end) = widen_to_iso_weeks(range);

        let rows = self.attendance.fetch_range(fetch_start, fetch_end).await?;
        let roster: Vec<Employee> = self
            .rates
            .employees()
            .await?
            .into_iter()
            .map(Employee::from)
            .collect();
        let cards = self.rates.rate_cards().await?;
        let sites: Vec<JobSite> = self
            .sites
            .job_sites()
            .await?
            .into_iter()
            .map(JobSite::from)
            .collect();

        let out_of_range: BTreeSet<&str> = rows
            .iter()
            .filter(|row| !reportable_in(&row.date, range))
            .map(|row| row.id.as_str())
            .collect();

        let mut run = compute_run(&rows, &roster, &cards, &self.config)?;
        run.pay_lines.retain(|line| range.contains(line.date));
        run.skipped.retain(|s| !out_of_range.contains(s.record_id.as_str()));
        run.totals = summarize(&run.pay_lines)?;
        label_pay_lines(&mut run.pay_lines, &sites);

        if run.skipped_count() > 0 {
            warn!(
                skipped = run.skipped_count(),
                start = %range.start,
                end = %range.end,
                "Skipped malformed rows while computing payroll"
            );
        }
        debug!(
            fetched = rows.len(),
            pay_lines = run.pay_lines.len(),
            fetch_start = %fetch_start,
            fetch_end = %fetch_end,
            "Computed payroll snapshot"
        );

        let owners = rows
            .iter()
            .map(|row| (row.id.clone(), row.employee_id.clone()))
            .chain(cards.iter().map(|card| (card.id.clone(), card.employee_id.clone())))
            .collect();

        Ok(Snapshot {
            run,
            roster,
            sites,
            owners,
        })
    }

    /// Computes pay lines for `range` with no aggregation.
    pub async fn pay_lines(&self, range: DateRange) -> EngineResult<PayrollRun> {
        Ok(self.snapshot(range).await?.run)
    }

    /// Per-employee payroll with totals, after applying `filter`.
    ///
    /// The job site and employee type filters are applied to pay lines, after
    /// overtime has been computed over all of an employee's hours.
    pub async fn payroll_report(&self, range: DateRange, filter: ReportFilter) -> EngineResult<PayrollReport> {
        let Snapshot { run, roster, sites, .. } = self.snapshot(range).await?;
        let pay_lines = filter.apply(run.pay_lines, &roster);

        Ok(PayrollReport {
            range,
            totals: summarize(&pay_lines)?,
            rows: label(aggregate_by_employee(&pay_lines)?, &roster, &sites),
            pay_lines,
            filter,
            skipped: run.skipped,
        })
    }

    /// Per-employee payroll split by ISO week.
    pub async fn weekly_report(&self, range: DateRange) -> EngineResult<WeeklyReport> {
        let Snapshot { run, roster, sites, .. } = self.snapshot(range).await?;
        let weeks = aggregate_by_employee_and_period(&run.pay_lines, PeriodGranularity::Week)?;

        Ok(WeeklyReport {
            range,
            rows: label(weeks, &roster, &sites),
            totals: run.totals,
            skipped: run.skipped,
        })
    }

    /// Cross-site payroll per employee and job site, with headline figures.
    pub async fn master_report(&self, range: DateRange, filter: ReportFilter) -> EngineResult<MasterReport> {
        let Snapshot { run, roster, sites, .. } = self.snapshot(range).await?;
        let pay_lines = filter.apply(run.pay_lines, &roster);

        let summary = master_summary(&pay_lines)?;
        let rows = label(aggregate_by_employee_and_job_site(&pay_lines)?, &roster, &sites);

        Ok(MasterReport {
            range,
            filter,
            summary,
            rows,
            skipped: run.skipped,
        })
    }

    /// One employee's payroll with daily pay lines.
    ///
    /// Only the employee's own skipped rows are listed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownEmployee`] if the employee is not on the
    /// roster.
    pub async fn employee_report(&self, employee_id: &str, range: DateRange) -> EngineResult<EmployeeReport> {
        let snapshot = self.snapshot(range).await?;
        let skipped = snapshot.skipped_for(employee_id);
        let Snapshot { run, roster, .. } = snapshot;

        let employee = roster
            .into_iter()
            .find(|e| e.id == employee_id)
            .ok_or_else(|| EngineError::UnknownEmployee {
                employee_id: employee_id.to_string(),
            })?;

        let pay_lines: Vec<PayLine> = run
            .pay_lines
            .into_iter()
            .filter(|line| line.employee_id == employee_id)
            .collect();
        let summary = aggregate_by_employee(&pay_lines)?
            .into_iter()
            .next()
            .unwrap_or_else(|| empty_aggregate(employee_id));

        Ok(EmployeeReport {
            range,
            employee,
            summary,
            pay_lines,
            skipped,
        })
    }

    /// The `limit` best-paid employees for `range`. `None` uses the configured
    /// default.
    pub async fn top_payroll(&self, range: DateRange, limit: Option<usize>) -> EngineResult<TopPayrollReport> {
        let limit = limit.unwrap_or(self.config.reports.top_payroll_limit);
        let Snapshot { run, roster, sites, .. } = self.snapshot(range).await?;

        let top = top_n_by_pay(&aggregate_by_employee(&run.pay_lines)?, limit);

        Ok(TopPayrollReport {
            range,
            limit,
            rows: label(top, &roster, &sites),
            skipped: run.skipped,
        })
    }
}

/// Returns the Monday on or before `range.start` and the Sunday on or after
/// `range.end`.
fn widen_to_iso_weeks(range: DateRange) -> (NaiveDate, NaiveDate) {
    let back = u64::from(range.start.weekday().num_days_from_monday());
    let forward = 6 - u64::from(range.end.weekday().num_days_from_monday());

    let start = range.start.checked_sub_days(Days::new(back)).unwrap_or(range.start);
    let end = range.end.checked_add_days(Days::new(forward)).unwrap_or(range.end);
    (start, end)
}

/// Whether a row dated `raw` belongs in a report over `range`.
///
/// Unparseable dates count as in range: the store returned the row for this
/// fetch and there is no other range it could be reported under.
fn reportable_in(raw: &str, range: DateRange) -> bool {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_or(true, |date| range.contains(date))
}

fn label(aggregates: Vec<AggregatedPayroll>, roster: &[Employee], sites: &[JobSite]) -> Vec<ReportRow> {
    aggregates
        .into_iter()
        .map(|aggregate| ReportRow::labelled(aggregate, roster, sites))
        .collect()
}

fn master_summary(pay_lines: &[PayLine]) -> EngineResult<MasterSummary> {
    let employees: BTreeSet<&str> = pay_lines.iter().map(|l| l.employee_id.as_str()).collect();
    let job_sites: BTreeSet<&str> = pay_lines.iter().map(|l| l.job_site_id.as_str()).collect();

    Ok(MasterSummary {
        employee_count: employees.len(),
        job_site_count: job_sites.len(),
        totals: summarize(pay_lines)?,
    })
}

fn empty_aggregate(employee_id: &str) -> AggregatedPayroll {
    AggregatedPayroll {
        employee_id: employee_id.to_string(),
        job_site_id: None,
        period: None,
        total_hours: Default::default(),
        regular_hours: Default::default(),
        overtime_hours: Default::default(),
        total_days: 0,
        total_regular_pay: Default::default(),
        total_overtime_pay: Default::default(),
        total_pay: Default::default(),
    }
}
