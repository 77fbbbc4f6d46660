//! Grouping of pay lines into [`AggregatedPayroll`] rollups.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AggregatedPayroll, PayLine, PayrollTotals, ReportPeriod};

/// Period size for [`aggregate_by_employee_and_period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodGranularity {
    /// ISO weeks, Monday to Sunday.
    Week,
    /// Calendar months.
    Month,
}

impl PeriodGranularity {
    fn period_of(self, date: NaiveDate) -> ReportPeriod {
        match self {
            PeriodGranularity::Week => ReportPeriod::iso_week_of(date),
            PeriodGranularity::Month => ReportPeriod::month_of(date),
        }
    }
}

#[derive(Default)]
struct Accumulator {
    total_hours: Decimal,
    regular_hours: Decimal,
    overtime_hours: Decimal,
    dates: BTreeSet<NaiveDate>,
    regular_pay: Decimal,
    overtime_pay: Decimal,
    total_pay: Decimal,
}

impl Accumulator {
    fn add(&mut self, line: &PayLine) -> EngineResult<()> {
        accumulate(&mut self.total_hours, line.shift_hours, "total hours", &line.employee_id)?;
        accumulate(&mut self.regular_hours, line.regular_hours, "regular hours", &line.employee_id)?;
        accumulate(&mut self.overtime_hours, line.overtime_hours, "overtime hours", &line.employee_id)?;
        accumulate(&mut self.regular_pay, line.regular_pay, "regular pay", &line.employee_id)?;
        accumulate(&mut self.overtime_pay, line.overtime_pay, "overtime pay", &line.employee_id)?;
        accumulate(&mut self.total_pay, line.total_pay, "total pay", &line.employee_id)?;
        self.dates.insert(line.date);
        Ok(())
    }

    fn finish(
        self,
        employee_id: String,
        job_site_id: Option<String>,
        period: Option<ReportPeriod>,
    ) -> AggregatedPayroll {
        AggregatedPayroll {
            employee_id,
            job_site_id,
            period,
            total_hours: self.total_hours,
            regular_hours: self.regular_hours,
            overtime_hours: self.overtime_hours,
            total_days: u32::try_from(self.dates.len()).unwrap_or(u32::MAX),
            total_regular_pay: self.regular_pay,
            total_overtime_pay: self.overtime_pay,
            total_pay: self.total_pay,
        }
    }
}

/// Adds `value` to `total`, failing instead of panicking past `Decimal::MAX`.
fn accumulate(total: &mut Decimal, value: Decimal, what: &str, employee_id: &str) -> EngineResult<()> {
    *total = total.checked_add(value).ok_or_else(|| EngineError::Overflow {
        message: format!("{} for employee '{}'", what, employee_id),
    })?;
    Ok(())
}

/// Groups pay lines by employee.
///
/// `total_days` counts distinct dates, so two shifts on one day count once.
/// The output is sorted by employee id.
///
/// # Errors
///
/// Returns [`EngineError::Overflow`] if a group's hours or pay cannot be
/// represented.
pub fn aggregate_by_employee(lines: &[PayLine]) -> EngineResult<Vec<AggregatedPayroll>> {
    let mut groups: BTreeMap<&str, Accumulator> = BTreeMap::new();
    for line in lines {
        groups.entry(line.employee_id.as_str()).or_default().add(line)?;
    }
    Ok(groups
        .into_iter()
        .map(|(employee_id, acc)| acc.finish(employee_id.to_string(), None, None))
        .collect())
}

/// Groups pay lines by employee and job site, sorted by both.
pub fn aggregate_by_employee_and_job_site(lines: &[PayLine]) -> EngineResult<Vec<AggregatedPayroll>> {
    let mut groups: BTreeMap<(&str, &str), Accumulator> = BTreeMap::new();
    for line in lines {
        groups
            .entry((line.employee_id.as_str(), line.job_site_id.as_str()))
            .or_default()
            .add(line)?;
    }
    Ok(groups
        .into_iter()
        .map(|((employee_id, job_site_id), acc)| {
            acc.finish(employee_id.to_string(), Some(job_site_id.to_string()), None)
        })
        .collect())
}

/// Groups pay lines by employee and period, sorted by employee then period.
pub fn aggregate_by_employee_and_period(
    lines: &[PayLine],
    granularity: PeriodGranularity,
) -> EngineResult<Vec<AggregatedPayroll>> {
    let mut groups: BTreeMap<(&str, ReportPeriod), Accumulator> = BTreeMap::new();
    for line in lines {
        groups
            .entry((line.employee_id.as_str(), granularity.period_of(line.date)))
            .or_default()
            .add(line)?;
    }
    Ok(groups
        .into_iter()
        .map(|((employee_id, period), acc)| acc.finish(employee_id.to_string(), None, Some(period)))
        .collect())
}

/// Sums hours and pay over all lines.
pub fn summarize(lines: &[PayLine]) -> EngineResult<PayrollTotals> {
    let mut totals = PayrollTotals::default();
    for line in lines {
        let add = |total: Decimal, value: Decimal, what: &str| {
            total.checked_add(value).ok_or_else(|| EngineError::Overflow {
                message: format!("{} across all employees", what),
            })
        };
        totals.total_hours = add(totals.total_hours, line.shift_hours, "total hours")?;
        totals.total_regular_pay = add(totals.total_regular_pay, line.regular_pay, "regular pay")?;
        totals.total_overtime_pay = add(totals.total_overtime_pay, line.overtime_pay, "overtime pay")?;
        totals.total_pay = add(totals.total_pay, line.total_pay, "total pay")?;
    }
    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn line(record_id: &str, employee_id: &str, site: &str, day: (u32, u32), hours: &str, ot: &str) -> PayLine {
        let shift = dec(hours);
        let overtime_hours = dec(ot);
        let regular_hours = shift - overtime_hours;
        let regular_pay = regular_hours * dec("20");
        let overtime_pay = overtime_hours * dec("30");
        PayLine {
            record_id: record_id.to_string(),
            employee_id: employee_id.to_string(),
            job_site_id: site.to_string(),
            job_site_name: None,
            date: NaiveDate::from_ymd_opt(2026, day.0, day.1).unwrap(),
            start_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            shift_hours: shift,
            regular_hours,
            overtime_hours,
            regular_rate: dec("20"),
            overtime_rate: dec("30"),
            regular_pay,
            overtime_pay,
            total_pay: regular_pay + overtime_pay,
        }
    }

    fn sample() -> Vec<PayLine> {
        vec![
            line("l1", "emp_b", "site_n", (1, 12), "8", "0"),
            line("l2", "emp_a", "site_n", (1, 12), "4", "0"),
            line("l3", "emp_a", "site_s", (1, 12), "4", "0"),
            line("l4", "emp_a", "site_n", (1, 13), "10", "2"),
            line("l5", "emp_a", "site_n", (2, 2), "6", "0"),
        ]
    }

    #[test]
    fn test_aggregate_by_employee_sums_and_counts_distinct_days() {
        let aggregates = aggregate_by_employee(&sample()).unwrap();

        assert_eq!(aggregates.len(), 2);
        let a = &aggregates[0];
        assert_eq!(a.employee_id, "emp_a");
        assert_eq!(a.total_hours, dec("24"));
        assert_eq!(a.regular_hours, dec("22"));
        assert_eq!(a.overtime_hours, dec("2"));
        // Two shifts on Jan 12 count as one day
        assert_eq!(a.total_days, 3);
        assert_eq!(a.total_regular_pay, dec("440"));
        assert_eq!(a.total_overtime_pay, dec("60"));
        assert_eq!(a.total_pay, dec("500"));
        assert_eq!(a.job_site_id, None);

        assert_eq!(aggregates[1].employee_id, "emp_b");
        assert_eq!(aggregates[1].total_pay, dec("160"));
    }

    #[test]
    fn test_aggregate_by_employee_and_job_site() {
        let aggregates = aggregate_by_employee_and_job_site(&sample()).unwrap();

        let keys: Vec<(&str, &str)> = aggregates
            .iter()
            .map(|a| (a.employee_id.as_str(), a.job_site_id.as_deref().unwrap()))
            .collect();
        assert_eq!(
            keys,
            vec![("emp_a", "site_n"), ("emp_a", "site_s"), ("emp_b", "site_n")]
        );
        assert_eq!(aggregates[0].total_hours, dec("20"));
        assert_eq!(aggregates[0].total_days, 3);
        assert_eq!(aggregates[1].total_hours, dec("4"));
    }

    #[test]
    fn test_aggregate_by_week_and_month() {
        let weekly = aggregate_by_employee_and_period(&sample(), PeriodGranularity::Week).unwrap();
        let emp_a: Vec<_> = weekly.iter().filter(|a| a.employee_id == "emp_a").collect();
        assert_eq!(emp_a.len(), 2);
        assert_eq!(emp_a[0].period, Some(ReportPeriod::IsoWeek { year: 2026, week: 3 }));
        assert_eq!(emp_a[0].total_hours, dec("18"));
        assert_eq!(emp_a[1].period, Some(ReportPeriod::IsoWeek { year: 2026, week: 6 }));

        let monthly = aggregate_by_employee_and_period(&sample(), PeriodGranularity::Month).unwrap();
        assert_eq!(monthly.len(), 3);
        assert_eq!(monthly[1].period, Some(ReportPeriod::Month { year: 2026, month: 2 }));
        assert_eq!(monthly[1].total_hours, dec("6"));
    }

    #[test]
    fn test_aggregation_is_additive_over_disjoint_sets() {
        let all = sample();
        let (left, right) = all.split_at(2);

        let whole = aggregate_by_employee(&all).unwrap();
        let part_l = aggregate_by_employee(left).unwrap();
        let part_r = aggregate_by_employee(right).unwrap();

        for aggregate in &whole {
            let pay_of = |parts: &[AggregatedPayroll]| {
                parts
                    .iter()
                    .filter(|p| p.employee_id == aggregate.employee_id)
                    .map(|p| p.total_pay)
                    .sum::<Decimal>()
            };
            assert_eq!(aggregate.total_pay, pay_of(&part_l) + pay_of(&part_r));
        }
    }

    #[test]
    fn test_zero_hour_line_contributes_nothing_but_a_day() {
        let lines = vec![line("l1", "emp_a", "site_n", (1, 12), "0", "0")];
        let aggregates = aggregate_by_employee(&lines).unwrap();

        assert_eq!(aggregates[0].total_hours, Decimal::ZERO);
        assert_eq!(aggregates[0].total_pay, Decimal::ZERO);
        assert_eq!(aggregates[0].total_days, 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_by_employee(&[]).unwrap().is_empty());
        assert_eq!(summarize(&[]).unwrap(), PayrollTotals::default());
    }

    #[test]
    fn test_sum_past_decimal_max_is_an_error() {
        let mut big = line("l1", "emp_a", "site_n", (1, 12), "8", "0");
        big.total_pay = Decimal::MAX;
        big.regular_pay = Decimal::MAX;
        let lines = vec![big.clone(), big];

        match aggregate_by_employee(&lines) {
            Err(EngineError::Overflow { message }) => {
                assert!(message.contains("emp_a"));
            }
            other => panic!("Expected Overflow, got {:?}", other),
        }
        assert!(matches!(summarize(&lines), Err(EngineError::Overflow { .. })));
    }

    #[test]
    fn test_summarize() {
        let totals = summarize(&sample()).unwrap();
        assert_eq!(totals.total_hours, dec("32"));
        assert_eq!(totals.total_regular_pay, dec("600"));
        assert_eq!(totals.total_overtime_pay, dec("60"));
        assert_eq!(totals.total_pay, dec("660"));
    }
}
