//! Aggregated payroll models.
//!
//! This module contains the [`AggregatedPayroll`] rollup, the [`ReportPeriod`]
//! key used by period reports, and the [`PayrollTotals`] summary shown at the
//! top of the payroll report.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A reporting period an aggregate can be keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportPeriod {
    /// An ISO week, Monday to Sunday.
    IsoWeek {
        /// The ISO week-numbering year.
        year: i32,
        /// The ISO week number (1-53).
        week: u32,
    },
    /// A calendar month.
    Month {
        /// The calendar year.
        year: i32,
        /// The month (1-12).
        month: u32,
    },
}

impl ReportPeriod {
    /// Returns the ISO week containing `date`.
    ///
    /// # Example
    ///
    /// ```
    /// use site_payroll::models::ReportPeriod;
    /// use chrono::NaiveDate;
    ///
    /// // 2027-01-01 is a Friday in ISO week 53 of 2026
    /// let period = ReportPeriod::iso_week_of(NaiveDate::from_ymd_opt(2027, 1, 1).unwrap());
    /// assert_eq!(period, ReportPeriod::IsoWeek { year: 2026, week: 53 });
    /// ```
    pub fn iso_week_of(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        ReportPeriod::IsoWeek {
            year: iso.year(),
            week: iso.week(),
        }
    }

    /// Returns the calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        ReportPeriod::Month {
            year: date.year(),
            month: date.month(),
        }
    }
}

/// Payroll rolled up over a group of pay lines.
///
/// `job_site_id` and `period` are set only when the grouping included them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedPayroll {
    /// The employee the group belongs to.
    pub employee_id: String,
    /// The job site, for per-site groupings.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub job_site_id: Option<String>,
    /// The period, for per-period groupings.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub period: Option<ReportPeriod>,
    /// Total hours worked.
    pub total_hours: Decimal,
    /// Hours paid at the regular rate.
    pub regular_hours: Decimal,
    /// Hours paid at the overtime rate.
    pub overtime_hours: Decimal,
    /// Number of distinct dates worked.
    pub total_days: u32,
    /// Sum of regular pay.
    pub total_regular_pay: Decimal,
    /// Sum of overtime pay.
    pub total_overtime_pay: Decimal,
    /// Sum of all pay.
    pub total_pay: Decimal,
}

/// Headline totals for a set of pay lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Total hours worked.
    pub total_hours: Decimal,
    /// Total regular pay.
    pub total_regular_pay: Decimal,
    /// Total overtime pay.
    pub total_overtime_pay: Decimal,
    /// Total pay.
    pub total_pay: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_iso_week_of_monday_and_sunday_match() {
        assert_eq!(
            ReportPeriod::iso_week_of(date(2026, 1, 12)),
            ReportPeriod::iso_week_of(date(2026, 1, 18))
        );
        assert_ne!(
            ReportPeriod::iso_week_of(date(2026, 1, 18)),
            ReportPeriod::iso_week_of(date(2026, 1, 19))
        );
    }

    #[test]
    fn test_month_of() {
        assert_eq!(
            ReportPeriod::month_of(date(2026, 2, 28)),
            ReportPeriod::Month {
                year: 2026,
                month: 2
            }
        );
    }

    #[test]
    fn test_period_ordering_is_chronological_within_kind() {
        let earlier = ReportPeriod::IsoWeek { year: 2025, week: 52 };
        let later = ReportPeriod::IsoWeek { year: 2026, week: 1 };
        assert!(earlier < later);
    }

    #[test]
    fn test_period_serialization() {
        let json = serde_json::to_string(&ReportPeriod::IsoWeek { year: 2026, week: 3 }).unwrap();
        assert_eq!(json, r#"{"kind":"iso_week","year":2026,"week":3}"#);
    }

    #[test]
    fn test_aggregate_omits_absent_keys() {
        let aggregate = AggregatedPayroll {
            employee_id: "emp_001".to_string(),
            job_site_id: None,
            period: None,
            total_hours: Decimal::from(8),
            regular_hours: Decimal::from(8),
            overtime_hours: Decimal::ZERO,
            total_days: 1,
            total_regular_pay: Decimal::from(160),
            total_overtime_pay: Decimal::ZERO,
            total_pay: Decimal::from(160),
        };

        let json = serde_json::to_string(&aggregate).unwrap();
        assert!(!json.contains("job_site_id"));
        assert!(!json.contains("period"));
        assert!(json.contains("\"total_days\":1"));
    }

    #[test]
    fn test_totals_default_to_zero() {
        let totals = PayrollTotals::default();
        assert_eq!(totals.total_pay, Decimal::ZERO);
        assert_eq!(totals.total_hours, Decimal::ZERO);
    }
}
