//! Aggregation layer: filters, grouping and ranking over pay lines.
//!
//! Everything here is stateless. Filters run before grouping and compose in
//! any order; grouping output is always sorted by its key.

mod filter;
mod group;
mod rank;

pub use filter::{
    DateRange, PayrollRow, ReportFilter, filter_by_date_range, filter_by_employee_type,
    filter_by_job_site,
};
pub use group::{
    PeriodGranularity, aggregate_by_employee, aggregate_by_employee_and_job_site,
    aggregate_by_employee_and_period, summarize,
};
pub use rank::top_n_by_pay;
