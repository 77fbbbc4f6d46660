//! Calculation logic for the Site Payroll Engine.
//!
//! This module contains the weekly overtime calculation, the date-scoped rate
//! lookup, and the batch runner that partitions attendance by employee and
//! ISO week before calculating.

mod payroll_run;
mod rate_book;
mod weekly_overtime;

pub use payroll_run::run_payroll;
pub use rate_book::RateBook;
pub use weekly_overtime::{
    OvertimePolicy, WEEKLY_OVERTIME_THRESHOLD, compute_pay_lines, compute_pay_lines_with,
};
