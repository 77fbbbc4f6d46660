//! Core data models for the Site Payroll Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod aggregate;
mod attendance;
mod employee;
mod job_site;
mod pay_line;
mod rate;

pub use aggregate::{AggregatedPayroll, PayrollTotals, ReportPeriod};
pub use attendance::AttendanceRecord;
pub use employee::{Employee, EmployeeType};
pub use job_site::{JobSite, job_site_name};
pub use pay_line::PayLine;
pub use rate::{EmployeeRateProfile, RateCard};
