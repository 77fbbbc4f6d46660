//! Reports built on top of the calculation engine.
//!
//! [`compute_run`] turns already-fetched rows into pay lines. The
//! [`ReportService`] fetches rows through the repository ports and shapes
//! the result into the payroll, weekly, master, employee and top payroll
//! reports.

mod run;
mod service;
mod types;

pub use run::{PayrollRun, compute_run, label_pay_lines};
pub use service::ReportService;
pub use types::{
    EmployeeReport, MasterReport, MasterSummary, PayrollReport, ReportRow, TopPayrollReport,
    WeeklyReport,
};
