//! HTTP API module for the Site Payroll Engine.
//!
//! This module provides the REST API endpoints for computing pay lines and
//! reading payroll reports.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{PayLinesRequest, ReportQuery, TopPayrollQuery};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
