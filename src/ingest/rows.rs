//! Raw row shapes as they come out of the external data store.
//!
//! Field names follow the store's column names. Nothing here is validated;
//! see [`super::ingest_attendance`] and friends for the conversion into
//! domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Employee, EmployeeType, JobSite};

/// One attendance row.
///
/// Dates and times stay as strings until ingestion so that a single bad
/// value skips one row instead of failing the whole payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRow {
    /// Row identifier.
    pub id: String,
    /// Employee reference.
    pub employee_id: String,
    /// Job site reference.
    #[serde(alias = "job_site_id")]
    pub jobsite_id: String,
    /// Date as `YYYY-MM-DD`.
    pub date: String,
    /// Start time as `HH:MM` or `HH:MM:SS`.
    pub start_time: String,
    /// End time as `HH:MM` or `HH:MM:SS`.
    pub end_time: String,
    /// Break minutes; missing means zero.
    #[serde(default)]
    pub minute_deduct: Option<i64>,
    /// Hours as stored by the data store, if any.
    #[serde(default)]
    pub shift_hours: Option<Decimal>,
}

/// One employee row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRow {
    /// Employee identifier.
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Role on site.
    #[serde(rename = "type")]
    pub employee_type: EmployeeType,
    /// Current regular rate.
    #[serde(default)]
    pub regular_rate: Option<Decimal>,
    /// Current overtime rate.
    #[serde(default)]
    pub overtime_rate: Option<Decimal>,
}

/// One rate card row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCardRow {
    /// Card identifier.
    pub id: String,
    /// Employee the card applies to.
    pub employee_id: String,
    /// Regular hourly rate.
    pub regular_pay_rate: Decimal,
    /// Overtime hourly rate.
    pub overtime_pay_rate: Decimal,
    /// Date as `YYYY-MM-DD`.
    pub valid_from: String,
    /// Date as `YYYY-MM-DD`; missing means open-ended.
    #[serde(default)]
    pub valid_to: Option<String>,
}

/// One job site row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSiteRow {
    /// Site identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Street address.
    #[serde(default)]
    pub address: Option<String>,
    /// Lifecycle status as stored, e.g. "active" or "completed".
    #[serde(default)]
    pub status: Option<String>,
}

impl From<JobSiteRow> for JobSite {
    fn from(row: JobSiteRow) -> Self {
        JobSite {
            id: row.id,
            name: row.name,
            address: row.address,
        }
    }
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            employee_type: row.employee_type,
            regular_rate: row.regular_rate,
            overtime_rate: row.overtime_rate,
        }
    }
}

impl From<&Employee> for EmployeeRow {
    fn from(employee: &Employee) -> Self {
        EmployeeRow {
            id: employee.id.clone(),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            employee_type: employee.employee_type,
            regular_rate: employee.regular_rate,
            overtime_rate: employee.overtime_rate,
        }
    }
}
