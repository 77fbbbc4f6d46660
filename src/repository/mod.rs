//! Repository ports for the external data store.
//!
//! The calculation core never talks to a live connection. Callers fetch raw
//! rows through these traits and hand the in-memory collections to the
//! engine. [`InMemoryStore`] implements every port for tests and for the
//! binary's file-seeded mode.

mod in_memory;

pub use in_memory::{Dataset, InMemoryStore};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::ingest::{AttendanceRow, EmployeeRow, JobSiteRow, RateCardRow};

/// Read access to attendance rows.
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Returns every attendance row dated between `start` and `end`,
    /// inclusive.
    async fn fetch_range(&self, start: NaiveDate, end: NaiveDate) -> EngineResult<Vec<AttendanceRow>>;
}

/// Read access to employees and their rate cards.
#[async_trait]
pub trait RateRepository: Send + Sync {
    /// Returns the employee roster with current rates.
    async fn employees(&self) -> EngineResult<Vec<EmployeeRow>>;

    /// Returns all rate cards.
    async fn rate_cards(&self) -> EngineResult<Vec<RateCardRow>>;
}

/// Read access to job sites, used to label report rows.
#[async_trait]
pub trait JobSiteRepository: Send + Sync {
    /// Returns every job site.
    async fn job_sites(&self) -> EngineResult<Vec<JobSiteRow>>;
}
