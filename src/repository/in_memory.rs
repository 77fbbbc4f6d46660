use std::path::Path;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::{AttendanceRepository, JobSiteRepository, RateRepository};
use crate::error::{EngineError, EngineResult};
use crate::ingest::{AttendanceRow, EmployeeRow, JobSiteRow, RateCardRow};

/// A snapshot of the data store's payroll tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Attendance rows.
    #[serde(default)]
    pub attendance: Vec<AttendanceRow>,
    /// Employee rows.
    #[serde(default)]
    pub employees: Vec<EmployeeRow>,
    /// Rate card rows.
    #[serde(default)]
    pub rate_cards: Vec<RateCardRow>,
    /// Job site rows.
    #[serde(default)]
    pub job_sites: Vec<JobSiteRow>,
}

impl Dataset {
    /// Reads a dataset from a JSON file.
    pub fn from_json_file(path: &Path) -> EngineResult<Self> {
        let path_str = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|e| EngineError::Repository {
            message: format!("failed to read dataset '{}': {}", path_str, e),
        })?;
        serde_json::from_str(&contents).map_err(|e| EngineError::Repository {
            message: format!("failed to parse dataset '{}': {}", path_str, e),
        })
    }
}

/// Data store adapter backed by process memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<Dataset>,
    is_offline: bool,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `dataset`.
    pub fn with_dataset(dataset: Dataset) -> Self {
        Self {
            data: RwLock::new(dataset),
            is_offline: false,
        }
    }

    /// Flips the store between online and offline; offline reads fail.
    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Appends attendance rows.
    pub async fn insert_attendance(&self, rows: impl IntoIterator<Item = AttendanceRow>) {
        self.data.write().await.attendance.extend(rows);
    }

    /// Inserts or replaces an employee by id.
    pub async fn upsert_employee(&self, row: EmployeeRow) {
        let mut guard = self.data.write().await;
        match guard.employees.iter_mut().find(|e| e.id == row.id) {
            Some(existing) => *existing = row,
            None => guard.employees.push(row),
        }
    }

    /// Appends rate cards.
    pub async fn insert_rate_cards(&self, rows: impl IntoIterator<Item = RateCardRow>) {
        self.data.write().await.rate_cards.extend(rows);
    }

    /// Inserts or replaces a job site by id.
    pub async fn upsert_job_site(&self, row: JobSiteRow) {
        let mut guard = self.data.write().await;
        match guard.job_sites.iter_mut().find(|s| s.id == row.id) {
            Some(existing) => *existing = row,
            None => guard.job_sites.push(row),
        }
    }

    fn ensure_online(&self) -> EngineResult<()> {
        if self.is_offline {
            return Err(EngineError::Repository {
                message: "in-memory store offline".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryStore {
    async fn fetch_range(&self, start: NaiveDate, end: NaiveDate) -> EngineResult<Vec<AttendanceRow>> {
        self.ensure_online()?;

        // ISO dates order lexically, the same way the store's date column does.
        let start = start.format("%Y-%m-%d").to_string();
        let end = end.format("%Y-%m-%d").to_string();

        let guard = self.data.read().await;
        Ok(guard
            .attendance
            .iter()
            .filter(|row| {
                let date = row.date.trim();
                start.as_str() <= date && date <= end.as_str()
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl RateRepository for InMemoryStore {
    async fn employees(&self) -> EngineResult<Vec<EmployeeRow>> {
        self.ensure_online()?;
        Ok(self.data.read().await.employees.clone())
    }

    async fn rate_cards(&self) -> EngineResult<Vec<RateCardRow>> {
        self.ensure_online()?;
        Ok(self.data.read().await.rate_cards.clone())
    }
}

#[async_trait]
impl JobSiteRepository for InMemoryStore {
    async fn job_sites(&self) -> EngineResult<Vec<JobSiteRow>> {
        self.ensure_online()?;
        Ok(self.data.read().await.job_sites.clone())
    }
}
