//! Application state for the Site Payroll Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::reports::ReportService;
use crate::repository::{AttendanceRepository, JobSiteRepository, RateRepository};

/// Shared application state.
///
/// Contains the loaded configuration and the report service built over the
/// data store repositories.
#[derive(Clone)]
pub struct AppState {
    /// The loaded payroll configuration.
    config: Arc<ConfigLoader>,
    /// Report orchestration over the repositories.
    reports: ReportService,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        config: ConfigLoader,
        attendance: Arc<dyn AttendanceRepository>,
        rates: Arc<dyn RateRepository>,
        sites: Arc<dyn JobSiteRepository>,
    ) -> Self {
        let reports = ReportService::new(attendance, rates, sites, config.config().clone());
        Self {
            config: Arc::new(config),
            reports,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the report service.
    pub fn reports(&self) -> &ReportService {
        &self.reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
