//! Job site model.

use serde::{Deserialize, Serialize};

/// A construction site that attendance is booked against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSite {
    /// Unique identifier for the site.
    pub id: String,
    /// Display name, e.g. "Harbour Tower".
    pub name: String,
    /// Street address, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Returns the name of `job_site_id` from `sites`, if it is listed.
pub fn job_site_name(sites: &[JobSite], job_site_id: &str) -> Option<String> {
    sites
        .iter()
        .find(|site| site.id == job_site_id)
        .map(|site| site.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(id: &str, name: &str) -> JobSite {
        JobSite {
            id: id.to_string(),
            name: name.to_string(),
            address: None,
        }
    }

    #[test]
    fn test_job_site_name_lookup() {
        let sites = vec![site("site_n", "North Yard"), site("site_s", "South Pier")];

        assert_eq!(job_site_name(&sites, "site_s").as_deref(), Some("South Pier"));
        assert_eq!(job_site_name(&sites, "site_x"), None);
    }

    #[test]
    fn test_address_omitted_when_missing() {
        let json = serde_json::to_string(&site("site_n", "North Yard")).unwrap();
        assert!(!json.contains("address"));
    }
}
