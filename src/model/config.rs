use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/";
pub const DEFAULT_PAGE_URL: &str = "http://localhost:3000/";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Base of the benchmark API; endpoint paths are appended to it.
    pub api_url: String,

    /// Page the shareable link points at; the query string is managed by the
    /// dashboard.
    pub page_url: String,

    pub commit_host: String,
    pub project: String,

    pub old_shortcut: String,
    pub new_shortcut: String,

    /// Workloads offered by the workload selectors, in cycling order.
    pub workloads: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_url: DEFAULT_PAGE_URL.to_string(),
            commit_host: "github.com".to_string(),
            project: "vitessio/vitess".to_string(),
            old_shortcut: "o".to_string(),
            new_shortcut: "j".to_string(),
            workloads: ["TPCC", "TPCC_FK", "TPCC_UNSHARDED", "TPCC_FK_UNMANAGED"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl DashboardConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `https://{host}/{project}/commit/{value}`; link construction only.
    pub fn commit_url(&self, canonical_value: &str) -> String {
        format!(
            "https://{}/{}/commit/{}",
            self.commit_host.trim_matches('/'),
            self.project.trim_matches('/'),
            canonical_value
        )
    }
}
