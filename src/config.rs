use std::path::{Path, PathBuf};

pub const DEFAULT_MAPPINGS_DIR: &str = "mappings";

pub const NEW_RESOURCES_FILE: &str = "new-resources-to-documents.json";
pub const CLOUD_ACTIONS_FILE: &str = "resources-to-cloud-actions.json";
pub const COST_ESTIMATES_FILE: &str = "division-to-cost-estimates.json";
pub const SECURITY_SCAN_FILE: &str = "division-to-security-scan.json";
pub const DRIFT_DIFFERENCES_FILE: &str = "drift-resources-differences.json";

/// Locations of the five upstream mapping extracts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingPaths {
    pub new_resources: PathBuf,
    pub cloud_actions: PathBuf,
    pub cost_estimates: PathBuf,
    pub security_scan: PathBuf,
    pub drift_differences: PathBuf,
}

impl MappingPaths {
    /// Uses the fixed upstream file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            new_resources: dir.join(NEW_RESOURCES_FILE),
            cloud_actions: dir.join(CLOUD_ACTIONS_FILE),
            cost_estimates: dir.join(COST_ESTIMATES_FILE),
            security_scan: dir.join(SECURITY_SCAN_FILE),
            drift_differences: dir.join(DRIFT_DIFFERENCES_FILE),
        }
    }
}

impl Default for MappingPaths {
    fn default() -> Self {
        Self::in_dir(DEFAULT_MAPPINGS_DIR)
    }
}

/// Identifies the scan job a report is written for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobInfo {
    pub name: String,
    pub unique_id: String,
}

impl JobInfo {
    pub fn new(name: impl Into<String>, unique_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unique_id: unique_id.into(),
        }
    }

    pub fn report_title(&self) -> String {
        format!("{} - State of Scanned Cloud Resources", self.name)
    }
}
