mod shape;
mod types;

pub use shape::{Divisions, Keyed, Records};
pub use types::{
    ActionKind, ActorAction, CostEstimate, DriftRecord, ResourceRecord, SecurityFinding, Severity,
};

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::config::MappingPaths;
use crate::error::ReportError;

/// The five upstream extracts, parsed into typed records.
#[derive(Debug, Clone, Default)]
pub struct Mappings {
    pub new_resources: Divisions<Vec<ResourceRecord>>,
    /// Keyed by resource identifier.
    pub cloud_actions: Keyed<Vec<ActorAction>>,
    pub cost_estimates: Divisions<Vec<CostEstimate>>,
    pub security_scan: Divisions<Vec<SecurityFinding>>,
    pub drift_differences: Records<DriftRecord>,
}

impl Mappings {
    pub fn load(paths: &MappingPaths) -> Result<Self, ReportError> {
        let mappings = Self {
            new_resources: load_extract("new resources", &paths.new_resources)?,
            cloud_actions: load_extract("cloud actions", &paths.cloud_actions)?,
            cost_estimates: load_extract("cost estimates", &paths.cost_estimates)?,
            security_scan: load_extract("security scan", &paths.security_scan)?,
            drift_differences: load_extract("drift differences", &paths.drift_differences)?,
        };

        tracing::info!(
            new_resource_divisions = mappings.new_resources.len(),
            actioned_resources = mappings.cloud_actions.len(),
            cost_divisions = mappings.cost_estimates.len(),
            scanned_divisions = mappings.security_scan.len(),
            drift_records = mappings.drift_differences.0.len(),
            "mappings loaded"
        );

        Ok(mappings)
    }
}

fn load_extract<T: DeserializeOwned>(name: &'static str, path: &Path) -> Result<T, ReportError> {
    let raw = fs::read_to_string(path).map_err(|source| ReportError::Read {
        name,
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = raw.len(), "parsing {name} mapping");

    serde_json::from_str(&raw).map_err(|source| match source.classify() {
        Category::Data => ReportError::Schema {
            name,
            path: path.to_path_buf(),
            source,
        },
        Category::Io | Category::Syntax | Category::Eof => ReportError::MalformedJson {
            name,
            path: path.to_path_buf(),
            source,
        },
    })
}
