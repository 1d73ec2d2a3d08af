use super::Outcome;
use crate::mappings::{DriftRecord, Records};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDifference {
    pub attribute: String,
    pub terraform_value: String,
    pub cloud_value: String,
    pub recent_actor: Option<String>,
    pub recent_action_timestamp: Option<String>,
}

/// A Terraform-managed resource with one or more drifted attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriftedResource {
    /// `<module> (module) "<type>" "<name>"`, unique within a report.
    pub path: String,
    pub state_file: Option<String>,
    pub differences: Vec<AttributeDifference>,
}

/// Groups attribute differences under their resource path, in first-seen order.
pub fn aggregate(records: &Records<DriftRecord>) -> Outcome<Vec<DriftedResource>> {
    if records.is_empty() {
        return Outcome::RanEmpty;
    }

    let mut resources: Vec<DriftedResource> = Vec::new();
    for record in records.iter() {
        let path = record.resource_path();
        let difference = AttributeDifference {
            attribute: record.attribute_name.clone(),
            terraform_value: display_value(&record.terraform_value),
            cloud_value: display_value(&record.cloud_value),
            recent_actor: record.recent_actor.clone(),
            recent_action_timestamp: record.recent_action_timestamp.clone(),
        };

        match resources.iter().position(|resource| resource.path == path) {
            Some(index) => {
                let resource = &mut resources[index];
                if resource.state_file.is_none() {
                    resource.state_file = record.state_file_name.clone();
                }
                resource.differences.push(difference);
            }
            None => resources.push(DriftedResource {
                path,
                state_file: record.state_file_name.clone(),
                differences: vec![difference],
            }),
        }
    }

    tracing::debug!(resources = resources.len(), "drift grouped by resource path");

    Outcome::RanWithData(resources)
}

fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
