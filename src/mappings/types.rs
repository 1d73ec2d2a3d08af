use std::fmt;

use serde::Deserialize;

/// A discovered resource that is not yet under Terraform control.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceRecord {
    #[serde(rename = "type", alias = "resource_type", alias = "ResourceType")]
    pub resource_type: String,
    #[serde(alias = "resource_name", alias = "ResourceTerraformerName")]
    pub name: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default, alias = "Region")]
    pub region: Option<String>,
    /// Reference to the generated import documentation.
    #[serde(default)]
    pub document: Option<String>,
}

impl ResourceRecord {
    // NOTE: Terraform resource types are prefixed with their provider, e.g. `aws_s3_bucket`
    pub fn provider(&self) -> &str {
        match &self.provider {
            Some(provider) => provider,
            None => self
                .resource_type
                .split('_')
                .next()
                .unwrap_or(&self.resource_type),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CostEstimate {
    pub resource_type: String,
    pub resource_name: String,
    #[serde(alias = "cost_monthly")]
    pub monthly_cost: Option<f64>,
    #[serde(default)]
    pub is_usage_based: bool,
}

impl CostEstimate {
    /// `None` when the cost depends on usage and is therefore unknown.
    pub fn known_cost(&self) -> Option<f64> {
        if self.is_usage_based {
            None
        } else {
            self.monthly_cost
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Unknown,
}

impl TryFrom<String> for Severity {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_uppercase().as_str() {
            "CRITICAL" => Ok(Severity::Critical),
            "HIGH" => Ok(Severity::High),
            "MEDIUM" => Ok(Severity::Medium),
            "LOW" => Ok(Severity::Low),
            "UNKNOWN" => Ok(Severity::Unknown),
            _ => Err(format!("unknown severity `{value}`")),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
            Severity::Unknown => "UNKNOWN",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SecurityFinding {
    pub rule_id: String,
    pub severity: Severity,
    pub description: String,
    pub resource: String,
    #[serde(default)]
    pub resolution: Option<String>,
}

/// One drifted attribute of a Terraform-managed resource.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DriftRecord {
    pub module_name: String,
    pub resource_type: String,
    pub resource_name: String,
    pub attribute_name: String,
    pub terraform_value: serde_json::Value,
    pub cloud_value: serde_json::Value,
    #[serde(default)]
    pub state_file_name: Option<String>,
    #[serde(default)]
    pub recent_actor: Option<String>,
    #[serde(default)]
    pub recent_action_timestamp: Option<String>,
}

impl DriftRecord {
    pub fn resource_path(&self) -> String {
        format!(
            "{} (module) \"{}\" \"{}\"",
            self.module_name, self.resource_type, self.resource_name
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    #[serde(alias = "created")]
    Creation,
    #[serde(alias = "modified")]
    Modification,
}

/// An out-of-band change attributed to a cloud actor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActorAction {
    pub actor: String,
    pub action: ActionKind,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_record_minimal_fields() {
        let record: ResourceRecord =
            serde_json::from_str(r#"{"type": "s3_bucket", "name": "x"}"#).unwrap();
        assert_eq!(record.resource_type, "s3_bucket");
        assert_eq!(record.name, "x");
        assert_eq!(record.region, None);
        assert_eq!(record.provider(), "s3");
    }

    #[test]
    fn test_resource_record_accepts_upstream_field_names() {
        let json = r#"{
            "ResourceType": "google_storage_bucket",
            "ResourceTerraformerName": "tfer--logs",
            "Region": "us-east1",
            "unrelated": true
        }"#;
        let record: ResourceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.resource_type, "google_storage_bucket");
        assert_eq!(record.name, "tfer--logs");
        assert_eq!(record.region.as_deref(), Some("us-east1"));
        assert_eq!(record.provider(), "google");
    }

    #[test]
    fn test_resource_record_explicit_provider_wins() {
        let record: ResourceRecord = serde_json::from_str(
            r#"{"type": "aws_instance", "name": "web", "provider": "aws-govcloud"}"#,
        )
        .unwrap();
        assert_eq!(record.provider(), "aws-govcloud");
    }

    #[test]
    fn test_resource_record_missing_type_is_error() {
        let err = serde_json::from_str::<ResourceRecord>(r#"{"name": "x"}"#).unwrap_err();
        assert!(err.to_string().contains("missing field `type`"));
    }

    #[test]
    fn test_cost_estimate_usage_based_has_no_known_cost() {
        let estimate: CostEstimate = serde_json::from_str(
            r#"{"resource_type": "aws_s3_bucket", "resource_name": "logs", "monthly_cost": 0, "is_usage_based": true}"#,
        )
        .unwrap();
        assert_eq!(estimate.known_cost(), None);
    }

    #[test]
    fn test_cost_estimate_null_cost_is_unknown() {
        let estimate: CostEstimate = serde_json::from_str(
            r#"{"resource_type": "aws_lambda_function", "resource_name": "fn", "cost_monthly": null}"#,
        )
        .unwrap();
        assert_eq!(estimate.known_cost(), None);
    }

    #[test]
    fn test_cost_estimate_priced() {
        let estimate: CostEstimate = serde_json::from_str(
            r#"{"resource_type": "aws_instance", "resource_name": "web", "monthly_cost": 12.5}"#,
        )
        .unwrap();
        assert_eq!(estimate.known_cost(), Some(12.5));
    }

    #[test]
    fn test_severity_is_case_insensitive() {
        let severity: Severity = serde_json::from_str(r#""high""#).unwrap();
        assert_eq!(severity, Severity::High);
        assert_eq!(severity.to_string(), "HIGH");
    }

    #[test]
    fn test_severity_rejects_unknown_label() {
        let err = serde_json::from_str::<Severity>(r#""urgent""#).unwrap_err();
        assert!(err.to_string().contains("unknown severity `urgent`"));
    }

    #[test]
    fn test_severity_orders_critical_first() {
        assert!(Severity::Critical < Severity::High);
        assert!(Severity::Low < Severity::Unknown);
    }

    #[test]
    fn test_drift_resource_path_format() {
        let record = DriftRecord {
            module_name: "vpc".to_string(),
            resource_type: "aws_subnet".to_string(),
            resource_name: "public-1".to_string(),
            attribute_name: "tags.Name".to_string(),
            terraform_value: serde_json::json!("a"),
            cloud_value: serde_json::json!("b"),
            state_file_name: None,
            recent_actor: None,
            recent_action_timestamp: None,
        };
        assert_eq!(record.resource_path(), r#"vpc (module) "aws_subnet" "public-1""#);
    }

    #[test]
    fn test_drift_record_requires_values() {
        let json = r#"{
            "ModuleName": "vpc",
            "ResourceType": "aws_subnet",
            "ResourceName": "public-1",
            "AttributeName": "cidr_block",
            "TerraformValue": "10.0.0.0/24"
        }"#;
        let err = serde_json::from_str::<DriftRecord>(json).unwrap_err();
        assert!(err.to_string().contains("missing field `CloudValue`"));
    }

    #[test]
    fn test_drift_record_allows_null_values() {
        let json = r#"{
            "ModuleName": "root",
            "ResourceType": "aws_s3_bucket",
            "ResourceName": "logs",
            "AttributeName": "versioning",
            "TerraformValue": null,
            "CloudValue": {"enabled": true}
        }"#;
        let record: DriftRecord = serde_json::from_str(json).unwrap();
        assert!(record.terraform_value.is_null());
        assert_eq!(record.cloud_value, serde_json::json!({"enabled": true}));
    }

    #[test]
    fn test_actor_action_aliases() {
        let action: ActorAction =
            serde_json::from_str(r#"{"actor": "ci@example.com", "action": "modified"}"#).unwrap();
        assert_eq!(action.action, ActionKind::Modification);

        let action: ActorAction = serde_json::from_str(
            r#"{"actor": "ops@example.com", "action": "creation", "timestamp": "2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(action.action, ActionKind::Creation);
        assert_eq!(action.timestamp.as_deref(), Some("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn test_actor_action_rejects_unknown_action() {
        assert!(
            serde_json::from_str::<ActorAction>(r#"{"actor": "a", "action": "deleted"}"#).is_err()
        );
    }
}
