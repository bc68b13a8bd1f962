//! # Component Status
//!
//! Status types for tracking provisioning state and conditions.

use serde::{Deserialize, Serialize};

/// Status of the Component resource
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComponentStatus {
    /// Resource version the derived objects were provisioned for
    /// Empty until provisioning has succeeded once
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rev_number: Option<String>,
    /// Current phase
    /// Values: Pending, Provisioning, Ready, Failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    /// Human-readable description of the current state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Conditions represent the latest available observations
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Generation observed by the last status write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
    /// Last reconciliation time (RFC3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reconcile_time: Option<String>,
}

impl ComponentStatus {
    /// The processed marker, treating an empty string like an unset field
    pub fn rev_number(&self) -> Option<&str> {
        self.rev_number.as_deref().filter(|rev| !rev.is_empty())
    }
}

/// Condition represents a condition of a resource
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of condition
    pub r#type: String,
    /// Status of the condition (True, False, Unknown)
    pub status: String,
    /// Last transition time
    #[serde(default)]
    pub last_transition_time: Option<String>,
    /// Reason for the condition
    #[serde(default)]
    pub reason: Option<String>,
    /// Message describing the condition
    #[serde(default)]
    pub message: Option<String>,
}
