//! # Status Updates
//!
//! Status subresource writes for Component resources. Both writes are JSON
//! merge patches, so fields left out of the patch (notably `revNumber` on a
//! failure) keep their stored value.

use crate::constants::FIELD_MANAGER;
use crate::controller::reconciler::types::{Reconciler, ReconcilerError};
use crate::crd::{Component, ComponentStatus, Condition};
use kube::api::{Patch, PatchParams};
use kube::{Api, ResourceExt};
use tracing::debug;

pub const PHASE_PENDING: &str = "Pending";
pub const PHASE_PROVISIONING: &str = "Provisioning";
pub const PHASE_READY: &str = "Ready";
pub const PHASE_FAILED: &str = "Failed";

fn ready_condition(phase: &str, message: Option<&str>) -> Condition {
    let (status, reason) = match phase {
        PHASE_READY => ("True", "ProvisioningSucceeded"),
        PHASE_FAILED => ("False", "ProvisioningFailed"),
        _ => ("False", "ProvisioningInProgress"),
    };

    Condition {
        r#type: "Ready".to_string(),
        status: status.to_string(),
        last_transition_time: Some(chrono::Utc::now().to_rfc3339()),
        reason: Some(reason.to_string()),
        message: message.map(ToString::to_string),
    }
}

async fn patch_status(
    reconciler: &Reconciler,
    component: &Component,
    status: &ComponentStatus,
) -> Result<(), ReconcilerError> {
    let namespace = component
        .namespace()
        .ok_or(ReconcilerError::MissingObjectKey(".metadata.namespace"))?;
    let api: Api<Component> = Api::namespaced(reconciler.client.clone(), &namespace);

    let patch = serde_json::json!({ "status": status });
    api.patch_status(
        &component.name_any(),
        &PatchParams::apply(FIELD_MANAGER),
        &Patch::Merge(patch),
    )
    .await?;

    Ok(())
}

/// Update status phase and description
///
/// Skipped when neither changed, so repeated failures do not generate a
/// stream of watch events.
pub async fn update_status_phase(
    reconciler: &Reconciler,
    component: &Component,
    phase: &str,
    message: Option<&str>,
) -> Result<(), ReconcilerError> {
    let current = component.status.as_ref();
    let current_phase = current.and_then(|s| s.phase.as_deref());
    let current_description = current.and_then(|s| s.description.as_deref());

    if current_phase == Some(phase) && current_description == message {
        debug!(
            "Skipping status update - phase and description unchanged: phase={:?}, description={:?}",
            phase, message
        );
        return Ok(());
    }

    let status = ComponentStatus {
        rev_number: None,
        phase: Some(phase.to_string()),
        description: message.map(ToString::to_string),
        conditions: vec![ready_condition(phase, message)],
        observed_generation: component.metadata.generation,
        last_reconcile_time: Some(chrono::Utc::now().to_rfc3339()),
    };

    patch_status(reconciler, component, &status).await
}

/// Persist the processed marker after the derived objects were created
///
/// `rev` is the resource version provisioning ran against. Writing the
/// status moves the stored resource version past it, which is what makes
/// later reconciles skip creation.
pub async fn mark_processed(
    reconciler: &Reconciler,
    component: &Component,
    rev: &str,
) -> Result<(), ReconcilerError> {
    let message = format!("Provisioned ImageStreams and BuildConfig for revision {rev}");
    let status = ComponentStatus {
        rev_number: Some(rev.to_string()),
        phase: Some(PHASE_READY.to_string()),
        description: Some(message.clone()),
        conditions: vec![ready_condition(PHASE_READY, Some(&message))],
        observed_generation: component.metadata.generation,
        last_reconcile_time: Some(chrono::Utc::now().to_rfc3339()),
    };

    patch_status(reconciler, component, &status).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_condition_by_phase() {
        let ready = ready_condition(PHASE_READY, Some("done"));
        assert_eq!(ready.r#type, "Ready");
        assert_eq!(ready.status, "True");
        assert_eq!(ready.reason.as_deref(), Some("ProvisioningSucceeded"));
        assert_eq!(ready.message.as_deref(), Some("done"));

        let failed = ready_condition(PHASE_FAILED, None);
        assert_eq!(failed.status, "False");
        assert_eq!(failed.reason.as_deref(), Some("ProvisioningFailed"));
        assert!(failed.message.is_none());

        let pending = ready_condition(PHASE_PENDING, None);
        assert_eq!(pending.reason.as_deref(), Some("ProvisioningInProgress"));
        let provisioning = ready_condition(PHASE_PROVISIONING, None);
        assert_eq!(provisioning.reason.as_deref(), Some("ProvisioningInProgress"));
    }

    #[test]
    fn test_failure_status_leaves_marker_out_of_patch() {
        let status = ComponentStatus {
            phase: Some(PHASE_FAILED.to_string()),
            ..ComponentStatus::default()
        };
        let patch = serde_json::json!({ "status": status });
        assert!(patch["status"].get("revNumber").is_none());
        assert_eq!(patch["status"]["phase"], "Failed");
    }
}
