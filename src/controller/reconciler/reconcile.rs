//! # Reconciliation Logic
//!
//! Main reconciliation loop for Component resources.
//!
//! A Component is provisioned once: when `status.revNumber` matches the
//! current resource version the three derived objects are created and the
//! marker is written. The status write itself bumps the resource version, so
//! every later event sees a mismatch and is skipped.

use crate::controller::reconciler::resources::DerivedObjects;
use crate::controller::reconciler::status::{mark_processed, update_status_phase, PHASE_FAILED};
use crate::controller::reconciler::types::{resource_key, Reconciler, ReconcilerError};
use crate::crd::Component;
use crate::observability;
use crate::openshift::{BuildConfig, ImageStream};
use kube::api::PostParams;
use kube::{Api, Resource, ResourceExt};
use kube_runtime::controller::Action;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn, Instrument};

/// Main reconciliation function
///
/// Errors are handed to the error policy, which owns the requeue backoff.
/// A successful pass clears any backoff recorded for the Component.
pub async fn reconcile(
    component: Arc<Component>,
    ctx: Arc<Reconciler>,
) -> Result<Action, ReconcilerError> {
    let start = Instant::now();
    observability::increment_reconciliations();

    let name = component.name_any();
    let namespace = component
        .namespace()
        .ok_or(ReconcilerError::MissingObjectKey(".metadata.namespace"))?;

    let span = tracing::info_span!(
        "reconcile",
        resource.name = %name,
        resource.namespace = %namespace,
        resource.kind = "Component"
    );

    let result = reconcile_internal(&ctx, &namespace, &name)
        .instrument(span)
        .await;

    observability::observe_reconciliation_duration(start.elapsed().as_secs_f64());
    if result.is_ok() {
        ctx.clear_backoff(&resource_key(&namespace, &name));
    }
    result
}

async fn reconcile_internal(
    ctx: &Reconciler,
    namespace: &str,
    name: &str,
) -> Result<Action, ReconcilerError> {
    let api: Api<Component> = Api::namespaced(ctx.client.clone(), namespace);

    // The cached object may be stale; decide on the current state
    let Some(mut component) = api.get_opt(name).await? else {
        info!("Component {}/{} no longer exists, nothing to do", namespace, name);
        return Ok(Action::await_change());
    };

    info!(
        creation_timestamp = ?component.metadata.creation_timestamp,
        resource_version = ?component.metadata.resource_version,
        generation = ?component.metadata.generation,
        deletion_timestamp = ?component.metadata.deletion_timestamp,
        "Reconciling Component {}/{}",
        namespace,
        name
    );

    let resource_version = component
        .resource_version()
        .ok_or(ReconcilerError::MissingObjectKey(".metadata.resourceVersion"))?;

    // A fresh Component has no marker yet; treat it as not processed
    let status = component.status.get_or_insert_with(Default::default);
    if status.rev_number().is_none() {
        status.rev_number = Some(resource_version.clone());
    }
    let marker = status.rev_number().map(ToString::to_string);

    if component.metadata.deletion_timestamp.is_some() {
        debug!(
            "Component {}/{} is being deleted, owned objects are garbage collected",
            namespace, name
        );
        observability::increment_components_skipped("deleting");
        return Ok(Action::await_change());
    }

    if marker.as_deref() != Some(resource_version.as_str()) {
        debug!(
            "Component {}/{} already processed (revNumber={:?}, resourceVersion={})",
            namespace, name, marker, resource_version
        );
        observability::increment_components_skipped("already_processed");
        return Ok(Action::await_change());
    }

    provision(ctx, namespace, &component, &resource_version).await?;
    Ok(Action::await_change())
}

async fn provision(
    ctx: &Reconciler,
    namespace: &str,
    component: &Component,
    resource_version: &str,
) -> Result<(), ReconcilerError> {
    let name = component.name_any();
    info!(
        "Provisioning Component {}/{} (buildType={}, codebase={})",
        namespace, name, component.spec.build_type, component.spec.codebase
    );

    let created = async {
        let objects = DerivedObjects::for_component(component)?;

        let image_streams: Api<ImageStream> = Api::namespaced(ctx.client.clone(), namespace);
        let build_configs: Api<BuildConfig> = Api::namespaced(ctx.client.clone(), namespace);

        create_owned(&image_streams, &objects.output_image_stream).await?;
        create_owned(&image_streams, &objects.runtime_image_stream).await?;
        create_owned(&build_configs, &objects.build_config).await?;
        Ok::<(), ReconcilerError>(())
    }
    .await;

    if let Err(e) = created {
        error!("Provisioning failed for Component {}/{}: {}", namespace, name, e);
        let message = format!("Provisioning failed: {e}");
        if let Err(status_err) =
            update_status_phase(ctx, component, PHASE_FAILED, Some(&message)).await
        {
            warn!(
                "Failed to record Failed status for Component {}/{}: {}",
                namespace, name, status_err
            );
        }
        return Err(e);
    }

    mark_processed(ctx, component, resource_version).await?;
    info!(
        "Component {}/{} provisioned at resourceVersion {}",
        namespace, name, resource_version
    );
    Ok(())
}

/// Create one derived object, counting the outcome by kind
///
/// "Already exists" is treated like any other API error.
async fn create_owned<K>(api: &Api<K>, object: &K) -> Result<(), ReconcilerError>
where
    K: Resource<DynamicType = ()> + Clone + DeserializeOwned + Serialize + Debug,
{
    let kind = K::kind(&());
    let object_name = object.meta().name.as_deref().unwrap_or_default();

    match api.create(&PostParams::default(), object).await {
        Ok(_) => {
            observability::increment_resources_created(&kind);
            info!("Created {} {}", kind, object_name);
            Ok(())
        }
        Err(e) => {
            observability::increment_resource_creation_errors(&kind);
            error!("Failed to create {} {}: {}", kind, object_name, e);
            Err(e.into())
        }
    }
}
