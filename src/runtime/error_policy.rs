//! # Error Policy
//!
//! Error handling and backoff logic for the controller watch loop.
//! This module handles reconciliation errors and watch stream errors.

use crate::controller::reconciler::{resource_key, BackoffState, Reconciler, ReconcilerError};
use crate::crd::Component;
use crate::observability;
use kube::ResourceExt;
use kube_runtime::controller::{self, Action};
use kube_runtime::watcher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Handle reconciliation errors with Fibonacci backoff
///
/// Backoff state is tracked per Component so one failing resource does not
/// slow down the others. The bounds come from `ControllerConfig`.
pub fn handle_reconciliation_error(
    obj: Arc<Component>,
    error: &ReconcilerError,
    ctx: Arc<Reconciler>,
) -> Action {
    let name = obj.name_any();
    let namespace = obj.namespace().unwrap_or_default();

    let error_span = tracing::error_span!(
        "controller.watch.reconciliation_error",
        resource.name = %name,
        resource.namespace = %namespace,
        error = %error
    );
    let _error_guard = error_span.enter();

    error!("Reconciliation error for {}/{}: {:?}", namespace, name, error);
    observability::increment_reconciliation_errors();

    let key = resource_key(&namespace, &name);
    let (backoff, error_count) = match ctx.backoff_states.lock() {
        Ok(mut states) => {
            let state = states.entry(key).or_insert_with(|| {
                BackoffState::new(
                    ctx.config.error_backoff_min_secs,
                    ctx.config.error_backoff_max_secs,
                )
            });
            state.increment_error();
            (
                Duration::from_secs(state.backoff.next_backoff_seconds()),
                state.error_count,
            )
        }
        Err(e) => {
            warn!("Failed to lock backoff_states: {}, using default requeue", e);
            (ctx.config.reconciliation_error_requeue_duration(), 0)
        }
    };

    let next_trigger_time = chrono::Utc::now()
        + chrono::Duration::seconds(i64::try_from(backoff.as_secs()).unwrap_or(i64::MAX));
    info!(
        "Retrying with Fibonacci backoff: {}s (error count: {}), next attempt at {}",
        backoff.as_secs(),
        error_count,
        next_trigger_time.to_rfc3339()
    );

    observability::increment_requeues_total("error-backoff");
    Action::requeue(backoff)
}

/// Classification of a watch stream error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchErrorKind {
    Unauthorized,
    Expired,
    TooManyRequests,
    NotFound,
    Other,
}

impl WatchErrorKind {
    /// Classify from the error's debug rendering
    ///
    /// 404 is checked before 401: a plain-text 404 surfaces as a serde error
    /// wrapped in `WatchFailed`, which would otherwise look like an auth error.
    pub fn classify(error_string: &str) -> Self {
        let is_not_found = error_string.contains("ObjectNotFound")
            || error_string.contains("404")
            || error_string.contains("not found");
        let is_401 = (error_string.contains("401") || error_string.contains("Unauthorized"))
            && !is_not_found;
        let is_410 = error_string.contains("410")
            || error_string.contains("too old resource version")
            || error_string.contains("Expired")
            || error_string.contains("Gone");
        let is_429 = error_string.contains("429")
            || error_string.contains("storage is (re)initializing")
            || error_string.contains("TooManyRequests");

        if is_401 {
            Self::Unauthorized
        } else if is_410 {
            Self::Expired
        } else if is_429 {
            Self::TooManyRequests
        } else if is_not_found {
            Self::NotFound
        } else {
            Self::Other
        }
    }
}

/// Handle an error item from the controller stream
///
/// A failed reconcile was already requeued by the error policy, so it passes
/// straight through. Everything else is a watch problem.
pub async fn handle_controller_error(
    error: &controller::Error<ReconcilerError, watcher::Error>,
    backoff: &Arc<AtomicU64>,
    max_backoff_ms: u64,
    watch_restart_delay: Duration,
) -> Option<()> {
    if let controller::Error::ReconcilerFailed(err, object) = error {
        debug!(
            resource.name = %object.name,
            resource.namespace = ?object.namespace,
            error = %err,
            "watch.event.reconcile_failed"
        );
        return Some(());
    }

    let error_string = format!("{error:?}");
    handle_watch_stream_error(&error_string, backoff, max_backoff_ms, watch_restart_delay).await
}

/// Handle watch stream errors with appropriate classification and backoff
///
/// Returns `None` to filter out the error (allow restart) or `Some(())` to continue.
pub async fn handle_watch_stream_error(
    error_string: &str,
    backoff: &Arc<AtomicU64>,
    max_backoff_ms: u64,
    watch_restart_delay: Duration,
) -> Option<()> {
    let kind = WatchErrorKind::classify(error_string);
    warn!(error = %error_string, kind = ?kind, "controller.watch.error");

    match kind {
        WatchErrorKind::Unauthorized => {
            error!("Watch authentication failed (401 Unauthorized) - RBAC may have been revoked or token expired");
            error!("   Verify the operator ServiceAccount can still list components:");
            error!("      oc auth can-i list components.devopsconsole.openshift.io --as=system:serviceaccount:<namespace>:component-operator --all-namespaces");
            warn!(
                "Waiting {}s before retrying watch (RBAC may need time to propagate)...",
                watch_restart_delay.as_secs()
            );
            tokio::time::sleep(watch_restart_delay).await;
            None
        }
        WatchErrorKind::Expired => {
            warn!("Watch resource version expired (410), watch will restart");
            None
        }
        WatchErrorKind::TooManyRequests => {
            let current_backoff = backoff.load(Ordering::Relaxed);
            warn!(
                "API server storage reinitializing (429), backing off for {}ms before restart...",
                current_backoff
            );
            tokio::time::sleep(Duration::from_millis(current_backoff)).await;
            backoff.store(
                current_backoff.saturating_mul(2).min(max_backoff_ms),
                Ordering::Relaxed,
            );
            None
        }
        WatchErrorKind::NotFound => {
            warn!(
                "Resource not found (404) - the Component was deleted or the CRD is missing. Error: {}",
                error_string
            );
            Some(())
        }
        WatchErrorKind::Other => {
            error!("Controller stream error: {}", error_string);
            tokio::time::sleep(watch_restart_delay).await;
            None
        }
    }
}
