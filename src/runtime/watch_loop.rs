//! # Watch Loop
//!
//! Controller watch loop that monitors Component resources and triggers
//! reconciliation when changes are detected.

use crate::config::ControllerConfig;
use crate::controller::reconciler::{reconcile, Reconciler};
use crate::controller::server::ServerState;
use crate::crd::Component;
use crate::runtime::error_policy::{handle_controller_error, handle_reconciliation_error};
use futures::StreamExt;
use kube::api::Api;
use kube_runtime::{watcher, Controller};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn, Instrument};

/// Run the controller watch loop
///
/// Watches Component resources only; the derived objects are not watched.
/// The controller is restarted whenever its stream ends, until a shutdown
/// signal marks the server as not ready.
pub async fn run_watch_loop(
    components: Api<Component>,
    reconciler: Arc<Reconciler>,
    server_state: Arc<ServerState>,
) -> Result<(), anyhow::Error> {
    let config: ControllerConfig = reconciler.config.clone();
    let backoff_duration_ms = Arc::new(AtomicU64::new(config.backoff_start_ms));

    // Kubernetes sends SIGTERM, manual runs SIGINT
    let shutdown_server_state = Arc::clone(&server_state);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for shutdown signal: {}", e);
            return;
        }
        info!("Received shutdown signal (SIGINT/SIGTERM), initiating graceful shutdown...");
        shutdown_server_state.set_ready(false);
        info!("Marked server as not ready, waiting for in-flight reconciliations to complete...");
    });

    loop {
        if !server_state.is_ready() {
            info!("Shutdown requested, exiting watch loop");
            break;
        }

        let backoff = Arc::clone(&backoff_duration_ms);
        let backoff_start_ms = config.backoff_start_ms;
        let backoff_max_ms = config.backoff_max_ms;
        let watch_restart_delay = config.watch_restart_delay_duration();

        info!("Starting controller watch loop...");
        Controller::new(components.clone(), watcher::Config::default().any_semantic())
            .shutdown_on_signal()
            .run(reconcile, handle_reconciliation_error, Arc::clone(&reconciler))
            .filter_map(move |x| {
                let backoff = Arc::clone(&backoff);
                async move {
                    match &x {
                        Ok((object, action)) => {
                            backoff.store(backoff_start_ms, Ordering::Relaxed);
                            debug!(
                                resource.name = %object.name,
                                resource.namespace = ?object.namespace,
                                action = ?action,
                                "watch.event.reconciled"
                            );
                            Some(x)
                        }
                        Err(e) => handle_controller_error(
                            e,
                            &backoff,
                            backoff_max_ms,
                            watch_restart_delay,
                        )
                        .await
                        .map(|()| x),
                    }
                }
            })
            .for_each(|_| futures::future::ready(()))
            .instrument(tracing::info_span!("controller.watch", operation = "watch_loop"))
            .await;

        if !server_state.is_ready() {
            info!("Shutdown requested, exiting watch loop");
            break;
        }

        let delay = config.watch_restart_delay_after_end_duration();
        warn!(
            "Controller watch stream ended, restarting in {} seconds...",
            delay.as_secs()
        );
        tokio::time::sleep(delay).await;
    }

    info!("Controller stopped gracefully");
    Ok(())
}
