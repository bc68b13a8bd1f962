//! # Component Operator
//!
//! Kubernetes operator that provisions OpenShift ImageStreams and a
//! BuildConfig for every `Component` resource.
//!
//! ## Overview
//!
//! 1. **Watches** `Component` resources (all namespaces, or `WATCH_NAMESPACE`)
//! 2. **Provisions** `<name>-output` and `<name>-runtime` ImageStreams and a
//!    `<name>-bc` BuildConfig on first reconciliation
//! 3. **Records** the processed resource version in `status.revNumber`
//!
//! Derived objects are owned by the Component and garbage collected with it.

use anyhow::Result;
use component_operator::runtime::{initialize, run_watch_loop};

#[tokio::main]
async fn main() -> Result<()> {
    let init = initialize().await?;
    run_watch_loop(init.components, init.reconciler, init.server_state).await
}
