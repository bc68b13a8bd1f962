//! # Reconciler
//!
//! Core reconciliation logic for `Component` resources.
//!
//! The reconciler:
//! - Re-fetches the Component and checks the `status.revNumber` marker
//! - Creates the output ImageStream, runtime ImageStream and BuildConfig
//! - Records the marker (or a `Failed` phase) on the status subresource
//!
//! Creation happens once per Component; changes to an already provisioned
//! Component do not touch the derived objects.

pub mod reconcile;
pub mod resources;
pub mod status;
pub mod types;

// Re-export public API
pub use reconcile::reconcile;
pub use resources::{
    build_build_config, build_output_image_stream, build_runtime_image_stream, owner_reference,
    runtime_image_for, DerivedObjects,
};
pub use status::{mark_processed, update_status_phase};
pub use types::{resource_key, BackoffState, Reconciler, ReconcilerError};
