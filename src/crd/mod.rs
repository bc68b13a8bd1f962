//! # Custom Resource Definitions
//!
//! CRD types owned by the operator.
//!
//! - `spec.rs` - The `Component` resource and its spec
//! - `status.rs` - Status types for tracking provisioning state

mod spec;
mod status;

pub use spec::{Component, ComponentSpec};
pub use status::{ComponentStatus, Condition};
