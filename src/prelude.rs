//! # Prelude
//!
//! Re-exports commonly used types for convenience.
//!
//! ```rust
//! use component_operator::prelude::*;
//! ```

pub use crate::crd::*;

pub use crate::openshift::{BuildConfig, BuildConfigSpec, ImageStream, ImageStreamSpec};

pub use crate::controller::reconciler::{reconcile, DerivedObjects, Reconciler, ReconcilerError};

pub use crate::config::{ControllerConfig, ServerConfig};
