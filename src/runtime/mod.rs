//! # Runtime
//!
//! Operator startup, the watch loop, and the error policy applied to failed
//! reconciliations and watch stream errors.

pub mod error_policy;
pub mod initialization;
pub mod watch_loop;

pub use error_policy::{
    handle_controller_error, handle_reconciliation_error, handle_watch_stream_error,
};
pub use initialization::{initialize, InitializationResult};
pub use watch_loop::run_watch_loop;
