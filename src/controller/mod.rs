//! # Controller
//!
//! Core controller modules for the Component operator.
//!
//! - `backoff`: Fibonacci backoff for error requeues
//! - `reconciler`: Core reconciliation logic
//! - `server`: HTTP server for metrics and health checks

pub mod backoff;
pub mod reconciler;
pub mod server;
