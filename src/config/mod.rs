//! # Configuration
//!
//! Operator settings read from the environment at startup.
//!
//! - `controller`: reconcile backoff, watch restart, logging and namespace settings
//! - `server`: metrics/probe HTTP server settings

pub mod controller;
pub mod server;

pub use controller::ControllerConfig;
pub use server::ServerConfig;
