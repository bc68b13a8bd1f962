//! Component Operator Library
//!
//! Watches `Component` resources and provisions an s2i build pipeline for
//! each one: an output ImageStream, a runtime ImageStream and a BuildConfig,
//! all owned by the Component.
//!
//! - `crd`: the `Component` custom resource
//! - `openshift`: typed ImageStream and BuildConfig objects
//! - `controller`: reconciler, backoff, HTTP server
//! - `runtime`: startup, watch loop, error policy
//! - `config`: environment-driven configuration
//! - `observability`: logging and Prometheus metrics

pub mod config;
pub mod constants;
pub mod controller;
pub mod crd;
pub mod observability;
pub mod openshift;
pub mod prelude;
pub mod runtime;
