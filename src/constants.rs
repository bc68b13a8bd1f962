//! # Constants
//!
//! Shared constants used throughout the operator.
//!
//! Timing values are defaults; `ControllerConfig` and `ServerConfig` read
//! overrides from the environment.

/// Field manager used for status patches
pub const FIELD_MANAGER: &str = "component-operator";

/// Label key applied to every derived object, valued with the component name
pub const APP_LABEL: &str = "app";

/// Suffix of the ImageStream receiving build output
pub const OUTPUT_IMAGE_STREAM_SUFFIX: &str = "-output";

/// Suffix of the ImageStream holding the s2i builder image
pub const RUNTIME_IMAGE_STREAM_SUFFIX: &str = "-runtime";

/// Suffix of the BuildConfig
pub const BUILD_CONFIG_SUFFIX: &str = "-bc";

/// Tag used on both ImageStreams
pub const DEFAULT_IMAGE_TAG: &str = "latest";

/// Git ref every BuildConfig builds from
pub const DEFAULT_GIT_REF: &str = "master";

/// Build type to s2i builder image.
pub const BUILD_TYPE_IMAGES: &[(&str, &str)] = &[("nodejs", "nodeshift/centos7-s2i-nodejs:10.x")];

/// Default HTTP server port for metrics and health probes
pub const DEFAULT_METRICS_PORT: u16 = 5000;

/// Default HTTP server startup timeout (how long to wait for server to be ready)
pub const DEFAULT_SERVER_STARTUP_TIMEOUT_SECS: u64 = 10;

/// Default HTTP server readiness poll interval
pub const DEFAULT_SERVER_POLL_INTERVAL_MS: u64 = 50;

/// Default requeue interval when the backoff state cannot be read (seconds)
pub const DEFAULT_RECONCILIATION_ERROR_REQUEUE_SECS: u64 = 60;

/// Lower bound of the Fibonacci error backoff (seconds)
pub const DEFAULT_ERROR_BACKOFF_MIN_SECS: u64 = 5;

/// Upper bound of the Fibonacci error backoff (seconds)
pub const DEFAULT_ERROR_BACKOFF_MAX_SECS: u64 = 300;

/// Default exponential backoff starting value for watch errors (milliseconds)
pub const DEFAULT_BACKOFF_START_MS: u64 = 1000;

/// Default exponential backoff maximum value for watch errors (milliseconds)
pub const DEFAULT_BACKOFF_MAX_MS: u64 = 30_000;

/// Default delay before restarting watch stream after unknown errors (seconds)
pub const DEFAULT_WATCH_RESTART_DELAY_SECS: u64 = 5;

/// Default delay before restarting watch stream after it ends (seconds)
pub const DEFAULT_WATCH_RESTART_DELAY_AFTER_END_SECS: u64 = 1;
