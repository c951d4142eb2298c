//! Shared plumbing for the Tribes relay services
//!
//! - `environment`: NODE_ENV handling and production redaction
//! - `telemetry`: tracing subscriber setup
//! - `metrics`: Prometheus request metrics middleware and `/metrics` handler

pub mod environment;
pub mod metrics;
pub mod telemetry;

pub use environment::{load_dotenv, port_from_env, Environment, REDACTED_DETAIL};
pub use metrics::{serve_metrics, MetricsMiddleware};
pub use telemetry::init_tracing;
