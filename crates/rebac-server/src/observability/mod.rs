//! Observability infrastructure for the rebac tool.
//!
//! Engine crates only emit `tracing` events; this module decides where they go.

mod logging;

pub use logging::{create_json_layer, init_logging, LoggingConfig};
