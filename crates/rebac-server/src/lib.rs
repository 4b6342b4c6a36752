//! rebac-server: configuration, logging and the `rebac` command line
//!
//! The engine crates know nothing about where their configuration comes from
//! or where their logs go. This crate wires them together:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               rebac-server                   │
//! ├─────────────────────────────────────────────┤
//! │  config.rs        - Layered configuration   │
//! │  observability/   - tracing subscriber      │
//! │  bootstrap.rs     - Store construction      │
//! │  cli.rs           - Admin commands          │
//! └─────────────────────────────────────────────┘
//! ```

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod observability;

// Re-exports for convenience
pub use bootstrap::{open_store, BootstrapError};
pub use config::{ConfigLoadError, ServerConfig};
