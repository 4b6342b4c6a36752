//! rebac binary
//!
//! # Usage
//!
//! ```bash
//! # With config file
//! rebac --config rebac.yaml put role:admin member user:alice
//!
//! # With environment variables only
//! REBAC_STORAGE__BACKEND=rocksdb REBAC_STORAGE__DATA_PATH=/var/lib/rebac rebac count
//! ```

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use rebac_server::cli::{ensure_durable, execute, Cli};
use rebac_server::observability::{init_logging, LoggingConfig};
use rebac_server::{open_store, ServerConfig};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::from_env()?,
    };

    init_logging(LoggingConfig::from_settings(&config.logging));
    debug!(version = env!("CARGO_PKG_VERSION"), command = ?cli.command, "starting rebac");

    ensure_durable(&cli.command, &config.storage)?;
    let store = open_store(&config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let answer = execute(&cli.command, &store, &mut out)?;
    out.flush()?;

    Ok(if answer {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
