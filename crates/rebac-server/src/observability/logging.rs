//! Structured logging configuration.
//!
//! Log output goes to stderr so that command output on stdout stays parseable.
//! When JSON formatting is enabled, each event is one JSON object per line:
//!
//! ```json
//! {"timestamp":"2026-01-15T10:30:00.000Z","level":"INFO","target":"rebac_domain::store","fields":{"message":"replayed persisted triples","triples":42}}
//! ```

use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::config::LoggingSettings;

/// Configuration for structured logging.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Whether to use JSON format (true) or text format (false)
    pub json_format: bool,
    /// The default log level if RUST_LOG is not set
    pub default_level: Level,
    /// Whether to include span events (enter/exit)
    pub include_spans: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            json_format: false,
            default_level: Level::WARN,
            include_spans: false,
        }
    }
}

impl LoggingConfig {
    /// JSON output.
    pub fn json() -> Self {
        Self {
            json_format: true,
            ..Default::default()
        }
    }

    /// Human readable output.
    pub fn text() -> Self {
        Self {
            json_format: false,
            ..Default::default()
        }
    }

    /// Builds the subscriber settings from validated configuration.
    ///
    /// An unparseable level falls back to the default.
    pub fn from_settings(settings: &LoggingSettings) -> Self {
        let base = if settings.json { Self::json() } else { Self::text() };
        match Level::from_str(&settings.level) {
            Ok(level) => base.with_level(level),
            Err(_) => base,
        }
    }

    /// Set the default log level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    /// Include span events in the output.
    pub fn with_spans(mut self) -> Self {
        self.include_spans = true;
        self
    }
}

/// Installs the global subscriber.
///
/// Returns false if a subscriber was already installed, in which case the
/// existing one is kept.
pub fn init_logging(config: LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_level.to_string()));

    let span_events = if config.include_spans {
        FmtSpan::ENTER | FmtSpan::EXIT
    } else {
        FmtSpan::NONE
    };

    if config.json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_span_events(span_events)
                    .with_current_span(true)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .try_init()
            .is_ok()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_span_events(span_events)
                    .with_target(true),
            )
            .try_init()
            .is_ok()
    }
}

/// Creates a JSON subscriber writing to `writer`, for capturing log output.
pub fn create_json_layer<W>(writer: W) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(EnvFilter::new("trace"))
        .with(
            fmt::layer()
                .json()
                .with_writer(writer)
                .with_target(true)
                .with_current_span(true),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use rebac_domain::model::{Entity, Triple};
    use rebac_domain::TripleStore;
    use rebac_storage::MemoryBlobStore;

    /// A writer that captures output to a shared buffer.
    #[derive(Clone)]
    struct CaptureWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl CaptureWriter {
        fn new() -> Self {
            Self {
                buffer: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn get_output(&self) -> String {
            let buffer = self.buffer.lock().unwrap();
            String::from_utf8_lossy(&buffer).to_string()
        }
    }

    impl std::io::Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            let mut buffer = self.buffer.lock().unwrap();
            buffer.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CaptureWriter {
        type Writer = CaptureWriter;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(!config.json_format);
        assert_eq!(config.default_level, Level::WARN);
        assert!(!config.include_spans);
        assert!(LoggingConfig::default().with_spans().include_spans);
    }

    #[test]
    fn test_logging_config_from_settings() {
        let settings = LoggingSettings {
            level: "debug".to_string(),
            json: true,
        };
        let config = LoggingConfig::from_settings(&settings);
        assert!(config.json_format);
        assert_eq!(config.default_level, Level::DEBUG);

        let settings = LoggingSettings {
            level: "INFO".to_string(),
            json: false,
        };
        let config = LoggingConfig::from_settings(&settings);
        assert!(!config.json_format);
        assert_eq!(config.default_level, Level::INFO);
    }

    /// Store events come out as JSON lines with level and target.
    #[test]
    fn test_store_events_are_json_formatted() {
        let writer = CaptureWriter::new();
        let subscriber = create_json_layer(writer.clone());

        tracing::subscriber::with_default(subscriber, || {
            let store = TripleStore::open(MemoryBlobStore::new_shared()).unwrap();
            store
                .put(&Triple::new(
                    Entity::new("role", "admin"),
                    "owner",
                    Entity::new("document", "readme"),
                ))
                .unwrap();
        });

        let output = writer.get_output();
        assert!(!output.is_empty(), "Should have captured log output");

        let mut targets = Vec::new();
        for line in output.lines().filter(|l| !l.is_empty()) {
            let json: serde_json::Value = serde_json::from_str(line)
                .unwrap_or_else(|e| panic!("Log line should be valid JSON: {line} ({e})"));
            assert!(json.get("level").is_some());
            if let Some(target) = json.get("target").and_then(|t| t.as_str()) {
                targets.push(target.to_string());
            }
        }
        assert!(targets.iter().any(|t| t.starts_with("rebac_domain")));
    }
}
