//! Configuration management for the rebac tool.
//!
//! Configuration is assembled from three layers:
//! 1. Default values (hardcoded)
//! 2. Configuration file (YAML)
//! 3. Environment variables (override)
//!
//! Environment variables take precedence over config file values, which take
//! precedence over defaults.
//!
//! # Example
//!
//! ```ignore
//! use rebac_server::config::ServerConfig;
//!
//! // Load from file with env overrides
//! let config = ServerConfig::load("rebac.yaml")?;
//!
//! // Or load from environment only
//! let config = ServerConfig::from_env()?;
//! ```

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of environment overrides, e.g. `REBAC_STORAGE__BACKEND`.
pub const ENV_PREFIX: &str = "REBAC";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ServerConfig {
    /// Storage settings
    #[serde(default)]
    pub storage: StorageSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Role membership resolvers registered at startup, in order.
    #[serde(default = "default_resolvers")]
    pub resolvers: Vec<ResolverSettings>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            storage: StorageSettings::default(),
            logging: LoggingSettings::default(),
            resolvers: default_resolvers(),
        }
    }
}

/// Blob store backend settings.
///
/// ```yaml
/// storage:
///   backend: rocksdb
///   data_path: /var/lib/rebac
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StorageSettings {
    /// Storage backend type: "memory" or "rocksdb"
    #[serde(default = "default_storage_backend")]
    pub backend: String,

    /// Data directory path (required if backend is "rocksdb")
    pub data_path: Option<String>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            data_path: None,
        }
    }
}

fn default_storage_backend() -> String {
    "memory".to_string()
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Use JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// One `SourceMemberResolver` registration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Namespace of the subjects being checked.
    pub subject_namespace: String,
    /// Namespace of the roles they are members of.
    pub role_namespace: String,
}

impl ResolverSettings {
    pub fn new(subject_namespace: impl Into<String>, role_namespace: impl Into<String>) -> Self {
        Self {
            subject_namespace: subject_namespace.into(),
            role_namespace: role_namespace.into(),
        }
    }
}

fn default_resolvers() -> Vec<ResolverSettings> {
    vec![ResolverSettings::new("user", "role")]
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ConfigError),

    #[error("configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

impl ServerConfig {
    /// Load configuration from a YAML file with environment variable overrides.
    ///
    /// Environment variables are prefixed with `REBAC_` and use `__` as separator:
    /// - `REBAC_STORAGE__BACKEND=rocksdb` overrides `storage.backend`
    /// - `REBAC_LOGGING__LEVEL=debug` overrides `logging.level`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigLoadError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let config = Config::builder()
            .add_source(Config::try_from(&ServerConfig::default())?)
            .add_source(File::from(path).format(FileFormat::Yaml))
            .add_source(environment())
            .build()?;

        let server_config: ServerConfig = config.try_deserialize()?;
        server_config.validate()?;

        Ok(server_config)
    }

    /// Load configuration from environment variables only.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        let config = Config::builder()
            .add_source(Config::try_from(&ServerConfig::default())?)
            .add_source(environment())
            .build()?;

        let server_config: ServerConfig = config.try_deserialize()?;
        server_config.validate()?;

        Ok(server_config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        let valid_backends = ["memory", "rocksdb"];
        if !valid_backends.contains(&self.storage.backend.as_str()) {
            return Err(ConfigLoadError::Invalid {
                message: format!(
                    "storage.backend must be one of: {:?}, got: {}",
                    valid_backends, self.storage.backend
                ),
            });
        }

        if self.storage.backend == "rocksdb"
            && self
                .storage
                .data_path
                .as_deref()
                .map_or(true, |s| s.trim().is_empty())
        {
            return Err(ConfigLoadError::Invalid {
                message: "storage.data_path is required when backend is 'rocksdb'".to_string(),
            });
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigLoadError::Invalid {
                message: format!(
                    "logging.level must be one of: {:?}, got: {}",
                    valid_levels, self.logging.level
                ),
            });
        }

        for (i, resolver) in self.resolvers.iter().enumerate() {
            if resolver.subject_namespace.is_empty() || resolver.role_namespace.is_empty() {
                return Err(ConfigLoadError::Invalid {
                    message: format!("resolvers[{i}] must name both namespaces"),
                });
            }
        }

        Ok(())
    }
}

// REBAC_STORAGE__DATA_PATH -> storage.data_path
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}
