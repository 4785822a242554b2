//! Daemon settings
//!
//! Layered with the `config` crate: an optional TOML file, overridden by
//! `CONVEYOR__*` environment variables.
//!
//! ```toml
//! handlers = ["orders", "emails"]
//! provision_queues = true
//!
//! [[external_queues]]
//! name = "LegacyOrders"
//! account_id = "123456789012"
//! region = "us-west-2"
//! ```
//!
//! Queue names are carried as values, never as table keys: the `config`
//! crate lowercases keys, which would change the queue's identity.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use conveyor_core::domain::{ExternalQueueConfig, ExternalQueueSet, QueueName};
use serde::Deserialize;

use crate::constants::{ENV_LIST_SEPARATOR, ENV_PREFIX, ENV_SEPARATOR};

#[derive(Debug, Clone, Deserialize)]
pub struct DaemonConfig {
    /// Queues served by the built-in logging handler (retry queues are implied)
    #[serde(default)]
    pub handlers: Vec<String>,

    /// Queues owned elsewhere whose attributes are imported at startup
    #[serde(default)]
    pub external_queues: Vec<ExternalQueueEntry>,

    /// Create every configured queue in the in-memory backend before startup
    #[serde(default = "default_provision_queues")]
    pub provision_queues: bool,
}

fn default_provision_queues() -> bool {
    true
}

/// One `[[external_queues]]` table
#[derive(Debug, Clone, Deserialize)]
pub struct ExternalQueueEntry {
    pub name: String,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

impl DaemonConfig {
    /// Load from `path` (missing file is fine) plus environment overrides
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        Self::from_builder(
            Config::builder().add_source(File::new(path, FileFormat::Toml).required(false)),
        )
    }

    #[cfg(test)]
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Self::from_builder(Config::builder().add_source(File::from_str(contents, FileFormat::Toml)))
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .list_separator(ENV_LIST_SEPARATOR)
                    .with_list_parse_key("handlers")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn handler_queues(&self) -> Vec<QueueName> {
        self.handlers.iter().map(QueueName::new).collect()
    }

    pub fn external_queue_set(&self) -> ExternalQueueSet {
        self.external_queues
            .iter()
            .map(|entry| {
                (
                    QueueName::new(&entry.name),
                    ExternalQueueConfig::new(entry.account_id.clone(), entry.region.clone()),
                )
            })
            .collect()
    }
}
