// Queue Domain Model

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Suffix appended to a primary queue name to derive its retry queue
pub const RETRY_QUEUE_SUFFIX: &str = "-retry";

/// Extension carried by FIFO queue names (must stay last)
pub const FIFO_EXTENSION: &str = ".fifo";

/// Logical queue identifier
///
/// Naming rules are owned by the backend; this type never validates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueueName(String);

impl QueueName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the retry queue for this queue
    ///
    /// `orders` becomes `orders-retry`; FIFO names keep their extension last,
    /// so `orders.fifo` becomes `orders-retry.fifo`. Never truncates: a
    /// derived name over the backend length limit is left for the backend
    /// to reject rather than risk colliding with another queue.
    pub fn retry_queue(&self) -> QueueName {
        match self.0.strip_suffix(FIFO_EXTENSION) {
            Some(stem) => Self(format!("{stem}{RETRY_QUEUE_SUFFIX}{FIFO_EXTENSION}")),
            None => Self(format!("{}{RETRY_QUEUE_SUFFIX}", self.0)),
        }
    }

    /// True if this name has the shape of a derived retry queue
    pub fn is_retry_queue(&self) -> bool {
        let stem = self.0.strip_suffix(FIFO_EXTENSION).unwrap_or(&self.0);
        stem.len() > RETRY_QUEUE_SUFFIX.len() && stem.ends_with(RETRY_QUEUE_SUFFIX)
    }
}

impl fmt::Display for QueueName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QueueName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for QueueName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for QueueName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Metadata for a queue provisioned outside this process
///
/// Its attributes are imported at startup instead of being created here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalQueueConfig {
    /// Account owning the queue (None = same account as this process)
    #[serde(default)]
    pub account_id: Option<String>,

    /// Region hosting the queue (None = default region)
    #[serde(default)]
    pub region: Option<String>,
}

impl ExternalQueueConfig {
    pub fn new(account_id: Option<String>, region: Option<String>) -> Self {
        Self { account_id, region }
    }
}

/// Externally-owned queues whose attributes are imported at startup
pub type ExternalQueueSet = HashMap<QueueName, ExternalQueueConfig>;
