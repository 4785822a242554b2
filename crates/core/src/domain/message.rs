// Job Message Domain Model

use super::QueueName;
use serde::{Deserialize, Serialize};

/// Backend-assigned message identifier
pub type MessageId = String;

/// A single message handed to a job handler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMessage {
    pub id: MessageId,
    /// Queue the message was received from (primary or retry)
    pub queue: QueueName,
    pub body: serde_json::Value,
}

impl JobMessage {
    pub fn new(id: impl Into<MessageId>, queue: QueueName, body: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            queue,
            body,
        }
    }
}
