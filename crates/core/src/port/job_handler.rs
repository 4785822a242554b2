// Job Handler Port
// Implemented by application code, invoked only by a JobConsumer

use crate::domain::JobMessage;
use async_trait::async_trait;
use thiserror::Error;

/// Failure signal returned by a handler
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// Processing failed; the consumer decides what happens to the message
    #[error("Job failed: {0}")]
    Failed(String),

    /// Message could not be understood
    #[error("Invalid message: {0}")]
    InvalidMessage(String),
}

/// Job Handler trait
///
/// Handles exactly one message per call.
#[async_trait]
pub trait JobHandler: Send + Sync {
    /// Stable handler name used in logs and configuration errors
    fn name(&self) -> &str;

    /// Handle one message
    async fn handle_job(&self, message: JobMessage) -> Result<(), HandlerError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Handler that records every message it receives
    pub struct RecordingHandler {
        name: String,
        failure: Option<HandlerError>,
        received: Arc<Mutex<Vec<JobMessage>>>,
    }

    impl RecordingHandler {
        pub fn new(name: impl Into<String>) -> Self {
            Self {
                name: name.into(),
                failure: None,
                received: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Handler that records the message and then fails with `error`
        pub fn new_failing(name: impl Into<String>, error: HandlerError) -> Self {
            Self {
                failure: Some(error),
                ..Self::new(name)
            }
        }

        pub fn received(&self) -> Vec<JobMessage> {
            self.received.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.received.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl JobHandler for RecordingHandler {
        fn name(&self) -> &str {
            &self.name
        }

        async fn handle_job(&self, message: JobMessage) -> Result<(), HandlerError> {
            self.received.lock().unwrap().push(message);
            match &self.failure {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }
}
