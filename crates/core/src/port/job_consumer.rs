// Job Consumer Port
// Abstraction over the backend consumption engine (polling, dispatch, acks)

use crate::domain::QueueName;
use crate::port::JobHandler;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Subscription errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubscribeError {
    #[error("Queue not found: {0}")]
    QueueNotFound(QueueName),

    #[error("Permission denied for queue {queue}: {reason}")]
    PermissionDenied { queue: QueueName, reason: String },

    #[error("Queue {0} already has a subscriber")]
    AlreadySubscribed(QueueName),

    #[error("Backend error for queue {queue}: {reason}")]
    Backend { queue: QueueName, reason: String },
}

/// Job Consumer trait
///
/// Implementations:
/// - MemoryQueueBackend: in-process dispatch (conveyor-infra-memory)
#[async_trait]
pub trait JobConsumer: Send + Sync {
    /// Begin delivering messages from `queue` to `handler`
    ///
    /// Registers the intent to consume and returns without waiting for
    /// messages; delivery runs in the consumer's own tasks.
    ///
    /// # Errors
    /// - SubscribeError::QueueNotFound if the backend has no such queue
    /// - SubscribeError::PermissionDenied if access is refused
    async fn subscribe(
        &self,
        queue: &QueueName,
        handler: Arc<dyn JobHandler>,
    ) -> Result<(), SubscribeError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// Mock consumer recording every subscribe call
    pub struct MockJobConsumer {
        subscriptions: Arc<Mutex<Vec<(QueueName, String)>>>,
        fail_on: Option<QueueName>,
    }

    impl MockJobConsumer {
        pub fn new() -> Self {
            Self {
                subscriptions: Arc::new(Mutex::new(Vec::new())),
                fail_on: None,
            }
        }

        /// Consumer rejecting `queue` with QueueNotFound
        pub fn new_failing_on(queue: impl Into<QueueName>) -> Self {
            Self {
                fail_on: Some(queue.into()),
                ..Self::new()
            }
        }

        /// (queue, handler name) pairs in call order, including the failed call
        pub fn subscriptions(&self) -> Vec<(QueueName, String)> {
            self.subscriptions.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.subscriptions.lock().unwrap().len()
        }
    }

    impl Default for MockJobConsumer {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl JobConsumer for MockJobConsumer {
        async fn subscribe(
            &self,
            queue: &QueueName,
            handler: Arc<dyn JobHandler>,
        ) -> Result<(), SubscribeError> {
            self.subscriptions
                .lock()
                .unwrap()
                .push((queue.clone(), handler.name().to_string()));

            if self.fail_on.as_ref() == Some(queue) {
                return Err(SubscribeError::QueueNotFound(queue.clone()));
            }
            Ok(())
        }
    }
}
