// Queue Attribute Importer Port
// Pulls backend configuration for queues provisioned by someone else

use crate::domain::QueueName;
use async_trait::async_trait;
use thiserror::Error;

/// Attribute import errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("External queue not found: {0}")]
    QueueNotFound(QueueName),

    #[error("Permission denied importing attributes of {queue}: {reason}")]
    PermissionDenied { queue: QueueName, reason: String },

    #[error("Backend error importing {queue}: {reason}")]
    Backend { queue: QueueName, reason: String },
}

/// Queue attribute importer trait
#[async_trait]
pub trait QueueAttributeImporter: Send + Sync {
    /// Fetch and apply backend attributes for an externally-owned queue
    async fn import(&self, queue: &QueueName) -> Result<(), ImportError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock importer recording every import call
    pub struct MockAttributeImporter {
        imported: Arc<Mutex<Vec<QueueName>>>,
        fail_on: Option<QueueName>,
    }

    impl MockAttributeImporter {
        pub fn new() -> Self {
            Self {
                imported: Arc::new(Mutex::new(Vec::new())),
                fail_on: None,
            }
        }

        /// Importer rejecting `queue` with QueueNotFound
        pub fn new_failing_on(queue: impl Into<QueueName>) -> Self {
            Self {
                fail_on: Some(queue.into()),
                ..Self::new()
            }
        }

        pub fn imported(&self) -> Vec<QueueName> {
            self.imported.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.imported.lock().unwrap().len()
        }
    }

    impl Default for MockAttributeImporter {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl QueueAttributeImporter for MockAttributeImporter {
        async fn import(&self, queue: &QueueName) -> Result<(), ImportError> {
            self.imported.lock().unwrap().push(queue.clone());

            if self.fail_on.as_ref() == Some(queue) {
                return Err(ImportError::QueueNotFound(queue.clone()));
            }
            Ok(())
        }
    }
}
