// In-memory queue backend
// Implements JobConsumer and QueueAttributeImporter over a local queue catalog
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, info, warn};

use conveyor_core::domain::{JobMessage, MessageId, QueueName};
use conveyor_core::port::{
    HandlerError, ImportError, JobConsumer, JobHandler, QueueAttributeImporter, SubscribeError,
};

use crate::queue_naming::validate_queue_name;

/// Queue provisioning errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Invalid queue name: {0}")]
    InvalidQueueName(String),

    #[error("Queue already exists: {0}")]
    QueueAlreadyExists(QueueName),
}

/// Delivery errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Queue not found: {0}")]
    QueueNotFound(QueueName),

    #[error("Queue {0} has no subscriber")]
    NoSubscriber(QueueName),

    #[error("Handler {handler} failed: {source}")]
    Handler {
        handler: String,
        #[source]
        source: HandlerError,
    },
}

type Attributes = HashMap<String, String>;

struct QueueEntry {
    attributes: Attributes,
    subscriber: Option<Arc<dyn JobHandler>>,
}

#[derive(Default)]
struct BackendState {
    queues: HashMap<QueueName, QueueEntry>,
    imported: HashMap<QueueName, Attributes>,
    denied: HashSet<QueueName>,
}

/// In-process queue backend
///
/// Dispatches delivered messages straight to the subscribed handler.
/// There is no polling loop, no acknowledgement and no redelivery.
#[derive(Clone, Default)]
pub struct MemoryQueueBackend {
    state: Arc<Mutex<BackendState>>,
}

impl MemoryQueueBackend {
    /// Create an empty backend
    ///
    /// # Example
    /// ```ignore
    /// let backend = MemoryQueueBackend::new();
    /// backend.create_queue("orders", HashMap::new())?;
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    // A panicking handler never runs under this lock, so poisoned state is still consistent
    fn lock(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Provision a queue with the given attributes
    pub fn create_queue(
        &self,
        queue: impl Into<QueueName>,
        attributes: Attributes,
    ) -> Result<(), BackendError> {
        let queue = queue.into();
        validate_queue_name(&queue).map_err(BackendError::InvalidQueueName)?;

        let mut state = self.lock();
        if state.queues.contains_key(&queue) {
            return Err(BackendError::QueueAlreadyExists(queue));
        }
        debug!(queue = %queue, attributes = attributes.len(), "Queue created");
        state.queues.insert(
            queue,
            QueueEntry {
                attributes,
                subscriber: None,
            },
        );
        Ok(())
    }

    /// Refuse all further access to `queue` (subscribe and import)
    pub fn deny_access(&self, queue: impl Into<QueueName>) {
        self.lock().denied.insert(queue.into());
    }

    pub fn queue_exists(&self, queue: &QueueName) -> bool {
        self.lock().queues.contains_key(queue)
    }

    /// Name of the handler subscribed to `queue`, if any
    pub fn subscriber(&self, queue: &QueueName) -> Option<String> {
        self.lock()
            .queues
            .get(queue)
            .and_then(|entry| entry.subscriber.as_ref())
            .map(|handler| handler.name().to_string())
    }

    /// Attributes recorded by a successful import
    pub fn imported_attributes(&self, queue: &QueueName) -> Option<Attributes> {
        self.lock().imported.get(queue).cloned()
    }

    /// Deliver one message to the subscriber of `queue`
    ///
    /// Returns the generated message id once the handler succeeded.
    pub async fn deliver(
        &self,
        queue: &QueueName,
        body: serde_json::Value,
    ) -> Result<MessageId, DeliveryError> {
        // Clone the handler out so the lock is released before awaiting it
        let handler = {
            let state = self.lock();
            let entry = state
                .queues
                .get(queue)
                .ok_or_else(|| DeliveryError::QueueNotFound(queue.clone()))?;
            entry
                .subscriber
                .clone()
                .ok_or_else(|| DeliveryError::NoSubscriber(queue.clone()))?
        };

        let id = uuid::Uuid::new_v4().to_string();
        let message = JobMessage::new(id.clone(), queue.clone(), body);

        debug!(queue = %queue, message_id = %id, handler = handler.name(), "Dispatching message");

        handler.handle_job(message).await.map_err(|source| {
            warn!(queue = %queue, message_id = %id, error = %source, "Handler failed");
            DeliveryError::Handler {
                handler: handler.name().to_string(),
                source,
            }
        })?;

        Ok(id)
    }
}

#[async_trait]
impl JobConsumer for MemoryQueueBackend {
    async fn subscribe(
        &self,
        queue: &QueueName,
        handler: Arc<dyn JobHandler>,
    ) -> Result<(), SubscribeError> {
        let mut state = self.lock();

        if state.denied.contains(queue) {
            return Err(SubscribeError::PermissionDenied {
                queue: queue.clone(),
                reason: "access denied by backend".to_string(),
            });
        }

        let entry = state
            .queues
            .get_mut(queue)
            .ok_or_else(|| SubscribeError::QueueNotFound(queue.clone()))?;

        if entry.subscriber.is_some() {
            return Err(SubscribeError::AlreadySubscribed(queue.clone()));
        }

        info!(queue = %queue, handler = handler.name(), "Consumer subscribed");
        entry.subscriber = Some(handler);
        Ok(())
    }
}

#[async_trait]
impl QueueAttributeImporter for MemoryQueueBackend {
    async fn import(&self, queue: &QueueName) -> Result<(), ImportError> {
        let mut state = self.lock();

        if state.denied.contains(queue) {
            return Err(ImportError::PermissionDenied {
                queue: queue.clone(),
                reason: "access denied by backend".to_string(),
            });
        }

        let attributes = state
            .queues
            .get(queue)
            .map(|entry| entry.attributes.clone())
            .ok_or_else(|| ImportError::QueueNotFound(queue.clone()))?;

        info!(queue = %queue, attributes = attributes.len(), "Queue attributes imported");
        state.imported.insert(queue.clone(), attributes);
        Ok(())
    }
}
