// Handler Registry
// Collects queue -> handler bindings at configuration time, then freezes them

use crate::domain::QueueName;
use crate::error::{AppError, Result};
use crate::port::JobHandler;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Builder collecting handler bindings before any consumption starts
///
/// Conflicts are reported by `build()`, not by `register()`, so every
/// registration call stays infallible while wiring.
#[derive(Default)]
pub struct HandlerRegistryBuilder {
    bindings: Vec<(QueueName, Arc<dyn JobHandler>)>,
}

impl HandlerRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handler` to `queue` and to the queue's retry queue
    ///
    /// # Example
    /// ```text
    /// let registry = HandlerRegistryBuilder::new()
    ///     .register("orders", Arc::new(OrderHandler))
    ///     .build()?;
    /// // registry now holds "orders" and "orders-retry"
    /// ```
    pub fn register(
        mut self,
        queue: impl Into<QueueName>,
        handler: Arc<dyn JobHandler>,
    ) -> Self {
        let queue = queue.into();
        let retry_queue = queue.retry_queue();
        self.bindings.push((queue, Arc::clone(&handler)));
        self.bindings.push((retry_queue, handler));
        self
    }

    /// Bind `handler` to the literal `queue` only (no retry queue)
    pub fn register_without_retry(
        mut self,
        queue: impl Into<QueueName>,
        handler: Arc<dyn JobHandler>,
    ) -> Self {
        self.bindings.push((queue.into(), handler));
        self
    }

    /// Freeze the bindings into an immutable registry
    ///
    /// # Errors
    /// - AppError::DuplicateHandler if two different handlers share a queue name
    pub fn build(self) -> Result<HandlerRegistry> {
        let mut handlers: HashMap<QueueName, Arc<dyn JobHandler>> =
            HashMap::with_capacity(self.bindings.len());

        for (queue, handler) in self.bindings {
            if let Some(existing) = handlers.get(&queue) {
                if same_handler(existing, &handler) {
                    continue;
                }
                return Err(AppError::DuplicateHandler {
                    queue,
                    existing: existing.name().to_string(),
                    conflicting: handler.name().to_string(),
                });
            }
            debug!(queue = %queue, handler = handler.name(), "Bound job handler");
            handlers.insert(queue, handler);
        }

        info!(queues = handlers.len(), "Handler registry built");
        Ok(HandlerRegistry { handlers })
    }
}

// Compare instances by address only; vtable pointers may differ across codegen units
fn same_handler(a: &Arc<dyn JobHandler>, b: &Arc<dyn JobHandler>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}

/// Immutable queue -> handler mapping, read-only at runtime
///
/// Iteration order is unspecified.
pub struct HandlerRegistry {
    handlers: HashMap<QueueName, Arc<dyn JobHandler>>,
}

impl HandlerRegistry {
    pub fn builder() -> HandlerRegistryBuilder {
        HandlerRegistryBuilder::new()
    }

    pub fn get(&self, queue: &QueueName) -> Option<&Arc<dyn JobHandler>> {
        self.handlers.get(queue)
    }

    pub fn contains(&self, queue: &QueueName) -> bool {
        self.handlers.contains_key(queue)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn queues(&self) -> impl Iterator<Item = &QueueName> {
        self.handlers.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QueueName, &Arc<dyn JobHandler>)> {
        self.handlers.iter()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.handlers.iter().map(|(q, h)| (q.as_str(), h.name())))
            .finish()
    }
}
