// Subscription Service
// Activates consumption for every registered queue at process startup

use crate::application::registry::HandlerRegistry;
use crate::domain::{ExternalQueueSet, ServiceState};
use crate::error::Result;
use crate::port::{JobConsumer, QueueAttributeImporter};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Startup-managed service wiring handlers to the consumer
///
/// Owns no consumption resources: stopping it does not stop delivery,
/// which belongs to the consumer's own lifecycle.
pub struct SubscriptionService {
    registry: Arc<HandlerRegistry>,
    external_queues: ExternalQueueSet,
    consumer: Arc<dyn JobConsumer>,
    attribute_importer: Arc<dyn QueueAttributeImporter>,
    state: ServiceState,
}

impl SubscriptionService {
    /// Create a new subscription service
    ///
    /// # Arguments
    /// * `registry` - Finalized queue -> handler mapping
    /// * `external_queues` - Queues owned elsewhere whose attributes are imported
    /// * `consumer` - Backend consumption engine
    /// * `attribute_importer` - Backend attribute importer
    pub fn new(
        registry: Arc<HandlerRegistry>,
        external_queues: ExternalQueueSet,
        consumer: Arc<dyn JobConsumer>,
        attribute_importer: Arc<dyn QueueAttributeImporter>,
    ) -> Self {
        Self {
            registry,
            external_queues,
            consumer,
            attribute_importer,
            state: ServiceState::NotStarted,
        }
    }

    pub fn state(&self) -> ServiceState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ServiceState::Running
    }

    /// Subscribe every registered handler, then import external queue attributes
    ///
    /// Runs once. Any collaborator failure aborts startup, is returned
    /// unchanged, and leaves the service in `Failed`.
    ///
    /// # Errors
    /// - AppError::Domain if the service was already started or stopped
    /// - AppError::Subscribe if the consumer rejects a queue
    /// - AppError::Import if an external queue cannot be imported
    pub async fn start_up(&mut self) -> Result<()> {
        let running = self.state.transition(ServiceState::Running)?;

        info!(
            queues = self.registry.len(),
            external_queues = self.external_queues.len(),
            "Starting job handler subscriptions"
        );

        match self.activate().await {
            Ok(()) => {
                self.state = running;
                info!("Job handler subscriptions running");
                Ok(())
            }
            Err(e) => {
                self.state = ServiceState::Failed;
                error!(error = %e, "Job handler subscription startup failed");
                Err(e)
            }
        }
    }

    /// Mark the service stopped; consumer teardown happens elsewhere
    pub async fn shut_down(&mut self) -> Result<()> {
        self.state = self.state.transition(ServiceState::Stopped)?;
        info!("Job handler subscription service stopped");
        Ok(())
    }

    async fn activate(&self) -> Result<()> {
        // Subscriptions must all be in place before any import is attempted
        for (queue, handler) in self.registry.iter() {
            self.consumer.subscribe(queue, Arc::clone(handler)).await?;
            info!(queue = %queue, handler = handler.name(), "Subscribed job handler");
        }

        for (queue, config) in &self.external_queues {
            self.attribute_importer.import(queue).await?;
            debug!(
                queue = %queue,
                account_id = ?config.account_id,
                region = ?config.region,
                "Imported external queue attributes"
            );
        }

        Ok(())
    }
}

impl std::fmt::Debug for SubscriptionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionService")
            .field("state", &self.state)
            .field("registry", &self.registry)
            .field("external_queues", &self.external_queues)
            .finish_non_exhaustive()
    }
}
