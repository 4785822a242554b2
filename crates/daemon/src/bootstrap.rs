//! Wiring of registry, backend and subscription service (DI wiring)

use anyhow::Result;
use conveyor_core::application::{HandlerRegistry, SubscriptionService};
use conveyor_core::domain::{ExternalQueueConfig, ExternalQueueSet};
use conveyor_core::port::JobHandler;
use conveyor_infra_memory::MemoryQueueBackend;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::settings::DaemonConfig;
use crate::handlers::LoggingJobHandler;

/// Register the logging handler on every configured queue
pub fn build_registry(config: &DaemonConfig) -> conveyor_core::Result<HandlerRegistry> {
    let handler: Arc<dyn JobHandler> = Arc::new(LoggingJobHandler);

    config
        .handler_queues()
        .into_iter()
        .fold(HandlerRegistry::builder(), |builder, queue| {
            builder.register(queue, Arc::clone(&handler))
        })
        .build()
}

/// Create registry and external queues in the in-memory backend
///
/// Queues that already exist are left untouched.
pub fn provision_queues(
    backend: &MemoryQueueBackend,
    registry: &HandlerRegistry,
    external_queues: &ExternalQueueSet,
) -> Result<()> {
    for queue in registry.queues() {
        if !backend.queue_exists(queue) {
            backend.create_queue(queue.clone(), HashMap::new())?;
        }
    }

    for (queue, config) in external_queues {
        if !backend.queue_exists(queue) {
            backend.create_queue(queue.clone(), external_attributes(config))?;
        }
    }

    info!(
        queues = registry.len(),
        external_queues = external_queues.len(),
        "Queues provisioned"
    );
    Ok(())
}

fn external_attributes(config: &ExternalQueueConfig) -> HashMap<String, String> {
    let mut attributes = HashMap::new();
    if let Some(account_id) = &config.account_id {
        attributes.insert("AccountId".to_string(), account_id.clone());
    }
    if let Some(region) = &config.region {
        attributes.insert("Region".to_string(), region.clone());
    }
    attributes
}

/// Build every component and run startup
///
/// Startup errors are returned as-is; the service never reaches Running
/// with a partial set of subscriptions.
pub async fn start(config: &DaemonConfig, backend: &MemoryQueueBackend) -> Result<SubscriptionService> {
    let registry = Arc::new(build_registry(config)?);
    let external_queues = config.external_queue_set();

    if config.provision_queues {
        provision_queues(backend, &registry, &external_queues)?;
    }

    let backend = Arc::new(backend.clone());
    let mut service =
        SubscriptionService::new(registry, external_queues, backend.clone(), backend);
    service.start_up().await?;

    Ok(service)
}
