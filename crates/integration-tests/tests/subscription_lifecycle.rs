//! Subscription lifecycle integration tests
//!
//! Registry + SubscriptionService running against the in-memory backend.

use std::collections::HashMap;
use std::sync::Arc;

use conveyor_core::application::{HandlerRegistry, SubscriptionService};
use conveyor_core::domain::{ExternalQueueConfig, ExternalQueueSet, QueueName, ServiceState};
use conveyor_core::port::attribute_importer::mocks::MockAttributeImporter;
use conveyor_core::port::job_consumer::mocks::MockJobConsumer;
use conveyor_core::port::job_handler::mocks::RecordingHandler;
use conveyor_core::port::{JobHandler, SubscribeError};
use conveyor_core::AppError;
use conveyor_infra_memory::MemoryQueueBackend;

fn external(names: &[&str]) -> ExternalQueueSet {
    names
        .iter()
        .map(|n| (QueueName::new(*n), ExternalQueueConfig::default()))
        .collect()
}

/// orders + one external queue: 2 subscribes, 1 import
#[tokio::test]
async fn test_order_handler_scenario() {
    let order_handler: Arc<dyn JobHandler> = Arc::new(RecordingHandler::new("OrderHandler"));
    let registry = HandlerRegistry::builder()
        .register("orders", order_handler)
        .build()
        .unwrap();

    let mut registered: Vec<(String, String)> = registry
        .iter()
        .map(|(q, h)| (q.to_string(), h.name().to_string()))
        .collect();
    registered.sort();
    assert_eq!(
        registered,
        vec![
            ("orders".to_string(), "OrderHandler".to_string()),
            ("orders-retry".to_string(), "OrderHandler".to_string()),
        ]
    );

    let consumer = Arc::new(MockJobConsumer::new());
    let importer = Arc::new(MockAttributeImporter::new());
    let mut service = SubscriptionService::new(
        Arc::new(registry),
        external(&["legacy-orders"]),
        consumer.clone(),
        importer.clone(),
    );

    service.start_up().await.unwrap();

    assert_eq!(consumer.call_count(), 2);
    assert_eq!(importer.call_count(), 1);
    assert_eq!(importer.imported(), vec![QueueName::new("legacy-orders")]);
}

/// N registered queues, M external queues: 2N subscribes, M imports
#[tokio::test]
async fn test_call_counts_scale_with_registry() {
    const N: usize = 5;
    const M: usize = 3;

    let mut builder = HandlerRegistry::builder();
    for i in 0..N {
        let handler: Arc<dyn JobHandler> = Arc::new(RecordingHandler::new(format!("h{i}")));
        builder = builder.register(format!("queue-{i}"), handler);
    }
    let externals: ExternalQueueSet = (0..M)
        .map(|i| (QueueName::new(format!("ext-{i}")), ExternalQueueConfig::default()))
        .collect();

    let consumer = Arc::new(MockJobConsumer::new());
    let importer = Arc::new(MockAttributeImporter::new());
    let mut service = SubscriptionService::new(
        Arc::new(builder.build().unwrap()),
        externals,
        consumer.clone(),
        importer.clone(),
    );

    service.start_up().await.unwrap();

    assert_eq!(consumer.call_count(), 2 * N);
    assert_eq!(importer.call_count(), M);
}

#[tokio::test]
async fn test_startup_against_memory_backend() {
    let backend = Arc::new(MemoryQueueBackend::new());
    for queue in ["orders", "orders-retry"] {
        backend.create_queue(queue, HashMap::new()).unwrap();
    }
    backend
        .create_queue(
            "legacy-orders",
            HashMap::from([("VisibilityTimeout".to_string(), "60".to_string())]),
        )
        .unwrap();

    let handler: Arc<dyn JobHandler> = Arc::new(RecordingHandler::new("OrderHandler"));
    let registry = HandlerRegistry::builder()
        .register("orders", handler)
        .build()
        .unwrap();
    let mut service = SubscriptionService::new(
        Arc::new(registry),
        external(&["legacy-orders"]),
        backend.clone(),
        backend.clone(),
    );

    service.start_up().await.unwrap();
    assert!(service.is_running());

    assert_eq!(
        backend.subscriber(&QueueName::new("orders")).as_deref(),
        Some("OrderHandler")
    );
    assert_eq!(
        backend.subscriber(&QueueName::new("orders-retry")).as_deref(),
        Some("OrderHandler")
    );
    assert_eq!(
        backend
            .imported_attributes(&QueueName::new("legacy-orders"))
            .unwrap()
            .get("VisibilityTimeout")
            .map(String::as_str),
        Some("60")
    );

    service.shut_down().await.unwrap();
    assert_eq!(service.state(), ServiceState::Stopped);

    // Stopping the service does not tear down consumption
    assert!(backend.subscriber(&QueueName::new("orders")).is_some());
}

#[tokio::test]
async fn test_missing_retry_queue_aborts_startup() {
    let backend = Arc::new(MemoryQueueBackend::new());
    backend.create_queue("orders", HashMap::new()).unwrap();

    let handler: Arc<dyn JobHandler> = Arc::new(RecordingHandler::new("OrderHandler"));
    let registry = HandlerRegistry::builder()
        .register("orders", handler)
        .build()
        .unwrap();
    let mut service = SubscriptionService::new(
        Arc::new(registry),
        ExternalQueueSet::new(),
        backend.clone(),
        backend,
    );

    let err = service.start_up().await.unwrap_err();

    assert!(matches!(
        err,
        AppError::Subscribe(SubscribeError::QueueNotFound(ref q)) if q.as_str() == "orders-retry"
    ));
    assert_eq!(service.state(), ServiceState::Failed);
}

#[tokio::test]
async fn test_permission_denied_import_aborts_startup() {
    let backend = Arc::new(MemoryQueueBackend::new());
    backend.create_queue("partner-feed", HashMap::new()).unwrap();
    backend.deny_access("partner-feed");

    let mut service = SubscriptionService::new(
        Arc::new(HandlerRegistry::builder().build().unwrap()),
        external(&["partner-feed"]),
        backend.clone(),
        backend,
    );

    let err = service.start_up().await.unwrap_err();

    assert!(err.to_string().contains("Permission denied"));
    assert!(!service.is_running());
}

#[test]
fn test_conflicting_registrations_rejected_before_startup() {
    let first: Arc<dyn JobHandler> = Arc::new(RecordingHandler::new("OrderHandler"));
    let second: Arc<dyn JobHandler> = Arc::new(RecordingHandler::new("RefundHandler"));

    let err = HandlerRegistry::builder()
        .register("orders", first)
        .register("orders", second)
        .build()
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Duplicate handler for queue orders: OrderHandler already registered, RefundHandler rejected"
    );
}
