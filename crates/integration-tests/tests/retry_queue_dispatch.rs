//! Messages on a primary queue and its retry queue reach the same handler

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use conveyor_core::application::{HandlerRegistry, SubscriptionService};
use conveyor_core::domain::{ExternalQueueSet, JobMessage, QueueName};
use conveyor_core::port::{HandlerError, JobHandler};
use conveyor_infra_memory::{DeliveryError, MemoryQueueBackend};
use serde_json::json;

/// Rejects orders without an amount, remembers where each order came from
#[derive(Default)]
struct OrderHandler {
    seen: Mutex<Vec<(String, i64)>>,
}

#[async_trait]
impl JobHandler for OrderHandler {
    fn name(&self) -> &str {
        "OrderHandler"
    }

    async fn handle_job(&self, message: JobMessage) -> Result<(), HandlerError> {
        let amount = message.body["amount"]
            .as_i64()
            .ok_or_else(|| HandlerError::InvalidMessage("missing amount".to_string()))?;
        self.seen
            .lock()
            .unwrap()
            .push((message.queue.to_string(), amount));
        Ok(())
    }
}

async fn running_backend(handler: Arc<OrderHandler>, queues: &[&str]) -> MemoryQueueBackend {
    let backend = MemoryQueueBackend::new();
    let mut builder = HandlerRegistry::builder();
    for queue in queues {
        let name = QueueName::new(*queue);
        backend.create_queue(name.clone(), HashMap::new()).unwrap();
        backend.create_queue(name.retry_queue(), HashMap::new()).unwrap();
        builder = builder.register(name, handler.clone());
    }

    let shared = Arc::new(backend.clone());
    let mut service = SubscriptionService::new(
        Arc::new(builder.build().unwrap()),
        ExternalQueueSet::new(),
        shared.clone(),
        shared,
    );
    service.start_up().await.unwrap();
    backend
}

#[tokio::test]
async fn test_primary_and_retry_deliveries_share_handler() {
    let handler = Arc::new(OrderHandler::default());
    let backend = running_backend(handler.clone(), &["orders"]).await;

    backend
        .deliver(&QueueName::new("orders"), json!({"amount": 10}))
        .await
        .unwrap();
    backend
        .deliver(&QueueName::new("orders").retry_queue(), json!({"amount": 20}))
        .await
        .unwrap();

    let seen = handler.seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![
            ("orders".to_string(), 10),
            ("orders-retry".to_string(), 20)
        ]
    );
}

#[tokio::test]
async fn test_handler_failure_surfaces_from_delivery() {
    let handler = Arc::new(OrderHandler::default());
    let backend = running_backend(handler.clone(), &["orders"]).await;

    let err = backend
        .deliver(&QueueName::new("orders-retry"), json!({"note": "no amount"}))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        DeliveryError::Handler {
            handler: "OrderHandler".to_string(),
            source: HandlerError::InvalidMessage("missing amount".to_string()),
        }
    );
    assert!(handler.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_fifo_queue_and_its_retry_queue() {
    let handler = Arc::new(OrderHandler::default());
    let backend = running_backend(handler.clone(), &["payments.fifo"]).await;

    backend
        .deliver(&QueueName::new("payments-retry.fifo"), json!({"amount": 5}))
        .await
        .unwrap();

    assert_eq!(
        handler.seen.lock().unwrap().clone(),
        vec![("payments-retry.fifo".to_string(), 5)]
    );
}
