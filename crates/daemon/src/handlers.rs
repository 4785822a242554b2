//! Built-in job handlers wired by the daemon

use async_trait::async_trait;
use conveyor_core::domain::JobMessage;
use conveyor_core::port::{HandlerError, JobHandler};
use tracing::info;

/// Handler that logs each message and acknowledges it
pub struct LoggingJobHandler;

pub const LOGGING_HANDLER_NAME: &str = "LoggingJobHandler";

#[async_trait]
impl JobHandler for LoggingJobHandler {
    fn name(&self) -> &str {
        LOGGING_HANDLER_NAME
    }

    async fn handle_job(&self, message: JobMessage) -> Result<(), HandlerError> {
        if !message.body.is_object() {
            return Err(HandlerError::InvalidMessage(format!(
                "expected a JSON object body in message {}",
                message.id
            )));
        }

        info!(
            queue = %message.queue,
            message_id = %message.id,
            retry = message.queue.is_retry_queue(),
            body = %message.body,
            "Job received"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conveyor_core::domain::QueueName;
    use serde_json::json;

    #[tokio::test]
    async fn test_accepts_object_body() {
        let message = JobMessage::new("m-1", QueueName::new("orders"), json!({"id": 1}));
        assert!(LoggingJobHandler.handle_job(message).await.is_ok());
    }

    #[tokio::test]
    async fn test_rejects_non_object_body() {
        let message = JobMessage::new("m-2", QueueName::new("orders-retry"), json!([1, 2]));
        let err = LoggingJobHandler.handle_job(message).await.unwrap_err();
        assert!(matches!(err, HandlerError::InvalidMessage(_)));
    }
}
