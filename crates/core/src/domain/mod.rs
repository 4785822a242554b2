// Domain Layer - Pure value types and lifecycle states

pub mod error;
pub mod lifecycle;
pub mod message;
pub mod queue;

// Re-exports
pub use error::DomainError;
pub use lifecycle::ServiceState;
pub use message::{JobMessage, MessageId};
pub use queue::{ExternalQueueConfig, ExternalQueueSet, QueueName};
