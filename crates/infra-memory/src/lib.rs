// Conveyor Infrastructure - In-Memory Queue Backend
// Implements: JobConsumer, QueueAttributeImporter (ADR-001)

pub mod memory_backend;
pub mod queue_naming;

pub use memory_backend::{BackendError, DeliveryError, MemoryQueueBackend};
pub use queue_naming::validate_queue_name;
