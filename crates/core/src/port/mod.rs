// Port Layer - Interfaces for external collaborators

pub mod attribute_importer;
pub mod job_consumer;
pub mod job_handler;

// Re-exports
pub use attribute_importer::{ImportError, QueueAttributeImporter};
pub use job_consumer::{JobConsumer, SubscribeError};
pub use job_handler::{HandlerError, JobHandler};
