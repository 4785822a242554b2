// Application Layer - Registration and subscription lifecycle

pub mod registry;
pub mod subscription;

// Re-exports
pub use registry::{HandlerRegistry, HandlerRegistryBuilder};
pub use subscription::SubscriptionService;
