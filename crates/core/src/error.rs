// Central Error Type for the Application

use crate::domain::QueueName;
use crate::port::{ImportError, SubscribeError};
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    /// Two different handlers bound to the same literal queue name
    #[error("Duplicate handler for queue {queue}: {existing} already registered, {conflicting} rejected")]
    DuplicateHandler {
        queue: QueueName,
        existing: String,
        conflicting: String,
    },

    // Collaborator failures surface unmodified
    #[error(transparent)]
    Subscribe(#[from] SubscribeError),

    #[error(transparent)]
    Import(#[from] ImportError),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
