// Service Lifecycle States

use super::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a startup-managed service
///
/// NotStarted -> Running -> Stopped, or NotStarted -> Failed when startup
/// aborts. Stopped and Failed are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceState {
    NotStarted,
    Running,
    Stopped,
    Failed,
}

impl ServiceState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ServiceState::Stopped | ServiceState::Failed)
    }

    /// Validate a transition and return the target state
    pub fn transition(self, to: ServiceState) -> Result<ServiceState> {
        match (self, to) {
            (ServiceState::NotStarted, ServiceState::Running)
            | (ServiceState::NotStarted, ServiceState::Failed)
            | (ServiceState::Running, ServiceState::Stopped) => Ok(to),
            _ => Err(DomainError::InvalidStateTransition {
                from: self.to_string(),
                to: to.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceState::NotStarted => write!(f, "NOT_STARTED"),
            ServiceState::Running => write!(f, "RUNNING"),
            ServiceState::Stopped => write!(f, "STOPPED"),
            ServiceState::Failed => write!(f, "FAILED"),
        }
    }
}
