//! Collaborator error taxonomy.

use thiserror::Error;

/// Result type for collaborator calls.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure surfaced by a remote collaborator.
///
/// Both kinds are terminal at the panel that observes them: one
/// notification, reset to a safe empty state, no propagation onto the bus,
/// no automatic retry. Neither is fatal to the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// A record fetch was rejected or errored.
    #[error("record fetch failed: {0}")]
    Fetch(String),

    /// Object/picklist metadata could not be loaded.
    #[error("metadata load failed: {0}")]
    Metadata(String),
}

impl ServiceError {
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }
}
