//! Error types for helpdesk-core
//!
//! Business-rule rejections (not found, already closed, workflow said no) are
//! outcomes, not errors. This type is for faults the caller has to treat as
//! "operation failed or status unknown".

use thiserror::Error;

use crate::domain::{
    collaborators::{CollaboratorError, RepositoryError},
    identifiers::IdentifierError,
    link::LinkError,
    ticket::TicketError,
};

/// Core error type for transition operations
#[derive(Debug, Error)]
pub enum Error {
    /// Caller error, rejected before any collaborator is touched
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Loading or committing state failed
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// The domain event for a committed transition could not be recorded
    #[error("Event publication failed: {0}")]
    Publish(CollaboratorError),

    /// The pre-transition workflow runner could not be reached
    #[error("Workflow invocation failed: {0}")]
    Workflow(CollaboratorError),

    /// A mutator refused a transition the guard phase allowed
    #[error("Domain error: {0}")]
    Domain(#[from] TicketError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<IdentifierError> for Error {
    fn from(err: IdentifierError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl From<LinkError> for Error {
    fn from(err: LinkError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl Error {
    /// Whether retrying the whole command could succeed.
    ///
    /// Guards re-evaluate state on every call, so a retry after an
    /// infrastructure fault never applies a transition twice.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Repository(_) | Self::Publish(_) | Self::Workflow(_) | Self::Io(_)
        )
    }
}

/// Result type alias for helpdesk-core operations
pub type Result<T> = std::result::Result<T, Error>;
