//! Collaborator trait interfaces the transition engine depends on.
//!
//! # Collaborators
//!
//! - [`TicketRepository`] - loads and commits ticket aggregates
//! - [`TicketLinkRepository`] - looks up, adds and removes ticket links
//! - [`WorkflowRunner`] - runs named business-rule checks
//! - [`Notifier`] - accepts human-facing notifications for queueing
//! - [`EventPublisher`] - records domain events
//!
//! The engine depends on these traits only. Implementations live outside the
//! domain layer; [`crate::in_memory`] ships in-process ones.
//!
//! # Error Conditions
//!
//! Absence is not an error: lookups return `Ok(None)` for missing tickets
//! and links so the engine can branch on it. `RepositoryError` and
//! `CollaboratorError` are reserved for infrastructure faults.
//!
//! # Example
//!
//! ```rust,ignore
//! use helpdesk_core::domain::collaborators::TicketRepository;
//!
//! async fn is_known(repo: &dyn TicketRepository, id: TicketId) -> RepositoryResult<bool> {
//!     repo.exists(id).await
//! }
//! ```

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    events::DomainEvent,
    identifiers::TicketId,
    link::TicketLink,
    notification::Notification,
    selection::TicketSelection,
    ticket::Ticket,
    workflow::{WorkflowOutcome, WorkflowRequest},
};

// ============================================================================
// SHARED ERROR TYPES
// ============================================================================

/// Errors from repository operations.
///
/// - **Conflict**: Operation would violate constraints
/// - **Storage failure**: Underlying storage error (corruption, permissions, etc.)
/// - **Concurrent modification**: Another writer committed first
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// Conflict with existing data (duplicate, constraint violation)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Underlying storage failure
    #[error("storage error: {0}")]
    StorageError(String),

    /// Concurrent modification conflict
    #[error("concurrent modification: {0}")]
    ConcurrentModification(String),
}

impl RepositoryError {
    /// Create a conflict error
    #[must_use]
    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict(reason.into())
    }

    /// Create a storage error
    #[must_use]
    pub fn storage_error(reason: impl Into<String>) -> Self {
        Self::StorageError(reason.into())
    }
}

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Faults raised by workflow, notification and event collaborators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollaboratorError {
    #[error("workflow runner failed: {0}")]
    Workflow(String),

    #[error("notification rejected: {0}")]
    Notification(String),

    #[error("event publication failed: {0}")]
    Publish(String),

    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
}

// ============================================================================
// TICKET REPOSITORY
// ============================================================================

/// Repository for the Ticket aggregate.
///
/// Each `find_by_id` call must hand back an independent copy; two concurrent
/// operations never share one aggregate instance. Lost-update protection
/// (e.g. optimistic concurrency tokens) is the implementation's job and is
/// reported as `ConcurrentModification`.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Load a ticket by id.
    ///
    /// Returns `Ok(None)` if no such ticket exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on access failure.
    async fn find_by_id(&self, id: TicketId) -> RepositoryResult<Option<Ticket>>;

    /// Atomically commit a ticket.
    ///
    /// # Errors
    ///
    /// Returns `ConcurrentModification` if the commit would lose an update.
    /// Returns `StorageError` on write failure.
    async fn save(&self, ticket: &Ticket) -> RepositoryResult<()>;

    /// List every ticket.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read failure.
    async fn find_all(&self) -> RepositoryResult<Vec<Ticket>>;

    /// List tickets satisfying `selection` at `now`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read failure.
    async fn find_matching(
        &self,
        selection: &TicketSelection,
        now: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Ticket>> {
        let tickets = self.find_all().await?;
        Ok(selection.select(tickets, now))
    }

    /// Check if a ticket exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on access failure.
    async fn exists(&self, id: TicketId) -> RepositoryResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}

// ============================================================================
// TICKET LINK REPOSITORY
// ============================================================================

/// Repository for links between tickets.
#[async_trait]
pub trait TicketLinkRepository: Send + Sync {
    /// Find the link joining `a` and `b` in either direction.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on access failure.
    async fn find_link(&self, a: TicketId, b: TicketId) -> RepositoryResult<Option<TicketLink>>;

    /// Commit a new link.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the tickets are already linked.
    /// Returns `StorageError` on write failure.
    async fn add(&self, link: TicketLink) -> RepositoryResult<()>;

    /// Remove a link and commit.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on write failure.
    async fn remove(&self, link: &TicketLink) -> RepositoryResult<()>;
}

// ============================================================================
// SIDE-EFFECT COLLABORATORS
// ============================================================================

/// Runs business-rule workflows.
#[async_trait]
pub trait WorkflowRunner: Send + Sync {
    /// Run the workflow for `request` and report its result.
    ///
    /// A rejection is an `Ok` outcome with a non-success result; `Err` means
    /// the runner itself could not be reached.
    ///
    /// # Errors
    ///
    /// Returns `CollaboratorError` if the runner faults.
    async fn run(&self, request: &WorkflowRequest) -> Result<WorkflowOutcome, CollaboratorError>;
}

/// Accepts notifications for later delivery.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Accept `notification` for queueing. Delivery is not awaited.
    ///
    /// # Errors
    ///
    /// Returns `CollaboratorError` if the queue refuses the notification.
    async fn enqueue(&self, notification: Notification) -> Result<(), CollaboratorError>;
}

/// Records domain events.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish one event.
    ///
    /// # Errors
    ///
    /// Returns `CollaboratorError` if the event could not be recorded.
    async fn publish(&self, event: &DomainEvent) -> Result<(), CollaboratorError>;
}
