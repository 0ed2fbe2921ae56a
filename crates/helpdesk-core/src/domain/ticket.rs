//! Ticket aggregate root with guarded lifecycle mutators.
//!
//! The Ticket aggregate owns:
//! - Identity (`TicketId` and an immutable external UUID)
//! - Lifecycle timestamps that status is derived from
//! - The set of assigned users
//!
//! # Invariants
//!
//! 1. Status is a pure function of the timestamp fields (see [`derive_status`])
//! 2. `resolved_by` is only set together with `resolved_on`, `closed_by` with `closed_on`
//! 3. Reopening clears `closed_on`, `closed_by`, `resolved_on` and `resolved_by` together
//! 4. Assignees are a set: assigning the same user twice keeps one membership

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use chrono::{DateTime, Utc};
use im::OrdSet;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    identifiers::{TicketId, UserId},
    status::{derive_status, StatusFields, TicketStatus},
};

// ============================================================================
// DOMAIN ERRORS
// ============================================================================

/// Errors raised when a mutator's precondition does not hold.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TicketError {
    #[error("ticket has already been resolved")]
    AlreadyResolved,

    #[error("ticket has already been closed")]
    AlreadyClosed,

    #[error("ticket has already been started")]
    AlreadyStarted,

    #[error("ticket has already been paused")]
    AlreadyPaused,

    /// Reconstruction data carried an actor without its timestamp
    #[error("{actor} is set without {timestamp}")]
    InconsistentFields {
        actor: &'static str,
        timestamp: &'static str,
    },
}

// ============================================================================
// TICKET AGGREGATE ROOT
// ============================================================================

/// Ticket aggregate root.
///
/// Fields are private; all lifecycle changes go through the guarded
/// mutators below, which re-check the same status guard the transition
/// engine checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    id: TicketId,
    external_identifier: Uuid,
    title: String,
    started_on: Option<DateTime<Utc>>,
    paused_on: Option<DateTime<Utc>>,
    resolved_on: Option<DateTime<Utc>>,
    resolved_by: Option<UserId>,
    closed_on: Option<DateTime<Utc>>,
    closed_by: Option<UserId>,
    approval_requested_on: Option<DateTime<Utc>>,
    approved_on: Option<DateTime<Utc>>,
    feedback_requested_on: Option<DateTime<Utc>>,
    due_date: Option<DateTime<Utc>>,
    assignees: OrdSet<UserId>,
}

impl Ticket {
    /// Create a new ticket in the `Open` state.
    #[must_use]
    pub fn open(id: TicketId, title: impl Into<String>) -> Self {
        Self {
            id,
            external_identifier: Uuid::new_v4(),
            title: title.into(),
            started_on: None,
            paused_on: None,
            resolved_on: None,
            resolved_by: None,
            closed_on: None,
            closed_by: None,
            approval_requested_on: None,
            approved_on: None,
            feedback_requested_on: None,
            due_date: None,
            assignees: OrdSet::new(),
        }
    }

    /// Start a builder for reconstructing a persisted ticket.
    #[must_use]
    pub fn builder(id: TicketId) -> TicketBuilder {
        TicketBuilder::new(id)
    }

    // ========================================================================
    // QUERY METHODS
    // ========================================================================

    #[must_use]
    pub const fn id(&self) -> TicketId {
        self.id
    }

    #[must_use]
    pub const fn external_identifier(&self) -> Uuid {
        self.external_identifier
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn started_on(&self) -> Option<DateTime<Utc>> {
        self.started_on
    }

    #[must_use]
    pub const fn paused_on(&self) -> Option<DateTime<Utc>> {
        self.paused_on
    }

    #[must_use]
    pub const fn resolved_on(&self) -> Option<DateTime<Utc>> {
        self.resolved_on
    }

    #[must_use]
    pub const fn resolved_by(&self) -> Option<UserId> {
        self.resolved_by
    }

    #[must_use]
    pub const fn closed_on(&self) -> Option<DateTime<Utc>> {
        self.closed_on
    }

    #[must_use]
    pub const fn closed_by(&self) -> Option<UserId> {
        self.closed_by
    }

    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    #[must_use]
    pub const fn assignees(&self) -> &OrdSet<UserId> {
        &self.assignees
    }

    /// Check whether a user is assigned to the ticket.
    #[must_use]
    pub fn is_assigned(&self, user: &UserId) -> bool {
        self.assignees.contains(user)
    }

    /// Copy of the fields status is derived from.
    #[must_use]
    pub const fn status_fields(&self) -> StatusFields {
        StatusFields {
            started_on: self.started_on,
            paused_on: self.paused_on,
            resolved_on: self.resolved_on,
            closed_on: self.closed_on,
            approval_requested_on: self.approval_requested_on,
            approved_on: self.approved_on,
            feedback_requested_on: self.feedback_requested_on,
            due_date: self.due_date,
        }
    }

    /// Status at the given instant.
    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>) -> TicketStatus {
        derive_status(&self.status_fields(), now)
    }

    // ========================================================================
    // STATE TRANSITION METHODS
    // ========================================================================

    /// Mark the ticket as started. Resumes an on-hold ticket.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyResolved`, `AlreadyClosed` or `AlreadyStarted`.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), TicketError> {
        match self.status_at(now) {
            TicketStatus::Resolved => Err(TicketError::AlreadyResolved),
            TicketStatus::Closed => Err(TicketError::AlreadyClosed),
            TicketStatus::InProgress => Err(TicketError::AlreadyStarted),
            _ => {
                // An overdue ticket that is already running keeps its start time.
                if self.paused_on.take().is_some() || self.started_on.is_none() {
                    self.started_on = Some(now);
                }
                Ok(())
            }
        }
    }

    /// Put the ticket on hold.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyResolved`, `AlreadyClosed` or `AlreadyPaused`.
    pub fn pause(&mut self, now: DateTime<Utc>) -> Result<(), TicketError> {
        match self.status_at(now) {
            TicketStatus::Resolved => Err(TicketError::AlreadyResolved),
            TicketStatus::Closed => Err(TicketError::AlreadyClosed),
            TicketStatus::OnHold => Err(TicketError::AlreadyPaused),
            _ => {
                self.paused_on = Some(now);
                Ok(())
            }
        }
    }

    /// Resolve the ticket on behalf of `actor`.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyResolved` or `AlreadyClosed`.
    pub fn resolve(&mut self, actor: UserId, now: DateTime<Utc>) -> Result<(), TicketError> {
        self.ensure_unfinished(now)?;
        self.resolved_on = Some(now);
        self.resolved_by = Some(actor);
        Ok(())
    }

    /// Close the ticket on behalf of `actor`.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyResolved` or `AlreadyClosed`.
    pub fn close(&mut self, actor: UserId, now: DateTime<Utc>) -> Result<(), TicketError> {
        self.ensure_unfinished(now)?;
        self.closed_on = Some(now);
        self.closed_by = Some(actor);
        Ok(())
    }

    /// Clear the closed and resolved group in one step.
    pub fn reopen(&mut self) {
        self.closed_on = None;
        self.closed_by = None;
        self.resolved_on = None;
        self.resolved_by = None;
    }

    /// Add a user to the assignees. Returns whether membership changed.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyResolved` or `AlreadyClosed`.
    pub fn assign(&mut self, user: UserId, now: DateTime<Utc>) -> Result<bool, TicketError> {
        self.ensure_unfinished(now)?;
        Ok(self.assignees.insert(user).is_none())
    }

    /// Remove a user from the assignees. Returns whether membership changed.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyResolved` or `AlreadyClosed`.
    pub fn unassign(&mut self, user: &UserId, now: DateTime<Utc>) -> Result<bool, TicketError> {
        self.ensure_unfinished(now)?;
        Ok(self.assignees.remove(user).is_some())
    }

    fn ensure_unfinished(&self, now: DateTime<Utc>) -> Result<(), TicketError> {
        match self.status_at(now) {
            TicketStatus::Resolved => Err(TicketError::AlreadyResolved),
            TicketStatus::Closed => Err(TicketError::AlreadyClosed),
            _ => Ok(()),
        }
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for reconstructing a ticket from persisted data.
#[derive(Debug, Clone)]
pub struct TicketBuilder {
    ticket: Ticket,
}

impl TicketBuilder {
    #[must_use]
    pub fn new(id: TicketId) -> Self {
        Self {
            ticket: Ticket::open(id, String::new()),
        }
    }

    #[must_use]
    pub fn external_identifier(mut self, uuid: Uuid) -> Self {
        self.ticket.external_identifier = uuid;
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.ticket.title = title.into();
        self
    }

    #[must_use]
    pub fn started_on(mut self, at: DateTime<Utc>) -> Self {
        self.ticket.started_on = Some(at);
        self
    }

    #[must_use]
    pub fn paused_on(mut self, at: DateTime<Utc>) -> Self {
        self.ticket.paused_on = Some(at);
        self
    }

    #[must_use]
    pub fn resolved(mut self, at: DateTime<Utc>, by: Option<UserId>) -> Self {
        self.ticket.resolved_on = Some(at);
        self.ticket.resolved_by = by;
        self
    }

    #[must_use]
    pub fn closed(mut self, at: DateTime<Utc>, by: Option<UserId>) -> Self {
        self.ticket.closed_on = Some(at);
        self.ticket.closed_by = by;
        self
    }

    #[must_use]
    pub fn approval_requested_on(mut self, at: DateTime<Utc>) -> Self {
        self.ticket.approval_requested_on = Some(at);
        self
    }

    #[must_use]
    pub fn approved_on(mut self, at: DateTime<Utc>) -> Self {
        self.ticket.approved_on = Some(at);
        self
    }

    #[must_use]
    pub fn feedback_requested_on(mut self, at: DateTime<Utc>) -> Self {
        self.ticket.feedback_requested_on = Some(at);
        self
    }

    #[must_use]
    pub fn due_date(mut self, at: DateTime<Utc>) -> Self {
        self.ticket.due_date = Some(at);
        self
    }

    #[must_use]
    pub fn assignees(mut self, users: impl IntoIterator<Item = UserId>) -> Self {
        self.ticket.assignees = users.into_iter().collect();
        self
    }

    /// Apply an arbitrary combination of status fields.
    #[must_use]
    pub fn status_fields(mut self, fields: StatusFields) -> Self {
        self.ticket.started_on = fields.started_on;
        self.ticket.paused_on = fields.paused_on;
        self.ticket.resolved_on = fields.resolved_on;
        self.ticket.closed_on = fields.closed_on;
        self.ticket.approval_requested_on = fields.approval_requested_on;
        self.ticket.approved_on = fields.approved_on;
        self.ticket.feedback_requested_on = fields.feedback_requested_on;
        self.ticket.due_date = fields.due_date;
        self
    }

    /// Build the ticket.
    ///
    /// # Errors
    ///
    /// Returns `TicketError::InconsistentFields` if an actor is set without
    /// its timestamp.
    pub fn build(self) -> Result<Ticket, TicketError> {
        let ticket = self.ticket;
        if ticket.resolved_by.is_some() && ticket.resolved_on.is_none() {
            return Err(TicketError::InconsistentFields {
                actor: "resolved_by",
                timestamp: "resolved_on",
            });
        }
        if ticket.closed_by.is_some() && ticket.closed_on.is_none() {
            return Err(TicketError::InconsistentFields {
                actor: "closed_by",
                timestamp: "closed_on",
            });
        }
        Ok(ticket)
    }
}

// ============================================================================
// TESTS
// ============================================================================
