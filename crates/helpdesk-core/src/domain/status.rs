//! Ticket status derivation.
//!
//! Status is never stored. It is recomputed from the ticket's lifecycle
//! timestamps by [`derive_status`], which is the only place the precedence
//! rules live. The aggregate guards and every selection predicate call it.
//!
//! # Precedence
//!
//! First match wins:
//!
//! 1. `closed_on` set → [`TicketStatus::Closed`]
//! 2. `resolved_on` set → [`TicketStatus::Resolved`]
//! 3. `due_date` in the past, and none of paused / approved / approval
//!    requested / feedback requested → [`TicketStatus::Overdue`]
//! 4. `approved_on` set → [`TicketStatus::Approved`]
//! 5. `approval_requested_on` set → [`TicketStatus::PendingApproval`]
//! 6. `feedback_requested_on` set → [`TicketStatus::PendingFeedback`]
//! 7. `paused_on` set → [`TicketStatus::OnHold`]
//! 8. `started_on` set → [`TicketStatus::InProgress`]
//! 9. otherwise → [`TicketStatus::Open`]

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Derived status of a ticket.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    OnHold,
    Overdue,
    Approved,
    PendingApproval,
    PendingFeedback,
    Resolved,
    Closed,
}

impl TicketStatus {
    /// Resolved and closed tickets reject most operations.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }
}

/// The timestamp fields status is derived from.
///
/// A borrowed-free copy so that callers can derive status for a ticket,
/// an outcome snapshot, or a synthetic combination in property tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusFields {
    pub started_on: Option<DateTime<Utc>>,
    pub paused_on: Option<DateTime<Utc>>,
    pub resolved_on: Option<DateTime<Utc>>,
    pub closed_on: Option<DateTime<Utc>>,
    pub approval_requested_on: Option<DateTime<Utc>>,
    pub approved_on: Option<DateTime<Utc>>,
    pub feedback_requested_on: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
}

impl StatusFields {
    /// Whether the due date has passed at `now`.
    #[must_use]
    pub fn is_past_due(&self, now: DateTime<Utc>) -> bool {
        self.due_date.is_some_and(|due| due < now)
    }

    /// Any field that holds a ticket out of the overdue bucket is set.
    const fn is_held(&self) -> bool {
        self.paused_on.is_some()
            || self.approved_on.is_some()
            || self.approval_requested_on.is_some()
            || self.feedback_requested_on.is_some()
    }
}

/// Derive the status of a ticket from its timestamp fields at `now`.
#[must_use]
pub fn derive_status(fields: &StatusFields, now: DateTime<Utc>) -> TicketStatus {
    if fields.closed_on.is_some() {
        TicketStatus::Closed
    } else if fields.resolved_on.is_some() {
        TicketStatus::Resolved
    } else if fields.is_past_due(now) && !fields.is_held() {
        TicketStatus::Overdue
    } else if fields.approved_on.is_some() {
        TicketStatus::Approved
    } else if fields.approval_requested_on.is_some() {
        TicketStatus::PendingApproval
    } else if fields.feedback_requested_on.is_some() {
        TicketStatus::PendingFeedback
    } else if fields.paused_on.is_some() {
        TicketStatus::OnHold
    } else if fields.started_on.is_some() {
        TicketStatus::InProgress
    } else {
        TicketStatus::Open
    }
}
