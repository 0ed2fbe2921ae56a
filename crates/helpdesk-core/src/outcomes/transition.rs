//! Snapshot outcomes for single-ticket transitions.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{
    kinds::{NotFoundKind, OutcomeKind, WorkflowGatedKind},
    messages,
};
use crate::domain::{
    identifiers::{TicketId, UserId},
    status::TicketStatus,
    ticket::Ticket,
    workflow::WorkflowOutcome,
};

/// Copy of a ticket's lifecycle fields taken when an outcome is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketSnapshot {
    pub status: TicketStatus,
    pub started_on: Option<DateTime<Utc>>,
    pub paused_on: Option<DateTime<Utc>>,
    pub resolved_on: Option<DateTime<Utc>>,
    pub resolved_by: Option<UserId>,
    pub closed_on: Option<DateTime<Utc>>,
    pub closed_by: Option<UserId>,
    pub assignees: Vec<UserId>,
}

impl TicketSnapshot {
    #[must_use]
    pub fn capture(ticket: &Ticket, now: DateTime<Utc>) -> Self {
        Self {
            status: ticket.status_at(now),
            started_on: ticket.started_on(),
            paused_on: ticket.paused_on(),
            resolved_on: ticket.resolved_on(),
            resolved_by: ticket.resolved_by(),
            closed_on: ticket.closed_on(),
            closed_by: ticket.closed_by(),
            assignees: ticket.assignees().iter().copied().collect(),
        }
    }
}

/// What happened to a ticket and why.
///
/// Built once per engine call and never mutated afterwards. The snapshot is
/// absent only when the ticket was not found; a workflow rejection carries
/// the unchanged ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionOutcome<K> {
    kind: K,
    message: Cow<'static, str>,
    ticket_id: TicketId,
    actor: Option<UserId>,
    snapshot: Option<TicketSnapshot>,
}

impl<K: OutcomeKind> TransitionOutcome<K> {
    /// Outcome describing `ticket` as it stands at `now`.
    #[must_use]
    pub fn from_ticket(kind: K, ticket: &Ticket, actor: UserId, now: DateTime<Utc>) -> Self {
        Self {
            kind,
            message: Cow::Borrowed(kind.message()),
            ticket_id: ticket.id(),
            actor: Some(actor),
            snapshot: Some(TicketSnapshot::capture(ticket, now)),
        }
    }

    #[must_use]
    pub fn kind(&self) -> K {
        self.kind
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.kind.is_success()
    }
}

impl<K> TransitionOutcome<K> {
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn ticket_id(&self) -> TicketId {
        self.ticket_id
    }

    #[must_use]
    pub const fn actor(&self) -> Option<UserId> {
        self.actor
    }

    #[must_use]
    pub const fn snapshot(&self) -> Option<&TicketSnapshot> {
        self.snapshot.as_ref()
    }
}

impl<K: NotFoundKind> TransitionOutcome<K> {
    /// Outcome for a ticket id the repository does not know.
    #[must_use]
    pub fn not_found(ticket_id: TicketId) -> Self {
        Self {
            kind: K::NOT_FOUND,
            message: Cow::Borrowed(K::NOT_FOUND.message()),
            ticket_id,
            actor: None,
            snapshot: None,
        }
    }
}

impl<K: WorkflowGatedKind> TransitionOutcome<K> {
    /// Outcome for a transition a pre-transition workflow rejected.
    #[must_use]
    pub fn workflow_failed(
        ticket: &Ticket,
        actor: UserId,
        workflow: &WorkflowOutcome,
        now: DateTime<Utc>,
    ) -> Self {
        let message = workflow
            .message
            .clone()
            .filter(|message| !message.trim().is_empty())
            .map_or(Cow::Borrowed(messages::WORKFLOW_FAILED), Cow::Owned);

        Self {
            kind: K::WORKFLOW_FAILED,
            message,
            ticket_id: ticket.id(),
            actor: Some(actor),
            snapshot: Some(TicketSnapshot::capture(ticket, now)),
        }
    }
}
