//! Outcomes for link and unlink operations.

use serde::Serialize;

use super::kinds::{NotFoundKind, OutcomeKind};
use crate::domain::{identifiers::TicketId, link::LinkType};

/// What happened to a link between two tickets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkOutcome<K> {
    kind: K,
    message: &'static str,
    from_ticket_id: TicketId,
    to_ticket_id: TicketId,
    link_type: Option<LinkType>,
    missing_ticket_id: Option<TicketId>,
}

impl<K: OutcomeKind> LinkOutcome<K> {
    /// Outcome for a pair of tickets; `link_type` is the link as it stands
    /// (added, removed, or already present).
    #[must_use]
    pub fn new(
        kind: K,
        from_ticket_id: TicketId,
        to_ticket_id: TicketId,
        link_type: Option<LinkType>,
    ) -> Self {
        Self {
            kind,
            message: kind.message(),
            from_ticket_id,
            to_ticket_id,
            link_type,
            missing_ticket_id: None,
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

    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.message
    }

    #[must_use]
    pub const fn from_ticket_id(&self) -> TicketId {
        self.from_ticket_id
    }

    #[must_use]
    pub const fn to_ticket_id(&self) -> TicketId {
        self.to_ticket_id
    }

    #[must_use]
    pub const fn link_type(&self) -> Option<LinkType> {
        self.link_type
    }

    /// Which side of the pair was missing, for `TicketNotFound`.
    #[must_use]
    pub const fn missing_ticket_id(&self) -> Option<TicketId> {
        self.missing_ticket_id
    }
}

impl<K: NotFoundKind> LinkOutcome<K> {
    #[must_use]
    pub fn not_found(from_ticket_id: TicketId, to_ticket_id: TicketId, missing: TicketId) -> Self {
        Self {
            missing_ticket_id: Some(missing),
            ..Self::new(K::NOT_FOUND, from_ticket_id, to_ticket_id, None)
        }
    }
}
