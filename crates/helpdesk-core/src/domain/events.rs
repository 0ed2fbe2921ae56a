//! Domain events module
//!
//! Domain events are immutable facts published once per committed transition.
//! Other subsystems consume them; this crate only produces them.
//!
//! # Design Principles
//!
//! - **Immutable**: Events cannot be modified after creation
//! - **Serializable**: All events can be serialized for persistence and transmission
//! - **Keyed**: Every event names its ticket and, where there is one, its actor
//! - **Timestamped**: All events include when they occurred
//!
//! # Usage
//!
//! ```rust
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! use chrono::Utc;
//! use helpdesk_core::domain::{events::DomainEvent, TicketId, UserId};
//!
//! let event = DomainEvent::ticket_closed(TicketId::new(7)?, UserId::generate(), Utc::now());
//! assert_eq!(event.event_type(), "ticket_closed");
//! # Ok(())
//! # }
//! ```

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    identifiers::{TicketId, UserId},
    link::LinkType,
};

// ============================================================================
// Domain Event Enum
// ============================================================================

/// A fact about a ticket that has been committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", content = "data")]
pub enum DomainEvent {
    TicketStarted(TicketTransitionedEvent),
    TicketPaused(TicketTransitionedEvent),
    TicketResolved(TicketTransitionedEvent),
    TicketClosed(TicketTransitionedEvent),
    TicketReopened(TicketTransitionedEvent),
    TicketAssigned(TicketAssignmentEvent),
    TicketUnassigned(TicketAssignmentEvent),
    TicketsLinked(TicketsLinkedEvent),
    TicketsUnlinked(TicketsUnlinkedEvent),
}

impl DomainEvent {
    /// Get the timestamp for when this event occurred
    #[must_use]
    pub const fn timestamp(&self) -> &DateTime<Utc> {
        match self {
            Self::TicketStarted(e)
            | Self::TicketPaused(e)
            | Self::TicketResolved(e)
            | Self::TicketClosed(e)
            | Self::TicketReopened(e) => &e.timestamp,
            Self::TicketAssigned(e) | Self::TicketUnassigned(e) => &e.timestamp,
            Self::TicketsLinked(e) => &e.timestamp,
            Self::TicketsUnlinked(e) => &e.timestamp,
        }
    }

    /// Get the event type as a string
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::TicketStarted(_) => "ticket_started",
            Self::TicketPaused(_) => "ticket_paused",
            Self::TicketResolved(_) => "ticket_resolved",
            Self::TicketClosed(_) => "ticket_closed",
            Self::TicketReopened(_) => "ticket_reopened",
            Self::TicketAssigned(_) => "ticket_assigned",
            Self::TicketUnassigned(_) => "ticket_unassigned",
            Self::TicketsLinked(_) => "tickets_linked",
            Self::TicketsUnlinked(_) => "tickets_unlinked",
        }
    }

    /// The ticket the event is keyed by. Link events are keyed by their source.
    #[must_use]
    pub const fn ticket_id(&self) -> TicketId {
        match self {
            Self::TicketStarted(e)
            | Self::TicketPaused(e)
            | Self::TicketResolved(e)
            | Self::TicketClosed(e)
            | Self::TicketReopened(e) => e.ticket_id,
            Self::TicketAssigned(e) | Self::TicketUnassigned(e) => e.ticket_id,
            Self::TicketsLinked(e) => e.from_ticket_id,
            Self::TicketsUnlinked(e) => e.from_ticket_id,
        }
    }

    /// The acting or affected user, if the event has one.
    #[must_use]
    pub const fn actor(&self) -> Option<UserId> {
        match self {
            Self::TicketStarted(e)
            | Self::TicketPaused(e)
            | Self::TicketResolved(e)
            | Self::TicketClosed(e)
            | Self::TicketReopened(e) => Some(e.actor),
            Self::TicketAssigned(e) | Self::TicketUnassigned(e) => Some(e.user_id),
            Self::TicketsLinked(_) | Self::TicketsUnlinked(_) => None,
        }
    }

    #[must_use]
    pub const fn ticket_started(
        ticket_id: TicketId,
        actor: UserId,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self::TicketStarted(TicketTransitionedEvent::new(ticket_id, actor, timestamp))
    }

    #[must_use]
    pub const fn ticket_paused(
        ticket_id: TicketId,
        actor: UserId,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self::TicketPaused(TicketTransitionedEvent::new(ticket_id, actor, timestamp))
    }

    #[must_use]
    pub const fn ticket_resolved(
        ticket_id: TicketId,
        actor: UserId,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self::TicketResolved(TicketTransitionedEvent::new(ticket_id, actor, timestamp))
    }

    #[must_use]
    pub const fn ticket_closed(
        ticket_id: TicketId,
        actor: UserId,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self::TicketClosed(TicketTransitionedEvent::new(ticket_id, actor, timestamp))
    }

    #[must_use]
    pub const fn ticket_reopened(
        ticket_id: TicketId,
        actor: UserId,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self::TicketReopened(TicketTransitionedEvent::new(ticket_id, actor, timestamp))
    }

    #[must_use]
    pub const fn ticket_assigned(
        ticket_id: TicketId,
        user_id: UserId,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self::TicketAssigned(TicketAssignmentEvent {
            ticket_id,
            user_id,
            timestamp,
        })
    }

    #[must_use]
    pub const fn ticket_unassigned(
        ticket_id: TicketId,
        user_id: UserId,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self::TicketUnassigned(TicketAssignmentEvent {
            ticket_id,
            user_id,
            timestamp,
        })
    }

    #[must_use]
    pub const fn tickets_linked(
        from_ticket_id: TicketId,
        to_ticket_id: TicketId,
        link_type: LinkType,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self::TicketsLinked(TicketsLinkedEvent {
            from_ticket_id,
            to_ticket_id,
            link_type,
            timestamp,
        })
    }

    #[must_use]
    pub const fn tickets_unlinked(
        from_ticket_id: TicketId,
        to_ticket_id: TicketId,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self::TicketsUnlinked(TicketsUnlinkedEvent {
            from_ticket_id,
            to_ticket_id,
            timestamp,
        })
    }
}

// ============================================================================
// Event Types
// ============================================================================

/// A lifecycle transition performed by an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketTransitionedEvent {
    pub ticket_id: TicketId,
    pub actor: UserId,
    pub timestamp: DateTime<Utc>,
}

impl TicketTransitionedEvent {
    #[must_use]
    pub const fn new(ticket_id: TicketId, actor: UserId, timestamp: DateTime<Utc>) -> Self {
        Self {
            ticket_id,
            actor,
            timestamp,
        }
    }
}

/// A user joined or left a ticket's assignees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketAssignmentEvent {
    pub ticket_id: TicketId,
    pub user_id: UserId,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketsLinkedEvent {
    pub from_ticket_id: TicketId,
    pub to_ticket_id: TicketId,
    pub link_type: LinkType,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketsUnlinkedEvent {
    pub from_ticket_id: TicketId,
    pub to_ticket_id: TicketId,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: i64) -> TicketId {
        TicketId::new(value).expect("valid id")
    }

    #[test]
    fn test_event_keys() {
        let actor = UserId::generate();
        let event = DomainEvent::ticket_started(id(9), actor, Utc::now());

        assert_eq!(event.ticket_id(), id(9));
        assert_eq!(event.actor(), Some(actor));
        assert_eq!(event.event_type(), "ticket_started");
    }

    #[test]
    fn test_link_events_have_no_actor() {
        let event = DomainEvent::tickets_unlinked(id(1), id(2), Utc::now());

        assert_eq!(event.ticket_id(), id(1));
        assert_eq!(event.actor(), None);
    }

    #[test]
    fn test_serialized_tag_matches_event_type() {
        let event = DomainEvent::tickets_linked(id(1), id(2), LinkType::Blocks, Utc::now());
        let json = serde_json::to_value(&event).expect("serializes");

        assert_eq!(json["event_type"], "TicketsLinked");
        assert_eq!(json["data"]["link_type"], "blocks");

        let back: DomainEvent = serde_json::from_value(json).expect("deserializes");
        assert_eq!(back, event);
    }
}
