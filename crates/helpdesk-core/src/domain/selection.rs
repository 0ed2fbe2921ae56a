//! Selection predicates for listing tickets.
//!
//! Pure, side-effect free classifiers. Every status-based predicate asks
//! [`derive_status`](crate::domain::status::derive_status) through
//! [`Ticket::status_at`] rather than re-checking timestamp fields, so a
//! ticket lands in exactly one status view.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use im::OrdSet;
use itertools::Itertools;

use crate::domain::{
    identifiers::{TicketId, UserId},
    status::TicketStatus,
    ticket::Ticket,
};

/// A view over the ticket collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketSelection {
    All,
    ByIds(OrdSet<TicketId>),
    WithStatus(TicketStatus),
    AssignedTo(UserId),
}

impl TicketSelection {
    #[must_use]
    pub fn by_ids(ids: impl IntoIterator<Item = TicketId>) -> Self {
        Self::ByIds(ids.into_iter().collect())
    }

    #[must_use]
    pub const fn on_hold() -> Self {
        Self::WithStatus(TicketStatus::OnHold)
    }

    #[must_use]
    pub const fn resolved() -> Self {
        Self::WithStatus(TicketStatus::Resolved)
    }

    #[must_use]
    pub const fn approved() -> Self {
        Self::WithStatus(TicketStatus::Approved)
    }

    #[must_use]
    pub const fn overdue() -> Self {
        Self::WithStatus(TicketStatus::Overdue)
    }

    /// Check a single ticket.
    #[must_use]
    pub fn is_satisfied_by(&self, ticket: &Ticket, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::ByIds(ids) => ids.contains(&ticket.id()),
            Self::WithStatus(status) => ticket.status_at(now) == *status,
            Self::AssignedTo(user) => ticket.is_assigned(user),
        }
    }

    /// Keep the tickets that satisfy the selection, preserving order.
    #[must_use]
    pub fn select(
        &self,
        tickets: impl IntoIterator<Item = Ticket>,
        now: DateTime<Utc>,
    ) -> Vec<Ticket> {
        tickets
            .into_iter()
            .filter(|ticket| self.is_satisfied_by(ticket, now))
            .collect()
    }
}

/// Bucket ticket ids by their status at `now`.
#[must_use]
pub fn group_by_status<'a>(
    tickets: impl IntoIterator<Item = &'a Ticket>,
    now: DateTime<Utc>,
) -> HashMap<TicketStatus, Vec<TicketId>> {
    tickets
        .into_iter()
        .map(|ticket| (ticket.status_at(now), ticket.id()))
        .into_group_map()
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn id(value: i64) -> TicketId {
        TicketId::new(value).expect("valid id")
    }

    fn resolved_ticket(value: i64, at: DateTime<Utc>) -> Ticket {
        Ticket::builder(id(value))
            .resolved(at, None)
            .build()
            .expect("valid ticket")
    }

    #[test]
    fn test_resolved_selection_matches_only_resolved() {
        let now = Utc::now();
        let resolved = resolved_ticket(1, now);
        let open = Ticket::open(id(2), "open");
        let closed = Ticket::builder(id(3))
            .closed(now, None)
            .build()
            .expect("valid ticket");
        let overdue = Ticket::builder(id(4))
            .due_date(now - Duration::days(1))
            .build()
            .expect("valid ticket");

        let selection = TicketSelection::resolved();

        assert!(selection.is_satisfied_by(&resolved, now));
        assert!(!selection.is_satisfied_by(&open, now));
        assert!(!selection.is_satisfied_by(&closed, now));
        assert!(!selection.is_satisfied_by(&overdue, now));
    }

    #[test]
    fn test_on_hold_excludes_pending_approval() {
        let now = Utc::now();
        let paused = Ticket::builder(id(1))
            .paused_on(now)
            .build()
            .expect("valid ticket");
        let paused_awaiting_approval = Ticket::builder(id(2))
            .paused_on(now)
            .approval_requested_on(now)
            .build()
            .expect("valid ticket");

        let selection = TicketSelection::on_hold();

        assert!(selection.is_satisfied_by(&paused, now));
        assert!(!selection.is_satisfied_by(&paused_awaiting_approval, now));
    }

    #[test]
    fn test_approved_ticket_past_due_is_not_overdue() {
        let now = Utc::now();
        let approved_late = Ticket::builder(id(1))
            .approved_on(now - Duration::days(2))
            .due_date(now - Duration::days(1))
            .build()
            .expect("valid ticket");
        let late = Ticket::builder(id(2))
            .due_date(now - Duration::days(1))
            .build()
            .expect("valid ticket");

        let approved = TicketSelection::approved();
        let overdue = TicketSelection::overdue();

        assert!(approved.is_satisfied_by(&approved_late, now));
        assert!(!overdue.is_satisfied_by(&approved_late, now));
        assert!(overdue.is_satisfied_by(&late, now));
        assert!(!approved.is_satisfied_by(&late, now));
    }

    #[test]
    fn test_select_by_ids_preserves_order() {
        let now = Utc::now();
        let tickets = vec![
            Ticket::open(id(3), "c"),
            Ticket::open(id(1), "a"),
            Ticket::open(id(2), "b"),
        ];

        let selected = TicketSelection::by_ids([id(2), id(3)]).select(tickets, now);

        let ids: Vec<_> = selected.iter().map(Ticket::id).collect();
        assert_eq!(ids, vec![id(3), id(2)]);
    }

    #[test]
    fn test_assigned_to() {
        let now = Utc::now();
        let user = UserId::generate();
        let ticket = Ticket::builder(id(1))
            .assignees([user])
            .build()
            .expect("valid ticket");

        assert!(TicketSelection::AssignedTo(user).is_satisfied_by(&ticket, now));
        let stranger = TicketSelection::AssignedTo(UserId::generate());
        assert!(!stranger.is_satisfied_by(&ticket, now));
    }

    #[test]
    fn test_group_by_status() {
        let now = Utc::now();
        let tickets = vec![
            Ticket::open(id(1), "a"),
            resolved_ticket(2, now),
            Ticket::open(id(3), "c"),
        ];

        let groups = group_by_status(&tickets, now);

        assert_eq!(groups.get(&TicketStatus::Open), Some(&vec![id(1), id(3)]));
        assert_eq!(groups.get(&TicketStatus::Resolved), Some(&vec![id(2)]));
        assert_eq!(groups.get(&TicketStatus::Closed), None);
    }
}
