use chrono::Utc;
use tracing::instrument;

use super::{Aftermath, TransitionEngine};
use crate::{
    domain::{
        events::DomainEvent,
        identifiers::{TicketId, UserId},
        status::TicketStatus,
    },
    outcomes::{AssignKind, AssignOutcome, UnassignKind, UnassignOutcome},
    Result,
};

impl TransitionEngine {
    /// Add `user` to a ticket's assignees.
    ///
    /// Assigning a current member is a successful no-op: nothing is saved
    /// and no event is published.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository or the event publisher faults.
    #[instrument(name = "ticket_transition", skip(self), fields(operation = "assign"))]
    pub async fn assign(&self, ticket_id: TicketId, user: UserId) -> Result<AssignOutcome> {
        let now = Utc::now();
        let Some(mut ticket) = self.load(ticket_id).await? else {
            return Ok(AssignOutcome::not_found(ticket_id));
        };

        let blocked = match ticket.status_at(now) {
            TicketStatus::Resolved => Some(AssignKind::TicketAlreadyResolved),
            TicketStatus::Closed => Some(AssignKind::TicketAlreadyClosed),
            _ => None,
        };
        if let Some(kind) = blocked {
            tracing::debug!(%kind, "Assign refused by guard");
            return Ok(AssignOutcome::from_ticket(kind, &ticket, user, now));
        }

        if ticket.assign(user, now)? {
            self.commit(
                &ticket,
                Aftermath::EventOnly,
                DomainEvent::ticket_assigned(ticket_id, user, now),
            )
            .await?;
            tracing::info!("Ticket assigned");
        } else {
            tracing::debug!("User already assigned");
        }

        Ok(AssignOutcome::from_ticket(AssignKind::Assigned, &ticket, user, now))
    }

    /// Remove `user` from a ticket's assignees.
    ///
    /// Removing a non-member is a successful no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository or the event publisher faults.
    #[instrument(name = "ticket_transition", skip(self), fields(operation = "unassign"))]
    pub async fn unassign(&self, ticket_id: TicketId, user: UserId) -> Result<UnassignOutcome> {
        let now = Utc::now();
        let Some(mut ticket) = self.load(ticket_id).await? else {
            return Ok(UnassignOutcome::not_found(ticket_id));
        };

        let blocked = match ticket.status_at(now) {
            TicketStatus::Resolved => Some(UnassignKind::TicketAlreadyResolved),
            TicketStatus::Closed => Some(UnassignKind::TicketAlreadyClosed),
            _ => None,
        };
        if let Some(kind) = blocked {
            tracing::debug!(%kind, "Unassign refused by guard");
            return Ok(UnassignOutcome::from_ticket(kind, &ticket, user, now));
        }

        if ticket.unassign(&user, now)? {
            self.commit(
                &ticket,
                Aftermath::EventOnly,
                DomainEvent::ticket_unassigned(ticket_id, user, now),
            )
            .await?;
            tracing::info!("Ticket unassigned");
        } else {
            tracing::debug!("User was not assigned");
        }

        Ok(UnassignOutcome::from_ticket(UnassignKind::Unassigned, &ticket, user, now))
    }
}
