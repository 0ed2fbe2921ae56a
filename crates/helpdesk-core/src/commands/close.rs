use chrono::Utc;
use tracing::instrument;

use super::{Aftermath, TransitionEngine};
use crate::{
    domain::{
        events::DomainEvent,
        identifiers::{TicketId, UserId},
        status::TicketStatus,
    },
    outcomes::{CloseKind, CloseOutcome},
    Result,
};

impl TransitionEngine {
    /// Close a ticket.
    ///
    /// A resolved ticket is refused with `TicketAlreadyResolved`: closing
    /// after resolution is its own explicit path, never implied. Close runs
    /// no workflow and sends no notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository or the event publisher faults.
    #[instrument(name = "ticket_transition", skip(self), fields(operation = "close"))]
    pub async fn close(&self, ticket_id: TicketId, actor: UserId) -> Result<CloseOutcome> {
        let now = Utc::now();
        let Some(mut ticket) = self.load(ticket_id).await? else {
            return Ok(CloseOutcome::not_found(ticket_id));
        };

        let blocked = match ticket.status_at(now) {
            TicketStatus::Resolved => Some(CloseKind::TicketAlreadyResolved),
            TicketStatus::Closed => Some(CloseKind::TicketAlreadyClosed),
            _ => None,
        };
        if let Some(kind) = blocked {
            tracing::debug!(%kind, "Close refused by guard");
            return Ok(CloseOutcome::from_ticket(kind, &ticket, actor, now));
        }

        ticket.close(actor, now)?;
        self.commit(
            &ticket,
            Aftermath::EventOnly,
            DomainEvent::ticket_closed(ticket_id, actor, now),
        )
        .await?;

        tracing::info!("Ticket closed");
        Ok(CloseOutcome::from_ticket(CloseKind::Closed, &ticket, actor, now))
    }
}
