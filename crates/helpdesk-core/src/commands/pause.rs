use chrono::Utc;
use tracing::instrument;

use super::{Aftermath, TransitionEngine};
use crate::{
    domain::{
        events::DomainEvent,
        identifiers::{TicketId, UserId},
        operation::TicketOperation,
        status::TicketStatus,
    },
    outcomes::{PauseKind, PauseOutcome},
    Result,
};

impl TransitionEngine {
    /// Put a ticket on hold.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository or the event publisher faults.
    #[instrument(name = "ticket_transition", skip(self), fields(operation = "pause"))]
    pub async fn pause(&self, ticket_id: TicketId, actor: UserId) -> Result<PauseOutcome> {
        let now = Utc::now();
        let Some(mut ticket) = self.load(ticket_id).await? else {
            return Ok(PauseOutcome::not_found(ticket_id));
        };

        let blocked = match ticket.status_at(now) {
            TicketStatus::Resolved => Some(PauseKind::TicketAlreadyResolved),
            TicketStatus::Closed => Some(PauseKind::TicketAlreadyClosed),
            TicketStatus::OnHold => Some(PauseKind::TicketAlreadyPaused),
            _ => None,
        };
        if let Some(kind) = blocked {
            tracing::debug!(%kind, "Pause refused by guard");
            return Ok(PauseOutcome::from_ticket(kind, &ticket, actor, now));
        }

        ticket.pause(now)?;
        self.commit(
            &ticket,
            Aftermath::PostEffects(TicketOperation::Pause, actor),
            DomainEvent::ticket_paused(ticket_id, actor, now),
        )
        .await?;

        tracing::info!("Ticket paused");
        Ok(PauseOutcome::from_ticket(PauseKind::Paused, &ticket, actor, now))
    }
}
