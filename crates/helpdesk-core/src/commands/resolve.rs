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
    outcomes::{ResolveKind, ResolveOutcome},
    Result,
};

impl TransitionEngine {
    /// Mark a ticket resolved by `actor`.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository or the event publisher faults.
    #[instrument(name = "ticket_transition", skip(self), fields(operation = "resolve"))]
    pub async fn resolve(&self, ticket_id: TicketId, actor: UserId) -> Result<ResolveOutcome> {
        let now = Utc::now();
        let Some(mut ticket) = self.load(ticket_id).await? else {
            return Ok(ResolveOutcome::not_found(ticket_id));
        };

        let blocked = match ticket.status_at(now) {
            TicketStatus::Resolved => Some(ResolveKind::TicketAlreadyResolved),
            TicketStatus::Closed => Some(ResolveKind::TicketAlreadyClosed),
            _ => None,
        };
        if let Some(kind) = blocked {
            tracing::debug!(%kind, "Resolve refused by guard");
            return Ok(ResolveOutcome::from_ticket(kind, &ticket, actor, now));
        }

        ticket.resolve(actor, now)?;
        self.commit(
            &ticket,
            Aftermath::PostEffects(TicketOperation::Resolve, actor),
            DomainEvent::ticket_resolved(ticket_id, actor, now),
        )
        .await?;

        tracing::info!("Ticket resolved");
        Ok(ResolveOutcome::from_ticket(ResolveKind::Resolved, &ticket, actor, now))
    }
}
