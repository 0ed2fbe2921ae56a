use chrono::Utc;
use tracing::instrument;

use super::{Aftermath, TransitionEngine};
use crate::{
    domain::{
        events::DomainEvent,
        identifiers::{TicketId, UserId},
        operation::TicketOperation,
        workflow::WorkflowRequest,
    },
    outcomes::{ReopenKind, ReopenOutcome},
    Result,
};

impl TransitionEngine {
    /// Reopen a ticket, clearing its resolved and closed fields together.
    ///
    /// There is no status guard; the `before_reopen` workflow decides.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository, the gate runner or the event
    /// publisher faults.
    #[instrument(name = "ticket_transition", skip(self), fields(operation = "reopen"))]
    pub async fn reopen(&self, ticket_id: TicketId, actor: UserId) -> Result<ReopenOutcome> {
        let now = Utc::now();
        let Some(mut ticket) = self.load(ticket_id).await? else {
            return Ok(ReopenOutcome::not_found(ticket_id));
        };

        let gate = self
            .run_gate(WorkflowRequest::before(TicketOperation::Reopen, ticket_id, actor))
            .await?;
        if !gate.is_success() {
            return Ok(ReopenOutcome::workflow_failed(&ticket, actor, &gate, now));
        }

        ticket.reopen();
        self.commit(
            &ticket,
            Aftermath::PostEffects(TicketOperation::Reopen, actor),
            DomainEvent::ticket_reopened(ticket_id, actor, now),
        )
        .await?;

        tracing::info!(status = %ticket.status_at(now), "Ticket reopened");
        Ok(ReopenOutcome::from_ticket(ReopenKind::Reopened, &ticket, actor, now))
    }
}
