use chrono::Utc;
use tracing::instrument;

use super::{Aftermath, TransitionEngine};
use crate::{
    domain::{
        events::DomainEvent,
        identifiers::{TicketId, UserId},
        operation::TicketOperation,
        status::TicketStatus,
        workflow::WorkflowRequest,
    },
    outcomes::{StartKind, StartOutcome},
    Result,
};

impl TransitionEngine {
    /// Start work on a ticket.
    ///
    /// Forbidden when the ticket is resolved, closed or already in progress.
    /// Gated by the `before_start` workflow. Starting an on-hold ticket
    /// resumes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository, the gate runner or the event
    /// publisher faults.
    #[instrument(name = "ticket_transition", skip(self), fields(operation = "start"))]
    pub async fn start(&self, ticket_id: TicketId, actor: UserId) -> Result<StartOutcome> {
        let now = Utc::now();
        let Some(mut ticket) = self.load(ticket_id).await? else {
            return Ok(StartOutcome::not_found(ticket_id));
        };

        let blocked = match ticket.status_at(now) {
            TicketStatus::Resolved => Some(StartKind::TicketAlreadyResolved),
            TicketStatus::Closed => Some(StartKind::TicketAlreadyClosed),
            TicketStatus::InProgress => Some(StartKind::TicketAlreadyStarted),
            _ => None,
        };
        if let Some(kind) = blocked {
            tracing::debug!(%kind, "Start refused by guard");
            return Ok(StartOutcome::from_ticket(kind, &ticket, actor, now));
        }

        let gate = self
            .run_gate(WorkflowRequest::before(TicketOperation::Start, ticket_id, actor))
            .await?;
        if !gate.is_success() {
            return Ok(StartOutcome::workflow_failed(&ticket, actor, &gate, now));
        }

        ticket.start(now)?;
        self.commit(
            &ticket,
            Aftermath::PostEffects(TicketOperation::Start, actor),
            DomainEvent::ticket_started(ticket_id, actor, now),
        )
        .await?;

        tracing::info!("Ticket started");
        Ok(StartOutcome::from_ticket(StartKind::Started, &ticket, actor, now))
    }
}
