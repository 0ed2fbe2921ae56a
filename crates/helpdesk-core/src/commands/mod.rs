//! # Transition Engine
//!
//! The command layer. Every operation follows the same phases:
//!
//! 1. **Load** the ticket; absence ends in a `TicketNotFound` outcome
//! 2. **Guard** on the derived status; a forbidden status ends in the
//!    matching "already" outcome with no collaborator touched
//! 3. **Pre-workflow** gate (start and reopen only); rejection ends in
//!    `WorkflowFailed` with nothing mutated or saved
//! 4. **Mutate** through the aggregate's guarded mutator
//! 5. **Persist** once; a failure here is returned and nothing else runs
//! 6. **Post-effects**: post-workflow and notification run as two spawned
//!    tasks and are both awaited; their failures are logged and absorbed
//! 7. **Publish** one domain event; a failure here is returned
//! 8. **Build** the outcome snapshot from the saved aggregate
//!
//! Saves happen before post-effects, and post-effects finish before the
//! event is published.

mod assign;
mod close;
mod link;
mod pause;
mod reopen;
mod resolve;
mod start;

use std::sync::Arc;

use tracing::Instrument;

use crate::{
    config::EngineConfig,
    domain::{
        collaborators::{
            EventPublisher, Notifier, TicketLinkRepository, TicketRepository, WorkflowRunner,
        },
        events::DomainEvent,
        identifiers::{TicketId, UserId},
        notification::Notification,
        operation::TicketOperation,
        ticket::Ticket,
        workflow::{WorkflowOutcome, WorkflowRequest},
    },
    Error, Result,
};

/// Collaborators injected into a [`TransitionEngine`].
#[derive(Clone)]
pub struct Collaborators {
    pub tickets: Arc<dyn TicketRepository>,
    pub links: Arc<dyn TicketLinkRepository>,
    pub workflows: Arc<dyn WorkflowRunner>,
    pub notifier: Arc<dyn Notifier>,
    pub events: Arc<dyn EventPublisher>,
}

/// Which collaborators run once a mutation is saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Aftermath {
    /// Publish the event only.
    EventOnly,
    /// Post-workflow and notification, then the event.
    PostEffects(TicketOperation, UserId),
}

/// Decides and coordinates ticket transitions.
///
/// Holds no per-ticket state. Each call loads its own copy of the
/// aggregate, so one engine can serve concurrent requests.
#[derive(Clone)]
pub struct TransitionEngine {
    tickets: Arc<dyn TicketRepository>,
    links: Arc<dyn TicketLinkRepository>,
    workflows: Arc<dyn WorkflowRunner>,
    notifier: Arc<dyn Notifier>,
    events: Arc<dyn EventPublisher>,
    config: EngineConfig,
}

impl std::fmt::Debug for TransitionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TransitionEngine {
    #[must_use]
    pub fn new(collaborators: Collaborators, config: EngineConfig) -> Self {
        let Collaborators {
            tickets,
            links,
            workflows,
            notifier,
            events,
        } = collaborators;

        Self {
            tickets,
            links,
            workflows,
            notifier,
            events,
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    async fn load(&self, ticket_id: TicketId) -> Result<Option<Ticket>> {
        let ticket = self.tickets.find_by_id(ticket_id).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to load ticket");
            Error::from(e)
        })?;

        match &ticket {
            Some(found) => tracing::debug!(title = found.title(), "Ticket loaded"),
            None => tracing::debug!("Ticket not found"),
        }
        Ok(ticket)
    }

    /// Run a pre-transition gate. A rejection is `Ok`; only a runner fault
    /// is an error.
    async fn run_gate(&self, request: WorkflowRequest) -> Result<WorkflowOutcome> {
        let name = request.name();
        let outcome = self.workflows.run(&request).await.map_err(|e| {
            tracing::error!(workflow = %name, error = %e, "Pre-transition workflow faulted");
            Error::Workflow(e)
        })?;

        if !outcome.is_success() {
            tracing::info!(
                workflow = %name,
                result = %outcome.result,
                workflow_message = outcome.message.as_deref().unwrap_or_default(),
                "Pre-transition workflow rejected the transition"
            );
        }
        Ok(outcome)
    }

    /// Persist, run the aftermath, then publish.
    async fn commit(
        &self,
        ticket: &Ticket,
        aftermath: Aftermath,
        event: DomainEvent,
    ) -> Result<()> {
        self.tickets.save(ticket).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to save ticket");
            Error::from(e)
        })?;

        if let Aftermath::PostEffects(operation, actor) = aftermath {
            self.run_post_effects(operation, ticket.id(), actor).await;
        }

        self.publish(&event).await
    }

    async fn publish(&self, event: &DomainEvent) -> Result<()> {
        self.events.publish(event).await.map_err(|e| {
            tracing::error!(event = event.event_type(), error = %e, "Failed to publish event");
            Error::Publish(e)
        })
    }

    /// Post-workflow and notification, concurrently and best-effort.
    ///
    /// Both tasks are always awaited. Errors, timeouts and panics are logged
    /// and never returned.
    async fn run_post_effects(
        &self,
        operation: TicketOperation,
        ticket_id: TicketId,
        actor: UserId,
    ) {
        let limit = self.config.post_effects.timeout();

        let workflows = Arc::clone(&self.workflows);
        let request = WorkflowRequest::after(operation, ticket_id, actor);
        let workflow_task = tokio::spawn(
            async move { tokio::time::timeout(limit, workflows.run(&request)).await }
                .in_current_span(),
        );

        let notifier = Arc::clone(&self.notifier);
        let notification = Notification::new(operation, ticket_id, actor);
        let notify_task = tokio::spawn(
            async move { tokio::time::timeout(limit, notifier.enqueue(notification)).await }
                .in_current_span(),
        );

        let (workflow, notification) = tokio::join!(workflow_task, notify_task);

        match workflow {
            Ok(Ok(Ok(outcome))) if outcome.is_success() => {
                tracing::debug!("Post-transition workflow succeeded");
            }
            Ok(Ok(Ok(outcome))) => tracing::warn!(
                result = %outcome.result,
                workflow_message = outcome.message.as_deref().unwrap_or_default(),
                "Post-transition workflow did not succeed"
            ),
            Ok(Ok(Err(e))) => tracing::warn!(error = %e, "Post-transition workflow faulted"),
            Ok(Err(_)) => tracing::warn!(?limit, "Post-transition workflow timed out"),
            Err(e) => tracing::warn!(error = %e, "Post-transition workflow task failed"),
        }

        match notification {
            Ok(Ok(Ok(()))) => tracing::debug!("Notification queued"),
            Ok(Ok(Err(e))) => tracing::warn!(error = %e, "Notification was not queued"),
            Ok(Err(_)) => tracing::warn!(?limit, "Notification enqueue timed out"),
            Err(e) => tracing::warn!(error = %e, "Notification task failed"),
        }
    }
}
