//! In-process collaborator implementations.
//!
//! Useful for embedding the engine without infrastructure and for tests.
//! Every adapter is cheap to clone; clones share state.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{
    mpsc::{self, error::TrySendError},
    RwLock,
};

use crate::domain::{
    collaborators::{
        CollaboratorError, EventPublisher, Notifier, RepositoryError, RepositoryResult,
        TicketLinkRepository, TicketRepository, WorkflowRunner,
    },
    events::DomainEvent,
    identifiers::TicketId,
    link::TicketLink,
    notification::Notification,
    ticket::Ticket,
    workflow::{WorkflowOutcome, WorkflowRequest},
};

// ============================================================================
// TICKETS
// ============================================================================

/// Ticket store backed by a map. Lookups hand out clones.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTicketStore {
    tickets: Arc<RwLock<HashMap<TicketId, Ticket>>>,
}

impl InMemoryTicketStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_tickets(tickets: impl IntoIterator<Item = Ticket>) -> Self {
        let map = tickets
            .into_iter()
            .map(|ticket| (ticket.id(), ticket))
            .collect();
        Self {
            tickets: Arc::new(RwLock::new(map)),
        }
    }

    /// Insert or replace a ticket without going through `save`.
    pub async fn insert(&self, ticket: Ticket) {
        self.tickets.write().await.insert(ticket.id(), ticket);
    }

    pub async fn len(&self) -> usize {
        self.tickets.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tickets.read().await.is_empty()
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketStore {
    async fn find_by_id(&self, id: TicketId) -> RepositoryResult<Option<Ticket>> {
        Ok(self.tickets.read().await.get(&id).cloned())
    }

    async fn save(&self, ticket: &Ticket) -> RepositoryResult<()> {
        self.tickets.write().await.insert(ticket.id(), ticket.clone());
        Ok(())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Ticket>> {
        let mut tickets: Vec<_> = self.tickets.read().await.values().cloned().collect();
        tickets.sort_by_key(Ticket::id);
        Ok(tickets)
    }

    async fn exists(&self, id: TicketId) -> RepositoryResult<bool> {
        Ok(self.tickets.read().await.contains_key(&id))
    }
}

// ============================================================================
// LINKS
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct InMemoryLinkStore {
    links: Arc<RwLock<Vec<TicketLink>>>,
}

impl InMemoryLinkStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<TicketLink> {
        self.links.read().await.clone()
    }
}

#[async_trait]
impl TicketLinkRepository for InMemoryLinkStore {
    async fn find_link(&self, a: TicketId, b: TicketId) -> RepositoryResult<Option<TicketLink>> {
        Ok(self
            .links
            .read()
            .await
            .iter()
            .find(|link| link.pair.joins(a, b))
            .copied())
    }

    async fn add(&self, link: TicketLink) -> RepositoryResult<()> {
        let mut links = self.links.write().await;
        let (from, to) = (link.pair.from_id(), link.pair.to_id());
        if links.iter().any(|existing| existing.pair.joins(from, to)) {
            return Err(RepositoryError::conflict(format!(
                "tickets {from} and {to} are already linked"
            )));
        }
        links.push(link);
        Ok(())
    }

    async fn remove(&self, link: &TicketLink) -> RepositoryResult<()> {
        let mut links = self.links.write().await;
        let before = links.len();
        links.retain(|existing| existing != link);
        if links.len() == before {
            return Err(RepositoryError::conflict(format!(
                "no link between {} and {}",
                link.pair.from_id(),
                link.pair.to_id()
            )));
        }
        Ok(())
    }
}

// ============================================================================
// WORKFLOWS
// ============================================================================

/// Answers workflow requests from a script keyed by request name
/// (e.g. `before_reopen`). Unscripted requests get the default outcome.
#[derive(Debug, Clone)]
pub struct ScriptedWorkflowRunner {
    script: Arc<RwLock<HashMap<String, WorkflowOutcome>>>,
    default: WorkflowOutcome,
    requests: Arc<RwLock<Vec<WorkflowRequest>>>,
}

impl Default for ScriptedWorkflowRunner {
    fn default() -> Self {
        Self::with_default(WorkflowOutcome::succeeded())
    }
}

impl ScriptedWorkflowRunner {
    /// Runner that lets every workflow succeed until scripted otherwise.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_default(default: WorkflowOutcome) -> Self {
        Self {
            script: Arc::new(RwLock::new(HashMap::new())),
            default,
            requests: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Answer requests named `name` with `outcome`.
    pub async fn script(&self, name: impl Into<String>, outcome: WorkflowOutcome) {
        self.script.write().await.insert(name.into(), outcome);
    }

    /// Every request seen so far, in arrival order.
    pub async fn requests(&self) -> Vec<WorkflowRequest> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl WorkflowRunner for ScriptedWorkflowRunner {
    async fn run(&self, request: &WorkflowRequest) -> Result<WorkflowOutcome, CollaboratorError> {
        self.requests.write().await.push(request.clone());
        let outcome = self
            .script
            .read()
            .await
            .get(&request.name())
            .cloned()
            .unwrap_or_else(|| self.default.clone());
        Ok(outcome)
    }
}

// ============================================================================
// NOTIFICATIONS
// ============================================================================

/// Notifier that pushes onto a bounded channel. Completion means queued;
/// a full or closed queue is refused without waiting.
#[derive(Debug, Clone)]
pub struct QueueingNotifier {
    sender: mpsc::Sender<Notification>,
}

impl QueueingNotifier {
    /// Create a notifier and the receiving end of its queue.
    #[must_use]
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Notification>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl Notifier for QueueingNotifier {
    async fn enqueue(&self, notification: Notification) -> Result<(), CollaboratorError> {
        self.sender.try_send(notification).map_err(|e| match e {
            TrySendError::Full(_) => {
                CollaboratorError::Notification("notification queue is full".into())
            }
            TrySendError::Closed(_) => {
                CollaboratorError::Notification("notification queue is closed".into())
            }
        })
    }
}

// ============================================================================
// EVENTS
// ============================================================================

/// Event publisher that appends to an in-memory log.
#[derive(Debug, Clone, Default)]
pub struct RecordingEventBus {
    events: Arc<RwLock<Vec<DomainEvent>>>,
}

impl RecordingEventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<DomainEvent> {
        self.events.read().await.clone()
    }

    pub async fn events_for(&self, ticket_id: TicketId) -> Vec<DomainEvent> {
        self.events
            .read()
            .await
            .iter()
            .filter(|event| event.ticket_id() == ticket_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl EventPublisher for RecordingEventBus {
    async fn publish(&self, event: &DomainEvent) -> Result<(), CollaboratorError> {
        self.events.write().await.push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::{
        identifiers::UserId,
        link::{LinkPair, LinkType},
        operation::TicketOperation,
    };

    fn id(value: i64) -> TicketId {
        TicketId::new(value).expect("valid id")
    }

    #[tokio::test]
    async fn test_store_hands_out_independent_copies() {
        let store = InMemoryTicketStore::with_tickets([Ticket::open(id(1), "a")]);

        let mut first = store.find_by_id(id(1)).await.expect("ok").expect("present");
        first.start(Utc::now()).expect("starts");

        let second = store.find_by_id(id(1)).await.expect("ok").expect("present");
        assert_eq!(second.started_on(), None);
    }

    #[tokio::test]
    async fn test_find_all_is_sorted_by_id() {
        let store = InMemoryTicketStore::with_tickets([
            Ticket::open(id(3), "c"),
            Ticket::open(id(1), "a"),
        ]);

        let ids: Vec<_> = store
            .find_all()
            .await
            .expect("ok")
            .iter()
            .map(Ticket::id)
            .collect();

        assert_eq!(ids, vec![id(1), id(3)]);
    }

    #[tokio::test]
    async fn test_link_lookup_ignores_direction() {
        let store = InMemoryLinkStore::new();
        let pair = LinkPair::new(id(1), id(2)).expect("distinct");
        store
            .add(TicketLink::new(pair, LinkType::Blocks))
            .await
            .expect("added");

        let found = store.find_link(id(2), id(1)).await.expect("ok");

        assert_eq!(found.map(|link| link.link_type), Some(LinkType::Blocks));
    }

    #[tokio::test]
    async fn test_duplicate_link_is_conflict() {
        let store = InMemoryLinkStore::new();
        let forward = LinkPair::new(id(1), id(2)).expect("distinct");
        let backward = LinkPair::new(id(2), id(1)).expect("distinct");
        store
            .add(TicketLink::new(forward, LinkType::Related))
            .await
            .expect("added");

        let result = store.add(TicketLink::new(backward, LinkType::Related)).await;

        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_scripted_runner_records_and_answers() {
        let runner = ScriptedWorkflowRunner::new();
        runner
            .script("before_reopen", WorkflowOutcome::failed("no"))
            .await;
        let actor = UserId::generate();

        let reopen = runner
            .run(&WorkflowRequest::before(TicketOperation::Reopen, id(1), actor))
            .await
            .expect("runs");
        let start = runner
            .run(&WorkflowRequest::before(TicketOperation::Start, id(1), actor))
            .await
            .expect("runs");

        assert!(!reopen.is_success());
        assert!(start.is_success());
        assert_eq!(runner.requests().await.len(), 2);
    }

    #[tokio::test]
    async fn test_notifier_fails_when_queue_closed() {
        let (notifier, receiver) = QueueingNotifier::channel(1);
        drop(receiver);

        let result = notifier
            .enqueue(Notification::new(TicketOperation::Pause, id(1), UserId::generate()))
            .await;

        assert!(matches!(result, Err(CollaboratorError::Notification(_))));
    }

    #[tokio::test]
    async fn test_notifier_refuses_when_queue_full() {
        let (notifier, _receiver) = QueueingNotifier::channel(1);
        let actor = UserId::generate();
        notifier
            .enqueue(Notification::new(TicketOperation::Start, id(1), actor))
            .await
            .expect("first notification fits");

        let second = tokio::time::timeout(
            std::time::Duration::from_millis(100),
            notifier.enqueue(Notification::new(TicketOperation::Start, id(2), actor)),
        )
        .await
        .expect("full queue must not block");

        assert_eq!(
            second,
            Err(CollaboratorError::Notification("notification queue is full".into()))
        );
    }
}
