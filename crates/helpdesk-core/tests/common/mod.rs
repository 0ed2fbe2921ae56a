//! Call-recording collaborator mocks for transition engine tests.
//!
//! Every mock appends to one shared [`CallLog`] so tests can assert both
//! which collaborators were touched and in what order.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use helpdesk_core::{
    config::{EngineConfig, PostEffectsConfig},
    domain::{
        CollaboratorError, DomainEvent, EventPublisher, Notification, Notifier, RepositoryError,
        RepositoryResult, Ticket, TicketId, TicketLink, TicketLinkRepository, TicketOperation,
        TicketRepository, UserId, WorkflowOutcome, WorkflowRequest, WorkflowRunner,
    },
    Collaborators, TransitionEngine,
};
use tokio::sync::Barrier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FindTicket(TicketId),
    SaveTicket(TicketId),
    FindLink(TicketId, TicketId),
    AddLink(TicketId, TicketId),
    RemoveLink(TicketId, TicketId),
    Workflow(String),
    Notify(TicketOperation, TicketId),
    Publish(&'static str),
    /// A post-effect got past the shared barrier.
    Rendezvous(&'static str),
}

impl Call {
    pub const fn is_side_effect(&self) -> bool {
        matches!(
            self,
            Self::SaveTicket(_)
                | Self::AddLink(..)
                | Self::RemoveLink(..)
                | Self::Workflow(_)
                | Self::Notify(..)
                | Self::Publish(_)
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    fn record(&self, call: Call) {
        self.0.lock().expect("call log poisoned").push(call);
    }

    pub fn all(&self) -> Vec<Call> {
        self.0.lock().expect("call log poisoned").clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.all().iter().filter(|call| predicate(call)).count()
    }

    pub fn position(&self, predicate: impl Fn(&Call) -> bool) -> Option<usize> {
        self.all().iter().position(predicate)
    }

    pub fn side_effects(&self) -> Vec<Call> {
        self.all().into_iter().filter(Call::is_side_effect).collect()
    }
}

// ============================================================================
// MOCKS
// ============================================================================

pub struct MockTicketRepository {
    tickets: Mutex<HashMap<TicketId, Ticket>>,
    calls: CallLog,
    fail_save: bool,
}

impl MockTicketRepository {
    pub fn stored(&self, id: TicketId) -> Option<Ticket> {
        self.tickets.lock().expect("store poisoned").get(&id).cloned()
    }
}

#[async_trait]
impl TicketRepository for MockTicketRepository {
    async fn find_by_id(&self, id: TicketId) -> RepositoryResult<Option<Ticket>> {
        self.calls.record(Call::FindTicket(id));
        Ok(self.stored(id))
    }

    async fn save(&self, ticket: &Ticket) -> RepositoryResult<()> {
        self.calls.record(Call::SaveTicket(ticket.id()));
        if self.fail_save {
            return Err(RepositoryError::storage_error("disk unavailable"));
        }
        self.tickets
            .lock()
            .expect("store poisoned")
            .insert(ticket.id(), ticket.clone());
        Ok(())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Ticket>> {
        Ok(self
            .tickets
            .lock()
            .expect("store poisoned")
            .values()
            .cloned()
            .collect())
    }
}

pub struct MockLinkRepository {
    links: Mutex<Vec<TicketLink>>,
    calls: CallLog,
    fail_find: bool,
}

impl MockLinkRepository {
    pub fn links(&self) -> Vec<TicketLink> {
        self.links.lock().expect("links poisoned").clone()
    }
}

#[async_trait]
impl TicketLinkRepository for MockLinkRepository {
    async fn find_link(&self, a: TicketId, b: TicketId) -> RepositoryResult<Option<TicketLink>> {
        self.calls.record(Call::FindLink(a, b));
        if self.fail_find {
            return Err(RepositoryError::storage_error("link index offline"));
        }
        Ok(self.links().into_iter().find(|link| link.pair.joins(a, b)))
    }

    async fn add(&self, link: TicketLink) -> RepositoryResult<()> {
        self.calls
            .record(Call::AddLink(link.pair.from_id(), link.pair.to_id()));
        self.links.lock().expect("links poisoned").push(link);
        Ok(())
    }

    async fn remove(&self, link: &TicketLink) -> RepositoryResult<()> {
        self.calls
            .record(Call::RemoveLink(link.pair.from_id(), link.pair.to_id()));
        self.links
            .lock()
            .expect("links poisoned")
            .retain(|existing| existing != link);
        Ok(())
    }
}

pub struct MockWorkflowRunner {
    script: HashMap<String, Result<WorkflowOutcome, CollaboratorError>>,
    calls: CallLog,
    delay: Option<Duration>,
    barrier: Option<Arc<Barrier>>,
}

#[async_trait]
impl WorkflowRunner for MockWorkflowRunner {
    async fn run(&self, request: &WorkflowRequest) -> Result<WorkflowOutcome, CollaboratorError> {
        let name = request.name();
        self.calls.record(Call::Workflow(name.clone()));

        if name.starts_with("after_") {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if let Some(barrier) = &self.barrier {
                barrier.wait().await;
                self.calls.record(Call::Rendezvous("workflow"));
            }
        }

        self.script
            .get(&name)
            .cloned()
            .unwrap_or_else(|| Ok(WorkflowOutcome::succeeded()))
    }
}

pub struct MockNotifier {
    calls: CallLog,
    fail: bool,
    delay: Option<Duration>,
    barrier: Option<Arc<Barrier>>,
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn enqueue(&self, notification: Notification) -> Result<(), CollaboratorError> {
        self.calls
            .record(Call::Notify(notification.operation, notification.ticket_id));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
            self.calls.record(Call::Rendezvous("notify"));
        }
        if self.fail {
            return Err(CollaboratorError::Notification("mailbox full".into()));
        }
        Ok(())
    }
}

pub struct MockEventPublisher {
    events: Mutex<Vec<DomainEvent>>,
    calls: CallLog,
    fail: bool,
}

impl MockEventPublisher {
    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().expect("events poisoned").clone()
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), CollaboratorError> {
        self.calls.record(Call::Publish(event.event_type()));
        if self.fail {
            return Err(CollaboratorError::Publish("bus offline".into()));
        }
        self.events
            .lock()
            .expect("events poisoned")
            .push(event.clone());
        Ok(())
    }
}

// ============================================================================
// HARNESS
// ============================================================================

/// Knobs for one engine under test.
pub struct Setup {
    pub tickets: Vec<Ticket>,
    pub links: Vec<TicketLink>,
    pub workflows: Vec<(&'static str, Result<WorkflowOutcome, CollaboratorError>)>,
    pub fail_save: bool,
    pub fail_find_link: bool,
    pub fail_notify: bool,
    pub fail_publish: bool,
    pub post_effect_delay: Option<Duration>,
    pub post_effect_barrier: bool,
    pub timeout_ms: u64,
}

impl Default for Setup {
    fn default() -> Self {
        Self {
            tickets: Vec::new(),
            links: Vec::new(),
            workflows: Vec::new(),
            fail_save: false,
            fail_find_link: false,
            fail_notify: false,
            fail_publish: false,
            post_effect_delay: None,
            post_effect_barrier: false,
            timeout_ms: 2_000,
        }
    }
}

impl Setup {
    pub fn with_tickets(tickets: impl IntoIterator<Item = Ticket>) -> Self {
        Self {
            tickets: tickets.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn build(self) -> Harness {
        let calls = CallLog::default();
        let barrier = self
            .post_effect_barrier
            .then(|| Arc::new(Barrier::new(2)));

        let tickets = Arc::new(MockTicketRepository {
            tickets: Mutex::new(self.tickets.into_iter().map(|t| (t.id(), t)).collect()),
            calls: calls.clone(),
            fail_save: self.fail_save,
        });
        let links = Arc::new(MockLinkRepository {
            links: Mutex::new(self.links),
            calls: calls.clone(),
            fail_find: self.fail_find_link,
        });
        let workflows = Arc::new(MockWorkflowRunner {
            script: self
                .workflows
                .into_iter()
                .map(|(name, outcome)| (name.to_string(), outcome))
                .collect(),
            calls: calls.clone(),
            delay: self.post_effect_delay,
            barrier: barrier.clone(),
        });
        let notifier = Arc::new(MockNotifier {
            calls: calls.clone(),
            fail: self.fail_notify,
            delay: self.post_effect_delay,
            barrier,
        });
        let events = Arc::new(MockEventPublisher {
            events: Mutex::new(Vec::new()),
            calls: calls.clone(),
            fail: self.fail_publish,
        });

        let config = EngineConfig {
            post_effects: PostEffectsConfig {
                timeout_ms: self.timeout_ms,
            },
            ..EngineConfig::default()
        };

        let engine = TransitionEngine::new(
            Collaborators {
                tickets: tickets.clone(),
                links: links.clone(),
                workflows,
                notifier,
                events: events.clone(),
            },
            config,
        );

        Harness {
            engine,
            calls,
            tickets,
            links,
            events,
        }
    }
}

pub struct Harness {
    pub engine: TransitionEngine,
    pub calls: CallLog,
    pub tickets: Arc<MockTicketRepository>,
    pub links: Arc<MockLinkRepository>,
    pub events: Arc<MockEventPublisher>,
}

// ============================================================================
// FIXTURES
// ============================================================================

pub fn id(value: i64) -> TicketId {
    TicketId::new(value).expect("valid id")
}

pub fn hours_ago(hours: i64) -> DateTime<Utc> {
    Utc::now() - chrono::Duration::hours(hours)
}

pub fn open_ticket(value: i64) -> Ticket {
    Ticket::open(id(value), format!("ticket {value}"))
}

pub fn resolved_ticket(value: i64) -> Ticket {
    Ticket::builder(id(value))
        .started_on(hours_ago(3))
        .resolved(hours_ago(1), Some(UserId::generate()))
        .build()
        .expect("valid ticket")
}

pub fn closed_ticket(value: i64) -> Ticket {
    Ticket::builder(id(value))
        .started_on(hours_ago(5))
        .resolved(hours_ago(3), Some(UserId::generate()))
        .closed(hours_ago(2), Some(UserId::generate()))
        .build()
        .expect("valid ticket")
}
