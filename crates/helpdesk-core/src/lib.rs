//! # Helpdesk Core
//!
//! The ticket transition engine: decides whether a requested lifecycle
//! change is legal, applies it to the ticket aggregate, and coordinates the
//! workflows, notifications and domain events around it.
//!
//! ## Laws (Compiler Enforced)
//!
//! - No `unwrap()` / `expect()` / `panic!()` outside tests
//! - No `unsafe`
//!
//! ## Error Handling
//!
//! Business-rule rejections are outcome kinds (`TicketNotFound`,
//! `TicketAlreadyClosed`, `WorkflowFailed`, ...). Infrastructure faults are
//! [`Error`], returned through `?`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use helpdesk_core::{
//!     domain::{Ticket, TicketId, UserId},
//!     in_memory::{
//!         InMemoryLinkStore, InMemoryTicketStore, QueueingNotifier, RecordingEventBus,
//!         ScriptedWorkflowRunner,
//!     },
//!     Collaborators, EngineConfig, TransitionEngine,
//! };
//!
//! # async fn example() -> helpdesk_core::Result<()> {
//! let id = TicketId::new(1)?;
//! let (notifier, _queue) = QueueingNotifier::channel(16);
//! let engine = TransitionEngine::new(
//!     Collaborators {
//!         tickets: Arc::new(InMemoryTicketStore::with_tickets([Ticket::open(id, "VPN down")])),
//!         links: Arc::new(InMemoryLinkStore::new()),
//!         workflows: Arc::new(ScriptedWorkflowRunner::new()),
//!         notifier: Arc::new(notifier),
//!         events: Arc::new(RecordingEventBus::new()),
//!     },
//!     EngineConfig::default(),
//! );
//!
//! let outcome = engine.start(id, UserId::generate()).await?;
//! println!("{}", outcome.message());
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod in_memory;
pub mod logging;
pub mod outcomes;

pub use commands::{Collaborators, TransitionEngine};
pub use config::EngineConfig;
pub use error::{Error, Result};
