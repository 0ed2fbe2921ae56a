//! # Domain Layer
//!
//! Ticket domain model, independent of infrastructure concerns.
//!
//! ## Module Structure
//!
//! - **`identifiers`** - [`TicketId`] and [`UserId`] newtypes, validated on construction
//! - **`status`** - [`TicketStatus`] and the single [`derive_status`] function
//! - **`ticket`** - the [`Ticket`] aggregate root and its guarded mutators
//! - **`link`** - links between tickets; self-links are unrepresentable
//! - **`events`** - [`DomainEvent`] facts published after committed transitions
//! - **`workflow`** / **`notification`** - payloads handed to side-effect collaborators
//! - **`collaborators`** - repository, workflow, notifier and publisher traits
//! - **`selection`** - listing predicates built on status derivation
//!
//! ## Design Principles
//!
//! ### Status Is Derived, Never Stored
//!
//! ```rust,ignore
//! // BAD: a stored status can disagree with the timestamps
//! struct BadTicket { status: TicketStatus, closed_on: Option<DateTime<Utc>> }
//!
//! // GOOD: one function maps timestamps to status
//! let status = derive_status(&ticket.status_fields(), now);
//! ```
//!
//! ### Absence Is Not An Error
//!
//! Repositories return `Ok(None)` for missing tickets. The transition engine
//! turns that into a `TicketNotFound` outcome rather than a fault.

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod collaborators;
pub mod events;
pub mod identifiers;
pub mod link;
pub mod notification;
pub mod operation;
pub mod selection;
pub mod status;
pub mod ticket;
pub mod workflow;

pub use collaborators::{
    CollaboratorError, EventPublisher, Notifier, RepositoryError, RepositoryResult,
    TicketLinkRepository, TicketRepository, WorkflowRunner,
};
pub use events::DomainEvent;
pub use identifiers::{IdentifierError, TicketId, UserId};
pub use link::{LinkError, LinkPair, LinkType, TicketLink};
pub use notification::Notification;
pub use operation::TicketOperation;
pub use selection::TicketSelection;
pub use status::{derive_status, StatusFields, TicketStatus};
pub use ticket::{Ticket, TicketBuilder, TicketError};
pub use workflow::{WorkflowOutcome, WorkflowRequest, WorkflowResult, WorkflowStage};
