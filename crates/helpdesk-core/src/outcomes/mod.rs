//! # Outcome Model
//!
//! Every engine operation answers with an immutable outcome: a kind from a
//! closed per-operation enumeration, a message from the fixed
//! [`messages`] table, and a snapshot of the ticket taken at construction.
//!
//! Outcome kinds cover not-found, precondition and workflow rejections.
//! Infrastructure faults are [`crate::Error`] instead.

pub mod kinds;
pub mod link;
pub mod messages;
pub mod transition;

pub use kinds::{
    AssignKind, CloseKind, LinkKind, NotFoundKind, OutcomeKind, PauseKind, ReopenKind,
    ResolveKind, StartKind, UnassignKind, UnlinkKind, WorkflowGatedKind,
};
pub use link::LinkOutcome;
pub use transition::{TicketSnapshot, TransitionOutcome};

pub type StartOutcome = TransitionOutcome<StartKind>;
pub type PauseOutcome = TransitionOutcome<PauseKind>;
pub type ResolveOutcome = TransitionOutcome<ResolveKind>;
pub type CloseOutcome = TransitionOutcome<CloseKind>;
pub type ReopenOutcome = TransitionOutcome<ReopenKind>;
pub type AssignOutcome = TransitionOutcome<AssignKind>;
pub type UnassignOutcome = TransitionOutcome<UnassignKind>;
pub type TicketLinkOutcome = LinkOutcome<LinkKind>;
pub type TicketUnlinkOutcome = LinkOutcome<UnlinkKind>;
