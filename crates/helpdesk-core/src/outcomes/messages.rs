//! Fixed lookup table of human-readable outcome messages.
//!
//! Every outcome message comes from here except `WorkflowFailed`, which
//! carries the workflow's own text.

pub const ASSIGNED: &str = "Ticket has been assigned.";
pub const CLOSED: &str = "Ticket has been closed.";
pub const PAUSED: &str = "Ticket has been paused.";
pub const REOPENED: &str = "Ticket has been reopened.";
pub const RESOLVED: &str = "Ticket has been resolved.";
pub const STARTED: &str = "Ticket has been started.";
pub const UNASSIGNED: &str = "Ticket has been unassigned.";

pub const TICKET_NOT_FOUND: &str = "Ticket record was not found.";
pub const TICKET_ALREADY_CLOSED: &str = "Ticket has already been closed.";
pub const TICKET_ALREADY_PAUSED: &str = "Ticket has already been paused.";
pub const TICKET_ALREADY_RESOLVED: &str = "Ticket has already been resolved.";
pub const TICKET_ALREADY_STARTED: &str = "Ticket has already been started.";

pub const LINKED: &str = "Tickets have been linked.";
pub const UNLINKED: &str = "Tickets have been unlinked.";
pub const TICKETS_ALREADY_LINKED: &str = "Tickets are already linked.";
pub const TICKETS_NOT_LINKED: &str = "Tickets are not linked.";

/// Used when a rejecting workflow gave no message of its own.
pub const WORKFLOW_FAILED: &str = "Workflow failed.";
