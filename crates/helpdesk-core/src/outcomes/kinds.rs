//! Closed outcome-kind enumerations, one per operation.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::messages;

/// Behaviour shared by every outcome kind.
pub trait OutcomeKind: Copy + Eq + std::fmt::Debug + Send + Sync + 'static {
    /// The kind reported when the operation took effect.
    const SUCCESS: Self;

    /// Message from the fixed lookup table.
    fn message(self) -> &'static str;

    fn is_success(self) -> bool {
        self == Self::SUCCESS
    }
}

/// Kinds for operations addressed to a single ticket that may be missing.
pub trait NotFoundKind: OutcomeKind {
    const NOT_FOUND: Self;
}

/// Kinds for operations gated by a pre-transition workflow.
pub trait WorkflowGatedKind: OutcomeKind {
    const WORKFLOW_FAILED: Self;
}

/// Declares a kind enum together with its message table entries.
///
/// The first variant is the success kind.
macro_rules! outcome_kind {
    (
        $(#[$attr:meta])*
        $name:ident {
            $success:ident => $success_message:expr,
            $($variant:ident => $message:expr),+ $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
        )]
        #[serde(rename_all = "snake_case")]
        #[strum(serialize_all = "snake_case")]
        pub enum $name {
            $success,
            $($variant),+
        }

        impl OutcomeKind for $name {
            const SUCCESS: Self = Self::$success;

            fn message(self) -> &'static str {
                match self {
                    Self::$success => $success_message,
                    $(Self::$variant => $message),+
                }
            }
        }
    };
}

macro_rules! not_found_kind {
    ($($name:ident),+ $(,)?) => {
        $(impl NotFoundKind for $name {
            const NOT_FOUND: Self = Self::TicketNotFound;
        })+
    };
}

outcome_kind! {
    StartKind {
        Started => messages::STARTED,
        TicketNotFound => messages::TICKET_NOT_FOUND,
        TicketAlreadyResolved => messages::TICKET_ALREADY_RESOLVED,
        TicketAlreadyClosed => messages::TICKET_ALREADY_CLOSED,
        TicketAlreadyStarted => messages::TICKET_ALREADY_STARTED,
        WorkflowFailed => messages::WORKFLOW_FAILED,
    }
}

outcome_kind! {
    PauseKind {
        Paused => messages::PAUSED,
        TicketNotFound => messages::TICKET_NOT_FOUND,
        TicketAlreadyResolved => messages::TICKET_ALREADY_RESOLVED,
        TicketAlreadyClosed => messages::TICKET_ALREADY_CLOSED,
        TicketAlreadyPaused => messages::TICKET_ALREADY_PAUSED,
    }
}

outcome_kind! {
    ResolveKind {
        Resolved => messages::RESOLVED,
        TicketNotFound => messages::TICKET_NOT_FOUND,
        TicketAlreadyResolved => messages::TICKET_ALREADY_RESOLVED,
        TicketAlreadyClosed => messages::TICKET_ALREADY_CLOSED,
    }
}

outcome_kind! {
    CloseKind {
        Closed => messages::CLOSED,
        TicketNotFound => messages::TICKET_NOT_FOUND,
        TicketAlreadyResolved => messages::TICKET_ALREADY_RESOLVED,
        TicketAlreadyClosed => messages::TICKET_ALREADY_CLOSED,
    }
}

outcome_kind! {
    ReopenKind {
        Reopened => messages::REOPENED,
        TicketNotFound => messages::TICKET_NOT_FOUND,
        WorkflowFailed => messages::WORKFLOW_FAILED,
    }
}

outcome_kind! {
    AssignKind {
        Assigned => messages::ASSIGNED,
        TicketNotFound => messages::TICKET_NOT_FOUND,
        TicketAlreadyResolved => messages::TICKET_ALREADY_RESOLVED,
        TicketAlreadyClosed => messages::TICKET_ALREADY_CLOSED,
    }
}

outcome_kind! {
    UnassignKind {
        Unassigned => messages::UNASSIGNED,
        TicketNotFound => messages::TICKET_NOT_FOUND,
        TicketAlreadyResolved => messages::TICKET_ALREADY_RESOLVED,
        TicketAlreadyClosed => messages::TICKET_ALREADY_CLOSED,
    }
}

outcome_kind! {
    LinkKind {
        Linked => messages::LINKED,
        TicketNotFound => messages::TICKET_NOT_FOUND,
        TicketsAlreadyLinked => messages::TICKETS_ALREADY_LINKED,
    }
}

outcome_kind! {
    UnlinkKind {
        Unlinked => messages::UNLINKED,
        TicketsNotLinked => messages::TICKETS_NOT_LINKED,
    }
}

not_found_kind!(
    StartKind,
    PauseKind,
    ResolveKind,
    CloseKind,
    ReopenKind,
    AssignKind,
    UnassignKind,
    LinkKind,
);

impl WorkflowGatedKind for StartKind {
    const WORKFLOW_FAILED: Self = Self::WorkflowFailed;
}

impl WorkflowGatedKind for ReopenKind {
    const WORKFLOW_FAILED: Self = Self::WorkflowFailed;
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_success_kind_is_first_variant() {
        assert_eq!(StartKind::SUCCESS, StartKind::Started);
        assert_eq!(UnlinkKind::SUCCESS, UnlinkKind::Unlinked);
        assert!(CloseKind::Closed.is_success());
        assert!(!CloseKind::TicketAlreadyResolved.is_success());
    }

    #[test]
    fn test_not_found_message_is_shared() {
        assert_eq!(
            CloseKind::NOT_FOUND.message(),
            ReopenKind::NOT_FOUND.message()
        );
        assert_eq!(LinkKind::NOT_FOUND.message(), "Ticket record was not found.");
    }

    #[test]
    fn test_every_kind_has_a_message() {
        let empty = StartKind::iter()
            .map(StartKind::message)
            .chain(PauseKind::iter().map(PauseKind::message))
            .chain(AssignKind::iter().map(AssignKind::message))
            .chain(UnlinkKind::iter().map(UnlinkKind::message))
            .filter(|message| message.is_empty())
            .count();
        assert_eq!(empty, 0);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&PauseKind::TicketAlreadyPaused).expect("serializes");
        assert_eq!(json, "\"ticket_already_paused\"");
        assert_eq!(PauseKind::TicketAlreadyPaused.to_string(), "ticket_already_paused");
    }
}
