//! Property-based tests for status derivation and selection predicates.
//!
//! Invariants tested:
//! - Every field combination maps to exactly one status view
//! - Status views agree with `derive_status`
//! - Closed and resolved take precedence over everything else
//! - Reopen never leaves a ticket closed or resolved

#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use helpdesk_core::domain::{
    derive_status, StatusFields, Ticket, TicketId, TicketSelection, TicketStatus,
};
use proptest::prelude::*;
use strum::IntoEnumIterator;

fn status_config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        max_shrink_iters: 256,
        ..ProptestConfig::default()
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[derive(Debug, Clone, Copy)]
enum Due {
    Unset,
    Past,
    Future,
}

/// Build fields from "is set" flags in the order
/// started, paused, resolved, closed, approval requested, approved,
/// feedback requested.
fn fields_from(flags: [bool; 7], due: Due) -> StatusFields {
    let at = |set: bool, hours: i64| set.then(|| now() - Duration::hours(hours));
    StatusFields {
        started_on: at(flags[0], 10),
        paused_on: at(flags[1], 9),
        resolved_on: at(flags[2], 8),
        closed_on: at(flags[3], 7),
        approval_requested_on: at(flags[4], 6),
        approved_on: at(flags[5], 5),
        feedback_requested_on: at(flags[6], 4),
        due_date: match due {
            Due::Unset => None,
            Due::Past => Some(now() - Duration::hours(1)),
            Due::Future => Some(now() + Duration::hours(1)),
        },
    }
}

fn ticket_from(fields: StatusFields) -> Ticket {
    Ticket::builder(TicketId::new(1).expect("valid id"))
        .status_fields(fields)
        .build()
        .expect("no actors set")
}

fn due_strategy() -> impl Strategy<Value = Due> {
    prop_oneof![Just(Due::Unset), Just(Due::Past), Just(Due::Future)]
}

fn matching_views(ticket: &Ticket) -> Vec<TicketStatus> {
    TicketStatus::iter()
        .filter(|status| TicketSelection::WithStatus(*status).is_satisfied_by(ticket, now()))
        .collect()
}

#[test]
fn every_flag_combination_lands_in_exactly_one_view() {
    for bits in 0u8..128 {
        let flags: [bool; 7] = std::array::from_fn(|i| bits & (1 << i) != 0);
        for due in [Due::Unset, Due::Past, Due::Future] {
            let fields = fields_from(flags, due);
            let ticket = ticket_from(fields);

            let views = matching_views(&ticket);

            assert_eq!(views, vec![derive_status(&fields, now())], "{fields:?}");
        }
    }
}

proptest! {
    #![proptest_config(status_config())]

    #[test]
    fn prop_views_partition_tickets(
        flags in any::<[bool; 7]>(),
        due in due_strategy(),
    ) {
        let fields = fields_from(flags, due);
        let ticket = ticket_from(fields);

        let views = matching_views(&ticket);

        prop_assert_eq!(views.len(), 1);
        prop_assert_eq!(views[0], ticket.status_at(now()));
    }

    #[test]
    fn prop_closed_and_resolved_take_precedence(
        flags in any::<[bool; 7]>(),
        due in due_strategy(),
    ) {
        let fields = fields_from(flags, due);
        let status = derive_status(&fields, now());

        if fields.closed_on.is_some() {
            prop_assert_eq!(status, TicketStatus::Closed);
        } else if fields.resolved_on.is_some() {
            prop_assert_eq!(status, TicketStatus::Resolved);
        } else {
            prop_assert!(!status.is_finished());
        }
    }

    #[test]
    fn prop_open_only_without_fields(
        flags in any::<[bool; 7]>(),
        due in due_strategy(),
    ) {
        let fields = fields_from(flags, due);
        let untouched = !flags.iter().any(|set| *set) && !matches!(due, Due::Past);

        prop_assert_eq!(derive_status(&fields, now()) == TicketStatus::Open, untouched);
    }

    #[test]
    fn prop_reopen_never_leaves_ticket_finished(
        flags in any::<[bool; 7]>(),
        due in due_strategy(),
    ) {
        let mut ticket = ticket_from(fields_from(flags, due));

        ticket.reopen();

        prop_assert!(!ticket.status_at(now()).is_finished());
        prop_assert!(ticket.closed_on().is_none() && ticket.resolved_on().is_none());
    }
}
