//! Kinds of operation the transition engine performs.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// One transition-engine operation.
///
/// Used to key workflow requests, notifications and log spans.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TicketOperation {
    Start,
    Pause,
    Resolve,
    Close,
    Reopen,
    Assign,
    Unassign,
    Link,
    Unlink,
}

impl TicketOperation {
    /// Static name used as a tracing field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
