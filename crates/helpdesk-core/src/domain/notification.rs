//! Human-facing notification payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    identifiers::{TicketId, UserId},
    operation::TicketOperation,
};

/// A notification queued after a committed transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub operation: TicketOperation,
    pub ticket_id: TicketId,
    pub actor: UserId,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    #[must_use]
    pub fn new(operation: TicketOperation, ticket_id: TicketId, actor: UserId) -> Self {
        Self {
            operation,
            ticket_id,
            actor,
            created_at: Utc::now(),
        }
    }
}
