//! Workflow invocation values.
//!
//! A workflow call is two-phase data: the engine builds an immutable
//! [`WorkflowRequest`], the runner answers with a [`WorkflowOutcome`].
//! Neither side mutates the other's value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::domain::{
    identifiers::{TicketId, UserId},
    operation::TicketOperation,
};

/// Whether the workflow runs before the mutation (and may block it) or after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WorkflowStage {
    Before,
    After,
}

/// Request handed to a [`WorkflowRunner`](crate::domain::collaborators::WorkflowRunner).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRequest {
    pub stage: WorkflowStage,
    pub operation: TicketOperation,
    pub ticket_id: TicketId,
    pub actor: UserId,
    pub requested_at: DateTime<Utc>,
}

impl WorkflowRequest {
    #[must_use]
    pub fn before(operation: TicketOperation, ticket_id: TicketId, actor: UserId) -> Self {
        Self::new(WorkflowStage::Before, operation, ticket_id, actor)
    }

    #[must_use]
    pub fn after(operation: TicketOperation, ticket_id: TicketId, actor: UserId) -> Self {
        Self::new(WorkflowStage::After, operation, ticket_id, actor)
    }

    fn new(
        stage: WorkflowStage,
        operation: TicketOperation,
        ticket_id: TicketId,
        actor: UserId,
    ) -> Self {
        Self {
            stage,
            operation,
            ticket_id,
            actor,
            requested_at: Utc::now(),
        }
    }

    /// Name a runner can route on, e.g. `before_start`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}_{}", self.stage, self.operation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WorkflowResult {
    Succeeded,
    Failed,
    /// The runner had nothing registered for the request
    NotProcessed,
}

/// Answer from a workflow runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowOutcome {
    pub result: WorkflowResult,
    pub message: Option<String>,
}

impl WorkflowOutcome {
    #[must_use]
    pub const fn succeeded() -> Self {
        Self {
            result: WorkflowResult::Succeeded,
            message: None,
        }
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            result: WorkflowResult::Failed,
            message: Some(message.into()),
        }
    }

    #[must_use]
    pub const fn not_processed() -> Self {
        Self {
            result: WorkflowResult::NotProcessed,
            message: None,
        }
    }

    /// Only an explicit success lets a gated operation proceed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.result, WorkflowResult::Succeeded)
    }
}
