//! Semantic identifier newtypes for the ticket domain.
//!
//! Parse at the boundary, validate once: a [`TicketId`] is always a positive
//! integer and a [`UserId`] is always a well-formed UUID.

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// ERRORS
// ============================================================================

/// Errors raised while parsing identifiers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentifierError {
    /// Ticket ids start at 1
    #[error("ticket id must be positive (got {0})")]
    NonPositiveTicketId(i64),

    /// Ticket id text was not an integer
    #[error("invalid ticket id '{0}'")]
    InvalidTicketId(String),

    /// User id text was not a UUID
    #[error("invalid user id '{0}'")]
    InvalidUserId(String),
}

// ============================================================================
// TICKET ID
// ============================================================================

/// Stable identifier of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TicketId(i64);

impl TicketId {
    /// Create a ticket id.
    ///
    /// # Errors
    ///
    /// Returns `IdentifierError::NonPositiveTicketId` for zero or negative values.
    pub const fn new(value: i64) -> Result<Self, IdentifierError> {
        if value <= 0 {
            return Err(IdentifierError::NonPositiveTicketId(value));
        }
        Ok(Self(value))
    }

    /// Get the raw integer value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for TicketId {
    type Error = IdentifierError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TicketId> for i64 {
    fn from(id: TicketId) -> Self {
        id.0
    }
}

impl FromStr for TicketId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map_err(|_| IdentifierError::InvalidTicketId(s.to_string()))
            .and_then(Self::new)
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// USER ID
// ============================================================================

/// Opaque identity of a user acting on, or assigned to, a ticket.
///
/// Authorization is not checked here; the id is only carried through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a fresh random user id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for UserId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| IdentifierError::InvalidUserId(s.to_string()))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
