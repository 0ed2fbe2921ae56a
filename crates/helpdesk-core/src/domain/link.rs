//! Links between tickets.
//!
//! A link is undirected for lookup purposes: `a → b` and `b → a` are the
//! same relationship. A ticket can never be linked to itself; [`LinkPair`]
//! makes that unrepresentable past the boundary.

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

use crate::domain::identifiers::TicketId;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    #[error("ticket {0} cannot be linked to itself")]
    SelfLink(TicketId),
}

/// Relationship carried by a link.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LinkType {
    #[default]
    Related,
    Blocks,
    Duplicates,
}

/// Two distinct tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkPair {
    from: TicketId,
    to: TicketId,
}

impl LinkPair {
    /// Pair two tickets.
    ///
    /// # Errors
    ///
    /// Returns `LinkError::SelfLink` if both ids are the same.
    pub fn new(from: TicketId, to: TicketId) -> Result<Self, LinkError> {
        if from == to {
            return Err(LinkError::SelfLink(from));
        }
        Ok(Self { from, to })
    }

    #[must_use]
    pub const fn from_id(&self) -> TicketId {
        self.from
    }

    #[must_use]
    pub const fn to_id(&self) -> TicketId {
        self.to
    }

    /// Whether this pair joins `a` and `b` in either direction.
    #[must_use]
    pub fn joins(&self, a: TicketId, b: TicketId) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

/// A persisted link between two tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketLink {
    pub pair: LinkPair,
    pub link_type: LinkType,
}

impl TicketLink {
    #[must_use]
    pub const fn new(pair: LinkPair, link_type: LinkType) -> Self {
        Self { pair, link_type }
    }
}
