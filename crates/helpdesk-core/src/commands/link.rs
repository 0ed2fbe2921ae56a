use chrono::Utc;
use tracing::instrument;

use super::TransitionEngine;
use crate::{
    domain::{
        events::DomainEvent,
        identifiers::TicketId,
        link::{LinkPair, LinkType, TicketLink},
    },
    outcomes::{LinkKind, TicketLinkOutcome, TicketUnlinkOutcome, UnlinkKind},
    Error, Result,
};

impl TransitionEngine {
    /// Link two tickets.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` for a self-link, before any repository
    /// call. Returns an error if a repository or the event publisher faults.
    #[instrument(name = "ticket_transition", skip(self), fields(operation = "link"))]
    pub async fn link(
        &self,
        from: TicketId,
        to: TicketId,
        link_type: LinkType,
    ) -> Result<TicketLinkOutcome> {
        let pair = LinkPair::new(from, to)?;

        for id in [from, to] {
            let exists = self.tickets.exists(id).await.map_err(|e| {
                tracing::error!(ticket_id = %id, error = %e, "Failed to check ticket");
                Error::from(e)
            })?;
            if !exists {
                tracing::debug!(missing = %id, "Link target not found");
                return Ok(TicketLinkOutcome::not_found(from, to, id));
            }
        }

        if let Some(existing) = self.find_link(from, to).await? {
            tracing::debug!(link_type = %existing.link_type, "Tickets already linked");
            return Ok(TicketLinkOutcome::new(
                LinkKind::TicketsAlreadyLinked,
                from,
                to,
                Some(existing.link_type),
            ));
        }

        let now = Utc::now();
        self.links.add(TicketLink::new(pair, link_type)).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to add link");
            Error::from(e)
        })?;
        self.publish(&DomainEvent::tickets_linked(from, to, link_type, now))
            .await?;

        tracing::info!(%link_type, "Tickets linked");
        Ok(TicketLinkOutcome::new(LinkKind::Linked, from, to, Some(link_type)))
    }

    /// Remove the link between two tickets, in whichever direction it exists.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` for a self-unlink, before any repository
    /// call. Returns an error if the link repository or the event publisher
    /// faults.
    #[instrument(name = "ticket_transition", skip(self), fields(operation = "unlink"))]
    pub async fn unlink(&self, from: TicketId, to: TicketId) -> Result<TicketUnlinkOutcome> {
        LinkPair::new(from, to)?;

        let Some(link) = self.find_link(from, to).await? else {
            tracing::debug!("Tickets not linked");
            return Ok(TicketUnlinkOutcome::new(UnlinkKind::TicketsNotLinked, from, to, None));
        };

        let now = Utc::now();
        self.links.remove(&link).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to remove link");
            Error::from(e)
        })?;
        self.publish(&DomainEvent::tickets_unlinked(from, to, now))
            .await?;

        tracing::info!("Tickets unlinked");
        Ok(TicketUnlinkOutcome::new(UnlinkKind::Unlinked, from, to, Some(link.link_type)))
    }

    async fn find_link(&self, from: TicketId, to: TicketId) -> Result<Option<TicketLink>> {
        self.links.find_link(from, to).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to look up link");
            Error::from(e)
        })
    }
}
