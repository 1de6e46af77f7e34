//! Listing gate application service.

use std::sync::Arc;

use tracing::debug;

use dealgate_core::{AppError, AppResult, SessionId};
use dealgate_domain::{GatedListing, ListingId};

use crate::entitlement_ports::ListingCatalog;
use crate::entitlement_service::EntitlementService;


/// Serves listings with protected fields masked per session entitlement.
#[derive(Clone)]
pub struct ListingGateService {
    catalog: Arc<dyn ListingCatalog>,
    entitlement_service: EntitlementService,
}

impl ListingGateService {
    /// Creates a new listing gate service.
    #[must_use]
    pub fn new(catalog: Arc<dyn ListingCatalog>, entitlement_service: EntitlementService) -> Self {
        Self {
            catalog,
            entitlement_service,
        }
    }

    /// Returns one listing gated for the session.
    pub async fn view_listing(
        &self,
        session_id: SessionId,
        listing_id: &str,
    ) -> AppResult<GatedListing> {
        let listing_id = ListingId::new(listing_id)?;
        let listing = self
            .catalog
            .find_listing(&listing_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("listing '{listing_id}' was not found")))?;

        let entitlement_active = self.entitlement_service.is_active(session_id).await?;
        debug!(%session_id, %listing_id, entitlement_active, "gated listing view");

        Ok(GatedListing::resolve(&listing, entitlement_active))
    }

    /// Returns every listing gated for the session.
    ///
    /// Entitlement is evaluated once and applied to the whole page.
    pub async fn browse(&self, session_id: SessionId) -> AppResult<Vec<GatedListing>> {
        let entitlement_active = self.entitlement_service.is_active(session_id).await?;
        let listings = self.catalog.list_listings().await?;
        debug!(
            %session_id,
            entitlement_active,
            listing_count = listings.len(),
            "gated listing browse"
        );

        Ok(listings
            .iter()
            .map(|listing| GatedListing::resolve(listing, entitlement_active))
            .collect())
    }
}
