//! Listing catalog bundled for local development.

use dealgate_core::AppResult;
use dealgate_infrastructure::InMemoryListingCatalog;

const DEV_SEED_LISTINGS: &str = include_str!("../seed/listings.json");

/// Builds the bundled development catalog.
pub fn seed_listing_catalog() -> AppResult<InMemoryListingCatalog> {
    InMemoryListingCatalog::from_json(DEV_SEED_LISTINGS)
}

#[cfg(test)]
mod tests {
    use dealgate_application::ListingCatalog;

    use super::seed_listing_catalog;

    #[tokio::test]
    async fn bundled_catalog_parses() {
        let catalog = seed_listing_catalog();
        assert!(catalog.is_ok());

        let listings = catalog
            .unwrap_or_default()
            .list_listings()
            .await
            .unwrap_or_default();
        assert_eq!(listings.len(), 4);
        assert!(listings.iter().any(|listing| listing.is_hot_deal()));
        assert!(listings.iter().any(|listing| !listing.is_hot_deal()));
    }
}
