use async_trait::async_trait;
use dealgate_application::ListingCatalog;
use dealgate_core::{AppError, AppResult};
use dealgate_domain::{Listing, ListingId};
use tracing::debug;

/// Read-only in-memory listing catalog.
#[derive(Debug, Default)]
pub struct InMemoryListingCatalog {
    listings: Vec<Listing>,
}

impl InMemoryListingCatalog {
    /// Creates a catalog holding `listings` in the given order.
    ///
    /// Fails when two listings share an id.
    pub fn new(listings: Vec<Listing>) -> AppResult<Self> {
        for (index, listing) in listings.iter().enumerate() {
            if listings[..index].iter().any(|other| other.id == listing.id) {
                return Err(AppError::Conflict(format!(
                    "duplicate listing id '{}'",
                    listing.id
                )));
            }
        }

        debug!(listing_count = listings.len(), "built listing catalog");
        Ok(Self { listings })
    }

    /// Parses a JSON array of listings.
    pub fn from_json(value: &str) -> AppResult<Self> {
        let listings = serde_json::from_str::<Vec<Listing>>(value)
            .map_err(|error| AppError::Validation(format!("invalid listing catalog: {error}")))?;
        Self::new(listings)
    }
}

#[async_trait]
impl ListingCatalog for InMemoryListingCatalog {
    async fn find_listing(&self, listing_id: &ListingId) -> AppResult<Option<Listing>> {
        Ok(self
            .listings
            .iter()
            .find(|listing| &listing.id == listing_id)
            .cloned())
    }

    async fn list_listings(&self) -> AppResult<Vec<Listing>> {
        Ok(self.listings.clone())
    }
}

#[cfg(test)]
mod tests {
    use dealgate_application::ListingCatalog;
    use dealgate_core::AppError;
    use dealgate_domain::ListingId;

    use super::InMemoryListingCatalog;

    const CATALOG: &str = r#"[
        {
            "id": "lst-7",
            "vehicle": {
                "year": 2022,
                "make": "Mazda",
                "model": "CX-5",
                "trim": "Turbo",
                "condition": "used",
                "body_style": "SUV",
                "exterior_color": "Soul Red",
                "interior_color": "Black",
                "mileage": 21000
            },
            "vin": "JM3KFBDY0N0123456",
            "pricing": {
                "msrp": 39000,
                "selling_price": 31500,
                "discount": 7500,
                "discount_percent": 19.2
            },
            "inventory": { "stock_number": "MZ-220", "days_in_stock": 104 },
            "dealer": {
                "name": "Harbor Mazda",
                "phone": "(555) 300-1200",
                "email": "deals@harbormazda.example",
                "location": "Tacoma, WA"
            }
        }
    ]"#;

    #[tokio::test]
    async fn catalog_loads_from_json_with_defaults() {
        let catalog = InMemoryListingCatalog::from_json(CATALOG);
        assert!(catalog.is_ok());
        let catalog = catalog.unwrap_or_default();

        let listing_id = ListingId::new("lst-7").unwrap_or_else(|_| unreachable!());
        let found = catalog.find_listing(&listing_id).await.unwrap_or_default();
        assert!(found.is_some());
        let found = found.unwrap_or_else(|| unreachable!());
        assert!(found.features.is_empty());
        assert_eq!(found.views, 0);
        assert!(found.is_hot_deal());
    }

    #[tokio::test]
    async fn missing_listing_is_none() {
        let catalog = InMemoryListingCatalog::from_json(CATALOG).unwrap_or_default();
        let listing_id = ListingId::new("lst-8").unwrap_or_else(|_| unreachable!());
        assert!(matches!(catalog.find_listing(&listing_id).await, Ok(None)));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let doubled = format!(
            "[{},{}]",
            CATALOG.trim().trim_start_matches('[').trim_end_matches(']'),
            CATALOG.trim().trim_start_matches('[').trim_end_matches(']')
        );
        assert!(matches!(
            InMemoryListingCatalog::from_json(doubled.as_str()),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_validation_error() {
        assert!(matches!(
            InMemoryListingCatalog::from_json("{"),
            Err(AppError::Validation(_))
        ));
    }
}
