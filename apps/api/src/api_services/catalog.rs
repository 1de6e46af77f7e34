use dealgate_core::AppError;
use dealgate_infrastructure::InMemoryListingCatalog;
use tracing::info;

use crate::api_config::ApiConfig;
use crate::dev_seed;

pub fn load_listing_catalog(config: &ApiConfig) -> Result<InMemoryListingCatalog, AppError> {
    let Some(listings_path) = config.listings_path.as_deref() else {
        info!("using bundled development listings");
        return dev_seed::seed_listing_catalog();
    };

    let contents = std::fs::read_to_string(listings_path).map_err(|error| {
        AppError::Internal(format!(
            "failed to read LISTINGS_PATH '{}': {error}",
            listings_path.display()
        ))
    })?;

    info!(path = %listings_path.display(), "loaded listing catalog");
    InMemoryListingCatalog::from_json(contents.as_str())
}
