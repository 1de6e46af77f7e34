use std::sync::Arc;

use dealgate_application::{
    EntitlementRepository, EntitlementService, ListingCatalog, ListingGateService,
};
use dealgate_infrastructure::SystemClock;

use crate::api_config::ApiConfig;
use crate::state::AppState;

pub fn build_app_state(
    config: &ApiConfig,
    entitlement_repository: Arc<dyn EntitlementRepository>,
    listing_catalog: Arc<dyn ListingCatalog>,
) -> AppState {
    let entitlement_service = EntitlementService::new(
        entitlement_repository,
        Arc::new(SystemClock::new()),
        config.plan_policy.clone(),
    );

    AppState {
        listing_gate_service: ListingGateService::new(listing_catalog, entitlement_service.clone()),
        entitlement_service,
        frontend_url: config.frontend_url.clone(),
        entitlement_store: config.entitlement_store.name(),
    }
}
