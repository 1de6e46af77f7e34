use dealgate_application::{EntitlementService, ListingGateService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub entitlement_service: EntitlementService,
    pub listing_gate_service: ListingGateService,
    pub frontend_url: String,
    pub entitlement_store: &'static str,
}
