use serde::Serialize;
use ts_rs::TS;

mod access;
mod listings;

pub use access::{
    AccessGrantResponse, AccessPlanResponse, AccessStatusResponse, PurchaseAccessRequest,
};
pub use listings::{GatedDealerResponse, GatedListingResponse};

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
    pub entitlement_store: &'static str,
}
