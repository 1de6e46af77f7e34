use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Access pass tier offered to buyers.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/access-plan-response.ts"
)]
pub struct AccessPlanResponse {
    pub duration_days: u32,
    pub label: String,
}

/// Incoming payload for a confirmed access pass purchase.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/purchase-access-request.ts"
)]
pub struct PurchaseAccessRequest {
    #[ts(type = "number")]
    pub duration_days: i64,
}

/// API representation of an access grant.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/access-grant-response.ts"
)]
pub struct AccessGrantResponse {
    pub grant_id: String,
    pub granted_at: String,
    pub duration_days: u32,
    pub expires_at: String,
}

/// API representation of the session's entitlement.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/access-status-response.ts"
)]
pub struct AccessStatusResponse {
    pub active: bool,
    pub evaluated_at: String,
    pub expires_at: Option<String>,
    #[ts(type = "number | null")]
    pub seconds_remaining: Option<i64>,
    pub grants: Vec<AccessGrantResponse>,
}
