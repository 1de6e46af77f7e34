use serde::Serialize;
use ts_rs::TS;

/// Dealer details after gating. Contact fields are null while locked.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/gated-dealer-response.ts"
)]
pub struct GatedDealerResponse {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub location: String,
}

/// API representation of a listing gated for the current session.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/gated-listing-response.ts"
)]
pub struct GatedListingResponse {
    pub id: String,
    pub mode: String,
    pub call_to_action: Option<String>,
    pub year: u16,
    pub make: String,
    pub model: String,
    pub trim: String,
    pub condition: String,
    pub body_style: String,
    pub exterior_color: String,
    pub interior_color: String,
    pub mileage: u32,
    pub vin: Option<String>,
    pub stock_number: Option<String>,
    pub msrp: u32,
    pub selling_price: u32,
    pub discount: u32,
    pub discount_percent: f64,
    pub days_in_stock: u32,
    pub dealer: GatedDealerResponse,
    pub features: Vec<String>,
    #[ts(type = "number")]
    pub views: u64,
    pub deal_heat_score: u32,
    pub hot_deal: bool,
}
