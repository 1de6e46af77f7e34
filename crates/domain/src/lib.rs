//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod access;
mod entitlement;
mod gate;
mod listing;

pub use access::{AccessGrant, AccessPlan, GrantId, GrantRecord, PlanDuration};
pub use entitlement::{EntitlementState, EntitlementStatus};
pub use gate::{
    CallToAction, GatedDealer, GatedListing, VisibilityMode, VisibilityResult, resolve_visibility,
};
pub use listing::{
    Dealer, HOT_DEAL_DAYS_IN_STOCK, Inventory, Listing, ListingField, ListingId, Pricing,
    VehicleSpecs,
};
