//! Application services and ports.

#![forbid(unsafe_code)]

mod entitlement_ports;
mod entitlement_service;
mod listing_gate_service;

pub use entitlement_ports::{Clock, EntitlementRepository, ListingCatalog, PlanPolicy};
pub use entitlement_service::{EntitlementService, EntitlementSnapshot};
pub use listing_gate_service::ListingGateService;
