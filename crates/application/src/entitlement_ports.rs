mod clock;
mod plans;
mod repository;

pub use clock::Clock;
pub use plans::PlanPolicy;
pub use repository::{EntitlementRepository, ListingCatalog};
