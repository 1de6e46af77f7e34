mod conversions;
mod types;

pub use types::{GatedDealerResponse, GatedListingResponse};
