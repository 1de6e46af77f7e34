mod conversions;
mod types;

pub use types::{
    AccessGrantResponse, AccessPlanResponse, AccessStatusResponse, PurchaseAccessRequest,
};
