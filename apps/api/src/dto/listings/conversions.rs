use dealgate_domain::{GatedDealer, GatedListing};

use super::types::{GatedDealerResponse, GatedListingResponse};

impl From<GatedDealer> for GatedDealerResponse {
    fn from(value: GatedDealer) -> Self {
        Self {
            name: value.name,
            phone: value.phone,
            email: value.email,
            location: value.location,
        }
    }
}

impl From<GatedListing> for GatedListingResponse {
    fn from(value: GatedListing) -> Self {
        Self {
            id: value.id.into(),
            mode: value.mode.as_str().to_owned(),
            call_to_action: value
                .call_to_action
                .map(|call_to_action| call_to_action.as_str().to_owned()),
            year: value.vehicle.year,
            make: value.vehicle.make,
            model: value.vehicle.model,
            trim: value.vehicle.trim,
            condition: value.vehicle.condition,
            body_style: value.vehicle.body_style,
            exterior_color: value.vehicle.exterior_color,
            interior_color: value.vehicle.interior_color,
            mileage: value.vehicle.mileage,
            vin: value.vin,
            stock_number: value.stock_number,
            msrp: value.pricing.msrp,
            selling_price: value.pricing.selling_price,
            discount: value.pricing.discount,
            discount_percent: value.pricing.discount_percent,
            days_in_stock: value.days_in_stock,
            dealer: GatedDealerResponse::from(value.dealer),
            features: value.features,
            views: value.views,
            deal_heat_score: value.deal_heat_score,
            hot_deal: value.hot_deal,
        }
    }
}
