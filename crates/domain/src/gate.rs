//! Listing visibility decisions.

use serde::{Deserialize, Serialize};

use crate::listing::{Listing, ListingField, ListingId, Pricing, VehicleSpecs};

/// How much of a listing is exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityMode {
    /// Every field is visible.
    Full,
    /// Protected fields are withheld.
    Masked,
}

impl VisibilityMode {
    /// Returns a stable transport value for this mode.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Masked => "masked",
        }
    }
}

/// Prompt the presentation layer should show next to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallToAction {
    /// Offer the access pass tiers.
    PurchaseAccess,
}

impl CallToAction {
    /// Returns a stable transport value for this prompt.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PurchaseAccess => "purchase_access",
        }
    }
}

/// Outcome of gating one listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityResult {
    /// Overall mode.
    pub mode: VisibilityMode,
    /// Fields the caller may render.
    pub visible_fields: Vec<ListingField>,
    /// Prompt shown when fields are withheld.
    pub call_to_action: Option<CallToAction>,
}

impl VisibilityResult {
    /// Returns whether `field` may be rendered.
    #[must_use]
    pub fn is_visible(&self, field: ListingField) -> bool {
        self.visible_fields.contains(&field)
    }
}

/// Decides which fields of `listing` are exposed.
///
/// Access is global, so the listing itself does not influence the outcome;
/// every listing in one pass receives the same decision.
#[must_use]
pub fn resolve_visibility(_listing: &Listing, entitlement_active: bool) -> VisibilityResult {
    if entitlement_active {
        VisibilityResult {
            mode: VisibilityMode::Full,
            visible_fields: ListingField::all().to_vec(),
            call_to_action: None,
        }
    } else {
        VisibilityResult {
            mode: VisibilityMode::Masked,
            visible_fields: ListingField::public().collect(),
            call_to_action: Some(CallToAction::PurchaseAccess),
        }
    }
}

/// Dealer details after gating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatedDealer {
    /// Dealership name, when visible.
    pub name: Option<String>,
    /// Contact phone, when visible.
    pub phone: Option<String>,
    /// Contact email, when visible.
    pub email: Option<String>,
    /// City and state.
    pub location: String,
}

/// Listing payload with protected fields removed according to a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatedListing {
    /// Stable listing id.
    pub id: ListingId,
    /// Mode the listing was projected with.
    pub mode: VisibilityMode,
    /// Prompt shown when fields are withheld.
    pub call_to_action: Option<CallToAction>,
    /// Public vehicle specification.
    pub vehicle: VehicleSpecs,
    /// Full VIN, when visible.
    pub vin: Option<String>,
    /// Stock number, when visible.
    pub stock_number: Option<String>,
    /// Advertised pricing.
    pub pricing: Pricing,
    /// Days the vehicle has been on the lot.
    pub days_in_stock: u32,
    /// Dealer details.
    pub dealer: GatedDealer,
    /// Highlighted features.
    pub features: Vec<String>,
    /// Detail page views.
    pub views: u64,
    /// Marketplace deal heat score.
    pub deal_heat_score: u32,
    /// Long-in-stock flag.
    pub hot_deal: bool,
}

impl GatedListing {
    /// Projects `listing` through `visibility`.
    #[must_use]
    pub fn project(listing: &Listing, visibility: &VisibilityResult) -> Self {
        let reveal = |field: ListingField, value: &str| {
            visibility.is_visible(field).then(|| value.to_owned())
        };

        Self {
            id: listing.id.clone(),
            mode: visibility.mode,
            call_to_action: visibility.call_to_action,
            vehicle: listing.vehicle.clone(),
            vin: reveal(ListingField::Vin, listing.vin.as_str()),
            stock_number: reveal(
                ListingField::StockNumber,
                listing.inventory.stock_number.as_str(),
            ),
            pricing: listing.pricing.clone(),
            days_in_stock: listing.inventory.days_in_stock,
            dealer: GatedDealer {
                name: reveal(ListingField::DealerName, listing.dealer.name.as_str()),
                phone: reveal(ListingField::DealerPhone, listing.dealer.phone.as_str()),
                email: reveal(ListingField::DealerEmail, listing.dealer.email.as_str()),
                location: listing.dealer.location.clone(),
            },
            features: listing.features.clone(),
            views: listing.views,
            deal_heat_score: listing.deal_heat_score,
            hot_deal: listing.is_hot_deal(),
        }
    }

    /// Gates `listing` in one step.
    #[must_use]
    pub fn resolve(listing: &Listing, entitlement_active: bool) -> Self {
        Self::project(listing, &resolve_visibility(listing, entitlement_active))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::listing::{Dealer, Inventory};

    fn sample_listing(days_in_stock: u32) -> Listing {
        Listing {
            id: ListingId::new("lst-1001").unwrap_or_else(|_| unreachable!()),
            vehicle: VehicleSpecs {
                year: 2024,
                make: "Toyota".to_owned(),
                model: "Camry".to_owned(),
                trim: "XSE V6".to_owned(),
                condition: "new".to_owned(),
                body_style: "Sedan".to_owned(),
                exterior_color: "Midnight Black".to_owned(),
                interior_color: "Red Leather".to_owned(),
                mileage: 12,
            },
            vin: "4T1K61AK5RU123456".to_owned(),
            pricing: Pricing {
                msrp: 38_500,
                selling_price: 33_900,
                discount: 4_600,
                discount_percent: 11.9,
            },
            inventory: Inventory {
                stock_number: "TC-44821".to_owned(),
                days_in_stock,
            },
            dealer: Dealer {
                name: "Lakeside Toyota".to_owned(),
                phone: "(555) 201-7788".to_owned(),
                email: "sales@lakesidetoyota.example".to_owned(),
                location: "Madison, WI".to_owned(),
            },
            features: vec!["Panoramic roof".to_owned(), "Adaptive cruise".to_owned()],
            views: 318,
            deal_heat_score: 87,
        }
    }

    #[test]
    fn locked_session_masks_dealer_contact_and_vin() {
        let listing = sample_listing(40);
        let gated = GatedListing::resolve(&listing, false);

        assert_eq!(gated.mode, VisibilityMode::Masked);
        assert_eq!(gated.call_to_action, Some(CallToAction::PurchaseAccess));
        assert_eq!(gated.dealer.phone, None);
        assert_eq!(gated.dealer.email, None);
        assert_eq!(gated.dealer.name, None);
        assert_eq!(gated.vin, None);
        assert_eq!(gated.stock_number, None);
        assert_eq!(gated.dealer.location, "Madison, WI");
        assert_eq!(gated.pricing.selling_price, 33_900);
        assert_eq!(gated.vehicle.make, "Toyota");
    }

    #[test]
    fn unlocked_session_sees_every_field() {
        let listing = sample_listing(40);
        let gated = GatedListing::resolve(&listing, true);

        assert_eq!(gated.mode, VisibilityMode::Full);
        assert_eq!(gated.call_to_action, None);
        assert_eq!(gated.dealer.phone.as_deref(), Some("(555) 201-7788"));
        assert_eq!(
            gated.dealer.email.as_deref(),
            Some("sales@lakesidetoyota.example")
        );
        assert_eq!(gated.vin.as_deref(), Some("4T1K61AK5RU123456"));
        assert_eq!(gated.stock_number.as_deref(), Some("TC-44821"));
    }

    #[test]
    fn hot_deal_flag_starts_after_ninety_days() {
        assert!(!GatedListing::resolve(&sample_listing(90), false).hot_deal);
        assert!(GatedListing::resolve(&sample_listing(91), false).hot_deal);
    }

    proptest! {
        #[test]
        fn protected_fields_follow_entitlement(active in any::<bool>(), days_in_stock in 0_u32..400) {
            let listing = sample_listing(days_in_stock);
            let first = resolve_visibility(&listing, active);
            let second = resolve_visibility(&listing, active);
            prop_assert_eq!(&first, &second);

            for field in ListingField::protected() {
                prop_assert_eq!(first.is_visible(field), active);
            }
            for field in ListingField::public() {
                prop_assert!(first.is_visible(field));
            }
        }
    }
}
