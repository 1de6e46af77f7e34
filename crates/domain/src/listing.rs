//! Vehicle listings and the field policy that gates them.


use dealgate_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Days in stock after which a listing is flagged as a hot deal.
pub const HOT_DEAL_DAYS_IN_STOCK: u32 = 90;

/// Stable listing identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ListingId(NonEmptyString);

impl ListingId {
    /// Creates a validated listing identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        NonEmptyString::new(value)
            .map(Self)
            .map_err(|_| AppError::Validation("listing id must not be empty".to_owned()))
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for ListingId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ListingId> for String {
    fn from(value: ListingId) -> Self {
        value.0.into()
    }
}

impl std::fmt::Display for ListingId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Public vehicle specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleSpecs {
    /// Model year.
    pub year: u16,
    /// Manufacturer.
    pub make: String,
    /// Model name.
    pub model: String,
    /// Trim level.
    pub trim: String,
    /// New, used or certified.
    pub condition: String,
    /// Body style such as sedan or SUV.
    pub body_style: String,
    /// Exterior color.
    pub exterior_color: String,
    /// Interior color.
    pub interior_color: String,
    /// Odometer reading in miles.
    pub mileage: u32,
}

/// Advertised pricing, already computed upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    /// Manufacturer suggested retail price in dollars.
    pub msrp: u32,
    /// Dealer asking price in dollars.
    pub selling_price: u32,
    /// Discount off MSRP in dollars.
    pub discount: u32,
    /// Discount off MSRP as a percentage.
    pub discount_percent: f64,
}

/// Dealer inventory bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    /// Dealer stock number. Protected.
    pub stock_number: String,
    /// Days the vehicle has been on the lot.
    pub days_in_stock: u32,
}

/// Selling dealer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dealer {
    /// Dealership name. Protected.
    pub name: String,
    /// Contact phone. Protected.
    pub phone: String,
    /// Contact email. Protected.
    pub email: String,
    /// City and state.
    pub location: String,
}

/// Vehicle listing as supplied by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Stable listing id.
    pub id: ListingId,
    /// Public vehicle specification.
    pub vehicle: VehicleSpecs,
    /// Full vehicle identification number. Protected.
    pub vin: String,
    /// Advertised pricing.
    pub pricing: Pricing,
    /// Inventory details.
    pub inventory: Inventory,
    /// Selling dealer.
    pub dealer: Dealer,
    /// Highlighted features.
    #[serde(default)]
    pub features: Vec<String>,
    /// Detail page views.
    #[serde(default)]
    pub views: u64,
    /// Marketplace deal heat score.
    #[serde(default)]
    pub deal_heat_score: u32,
}

impl Listing {
    /// Returns whether the vehicle has sat long enough to signal a motivated
    /// dealer.
    #[must_use]
    pub fn is_hot_deal(&self) -> bool {
        self.inventory.days_in_stock > HOT_DEAL_DAYS_IN_STOCK
    }
}

/// Addressable listing attributes.
///
/// Whether a field is protected is fixed policy shared by every listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingField {
    /// Model year.
    Year,
    /// Manufacturer.
    Make,
    /// Model name.
    Model,
    /// Trim level.
    Trim,
    /// Vehicle condition.
    Condition,
    /// Body style.
    BodyStyle,
    /// Exterior color.
    ExteriorColor,
    /// Interior color.
    InteriorColor,
    /// Odometer reading.
    Mileage,
    /// Manufacturer suggested retail price.
    Msrp,
    /// Asking price.
    SellingPrice,
    /// Discount amount and percentage.
    Discount,
    /// Features list.
    Features,
    /// Days in stock.
    DaysInStock,
    /// Detail page views.
    Views,
    /// Deal heat score.
    DealHeatScore,
    /// Dealer city and state.
    DealerLocation,
    /// Dealership name.
    DealerName,
    /// Dealer phone.
    DealerPhone,
    /// Dealer email.
    DealerEmail,
    /// Full VIN.
    Vin,
    /// Dealer stock number.
    StockNumber,
}

impl ListingField {
    /// Returns a stable transport value for this field.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Make => "make",
            Self::Model => "model",
            Self::Trim => "trim",
            Self::Condition => "condition",
            Self::BodyStyle => "body_style",
            Self::ExteriorColor => "exterior_color",
            Self::InteriorColor => "interior_color",
            Self::Mileage => "mileage",
            Self::Msrp => "msrp",
            Self::SellingPrice => "selling_price",
            Self::Discount => "discount",
            Self::Features => "features",
            Self::DaysInStock => "days_in_stock",
            Self::Views => "views",
            Self::DealHeatScore => "deal_heat_score",
            Self::DealerLocation => "dealer_location",
            Self::DealerName => "dealer_name",
            Self::DealerPhone => "dealer_phone",
            Self::DealerEmail => "dealer_email",
            Self::Vin => "vin",
            Self::StockNumber => "stock_number",
        }
    }

    /// Returns all known fields.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[ListingField] = &[
            ListingField::Year,
            ListingField::Make,
            ListingField::Model,
            ListingField::Trim,
            ListingField::Condition,
            ListingField::BodyStyle,
            ListingField::ExteriorColor,
            ListingField::InteriorColor,
            ListingField::Mileage,
            ListingField::Msrp,
            ListingField::SellingPrice,
            ListingField::Discount,
            ListingField::Features,
            ListingField::DaysInStock,
            ListingField::Views,
            ListingField::DealHeatScore,
            ListingField::DealerLocation,
            ListingField::DealerName,
            ListingField::DealerPhone,
            ListingField::DealerEmail,
            ListingField::Vin,
            ListingField::StockNumber,
        ];

        ALL
    }

    /// Returns whether the field is hidden until access is purchased.
    #[must_use]
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Self::DealerName | Self::DealerPhone | Self::DealerEmail | Self::Vin | Self::StockNumber
        )
    }

    /// Returns the fields that are visible without access.
    pub fn public() -> impl Iterator<Item = Self> {
        Self::all().iter().copied().filter(|field| !field.is_protected())
    }

    /// Returns the fields hidden without access.
    pub fn protected() -> impl Iterator<Item = Self> {
        Self::all().iter().copied().filter(Self::is_protected)
    }
}
