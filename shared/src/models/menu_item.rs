//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu item entity (read-only from the client's perspective)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Price in rupees, always positive
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Display grouping key
    pub category: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub is_veg: bool,
    #[serde(default)]
    pub is_spicy: bool,
}

impl MenuItem {
    /// Whether the row carries a usable price
    pub fn has_valid_price(&self) -> bool {
        self.price > Decimal::ZERO
    }
}
