//! Cart line item types.
//!
//! The serialized field names (`imageUrl` and friends) are part of the
//! persisted cart format; carts written by earlier releases must read back
//! unchanged.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use feira_core::ProductId;

/// One product entry in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Identifier of the referenced product.
    pub id: ProductId,
    /// Display name captured at add-time; not re-synced with the catalog.
    pub name: String,
    /// Unit price captured at add-time.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Invariant: `quantity >= 1` while the item exists in the cart.
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl LineItem {
    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Input to [`CartStore::add`]: a line item before it has a quantity.
///
/// [`CartStore::add`]: super::CartStore::add
#[derive(Debug, Clone)]
pub struct NewLineItem {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub image_url: Option<String>,
}

impl NewLineItem {
    pub(crate) fn into_line_item(self) -> LineItem {
        LineItem {
            id: self.id,
            name: self.name,
            price: self.price,
            quantity: 1,
            image_url: self.image_url,
        }
    }
}
