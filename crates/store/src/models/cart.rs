//! Cart line records and totals.

use serde::{Deserialize, Serialize};

use techedge_core::{Price, ProductId};

use super::product::Product;

/// One line in a cart: a product snapshot plus a quantity.
///
/// The product fields are copied at add time, so later catalog changes do
/// not rewrite lines already in a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub image: String,
    pub quantity: u32,
}

impl CartItem {
    /// Build a line from a catalog product. Quantities below one are
    /// bumped to one.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id,
            name: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: quantity.max(1),
        }
    }

    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity
    }
}

/// Computed cart pricing. Never persisted; derived from the lines and the
/// pricing rules at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
}

impl CartTotals {
    #[must_use]
    pub fn free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}
