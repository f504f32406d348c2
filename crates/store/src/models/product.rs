//! Catalog product records.

use serde::{Deserialize, Serialize};

use techedge_core::{Price, ProductId};

/// A catalog product as returned by the remote endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// Products shown when the endpoint is unreachable and no cached copy
    /// exists.
    #[must_use]
    pub fn fallback_list() -> Vec<Self> {
        vec![Self {
            id: ProductId::new(101),
            title: "Demo Gadget".to_string(),
            price: Price::from_cents(29_99),
            description: "Demo product".to_string(),
            image: String::new(),
        }]
    }
}

/// A product a visitor tried to add before being sent to log in.
///
/// Held in transient storage across the login redirect and redeemed as a
/// single-quantity cart add once a session exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingAdd {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    #[serde(default)]
    pub image: String,
}

impl PendingAdd {
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
        }
    }

    /// Rebuild a product from the stashed payload.
    ///
    /// Used when the product cache no longer holds the original record; the
    /// description is lost, which is fine for a cart line.
    #[must_use]
    pub fn into_product(self) -> Product {
        Product {
            id: self.id,
            title: self.title,
            price: self.price,
            description: String::new(),
            image: self.image,
        }
    }
}
