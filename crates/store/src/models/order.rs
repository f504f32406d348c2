//! Order records and payment details.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use techedge_core::{OrderId, OrderStatus, PaymentMethod, Price};

use super::cart::CartItem;

/// Method-specific payment details captured at checkout.
///
/// Serialized untagged: the variants have disjoint field sets, so the stored
/// object keys alone identify the method, exactly as the page scripts wrote
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaymentMeta {
    #[serde(rename_all = "camelCase")]
    Bank { bank_name: String, reference: String },
    #[serde(rename_all = "camelCase")]
    Crypto { network: String, tx_hash: String },
    #[serde(rename_all = "camelCase")]
    Paypal { paypal_email: String },
}

impl PaymentMeta {
    /// The payment method these details belong to.
    #[must_use]
    pub const fn method(&self) -> PaymentMethod {
        match self {
            Self::Bank { .. } => PaymentMethod::Bank,
            Self::Crypto { .. } => PaymentMethod::Crypto,
            Self::Paypal { .. } => PaymentMethod::Paypal,
        }
    }
}

/// A placed order: a cart snapshot plus pricing, payment details, and
/// confirmation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    /// Cart lines copied at placement time; later cart edits do not touch
    /// the order.
    pub items: Vec<CartItem>,
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
    pub method: PaymentMethod,
    pub meta: PaymentMeta,
    pub status: OrderStatus,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Order {
    /// Record a simulated payment confirmation.
    pub fn mark_paid(&mut self, at: DateTime<Utc>, note: impl Into<String>) {
        self.status = OrderStatus::Paid;
        self.paid_at = Some(at);
        self.note = Some(note.into());
    }
}
