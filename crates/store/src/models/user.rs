//! User account records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use techedge_core::{Email, Password};

use super::cart::CartItem;
use super::order::Order;

/// A stored user account. The email is the unique key into the user table.
///
/// The whole account lives in one record: credentials, the active cart, and
/// the order history. Records written by earlier storefront revisions may
/// lack the `cart`/`orders` arrays, so both default to empty on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: Email,
    pub password: Password,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub cart: Vec<CartItem>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl User {
    /// A freshly signed-up account with an empty cart and no orders.
    #[must_use]
    pub fn new(
        email: Email,
        password: Password,
        fullname: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            email,
            password,
            fullname,
            created_at,
            cart: Vec::new(),
            orders: Vec::new(),
        }
    }

    /// A placeholder record created when a cart is saved under a session
    /// whose user record is missing. Carries no credential, so it can never
    /// authenticate.
    #[must_use]
    pub fn stub(email: Email, cart: Vec<CartItem>, created_at: DateTime<Utc>) -> Self {
        Self {
            email,
            password: Password::empty(),
            fullname: None,
            created_at,
            cart,
            orders: Vec::new(),
        }
    }
}
