//! Store configuration.
//!
//! Everything tunable lives here with defaults matching the storefront
//! pages: storage key names, pricing rules, login rules, the catalog
//! endpoint, and the simulated payment delays. There is no environment or
//! file loading; callers construct a [`StoreConfig`] and override fields.

use std::time::Duration;

use techedge_core::{Email, Password, PaymentMethod, Price};

/// Top-level store configuration.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub keys: StorageKeys,
    pub pricing: PricingConfig,
    pub auth: AuthConfig,
    pub catalog: CatalogConfig,
    pub payments: PaymentDelays,
}

// =============================================================================
// Storage keys
// =============================================================================

/// Names of the storage keys holding each record.
///
/// Earlier storefront revisions drifted on these names (`users_v3`,
/// `cartItems_v1`, `currentUserEmail`); they are collapsed here into one
/// configurable set so every caller reads and writes the same slots.
#[derive(Debug, Clone)]
pub struct StorageKeys {
    /// The user table: a JSON array of user records.
    pub users: String,
    /// The active session record, present in at most one of the durable and
    /// transient stores.
    pub session: String,
    /// The anonymous cart used while nobody is signed in.
    pub cart: String,
    /// The cached product list from the last successful catalog fetch.
    pub products: String,
    /// The add-before-login payload, transient store only.
    pub pending_add: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            users: "techedge_users".to_string(),
            session: "techedge_session".to_string(),
            cart: "techedge_cart".to_string(),
            products: "techedge_products".to_string(),
            pending_add: "techedge_pending_add".to_string(),
        }
    }
}

// =============================================================================
// Pricing
// =============================================================================

/// Cart pricing rules.
#[derive(Debug, Clone, Copy)]
pub struct PricingConfig {
    /// Flat shipping fee applied below the free-shipping threshold.
    pub shipping_fee: Price,
    /// Subtotal above which shipping is free.
    pub free_shipping_over: Price,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            shipping_fee: Price::from_cents(5_00),
            free_shipping_over: Price::from_cents(150_00),
        }
    }
}

impl PricingConfig {
    /// Shipping for a given subtotal.
    ///
    /// Strictly-greater comparison: a subtotal exactly at the threshold
    /// still pays the fee.
    #[must_use]
    pub fn shipping_for(&self, subtotal: Price) -> Price {
        if subtotal > self.free_shipping_over {
            Price::ZERO
        } else {
            self.shipping_fee
        }
    }
}

// =============================================================================
// Authentication
// =============================================================================

/// Login and signup rules.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Minimum accepted password length, enforced at signup, login, and
    /// password change.
    pub min_password_length: usize,
    /// Credential pair accepted without a user table entry. `None` disables
    /// the bypass.
    pub demo_login: Option<DemoLogin>,
}

/// The demonstration bypass credential.
#[derive(Debug, Clone)]
pub struct DemoLogin {
    pub email: Email,
    pub password: Password,
}

impl DemoLogin {
    /// Whether a login attempt matches this pair.
    #[must_use]
    pub fn matches(&self, email: &Email, candidate: &str) -> bool {
        self.email == *email && self.password.verify(candidate)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            min_password_length: 6,
            demo_login: default_demo_login(),
        }
    }
}

fn default_demo_login() -> Option<DemoLogin> {
    let email = Email::parse("demo@demo.com").ok()?;
    Some(DemoLogin {
        email,
        password: Password::new("password"),
    })
}

// =============================================================================
// Catalog
// =============================================================================

/// Remote product catalog endpoint.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the product list endpoint.
    pub endpoint: String,
    /// Maximum number of products to request.
    pub limit: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://fakestoreapi.com/products".to_string(),
            limit: 16,
        }
    }
}

// =============================================================================
// Payment delays
// =============================================================================

/// Fixed delays simulating payment processing per method.
#[derive(Debug, Clone, Copy)]
pub struct PaymentDelays {
    pub bank: Duration,
    pub crypto: Duration,
    pub paypal: Duration,
}

impl Default for PaymentDelays {
    fn default() -> Self {
        Self {
            bank: Duration::from_millis(1800),
            crypto: Duration::from_millis(2000),
            paypal: Duration::from_millis(1400),
        }
    }
}

impl PaymentDelays {
    /// Delay before a payment of the given method confirms.
    #[must_use]
    pub const fn for_method(&self, method: PaymentMethod) -> Duration {
        match method {
            PaymentMethod::Bank => self.bank,
            PaymentMethod::Crypto => self.crypto,
            PaymentMethod::Paypal => self.paypal,
        }
    }
}
