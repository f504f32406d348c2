//! Business logic services over the commerce store.
//!
//! # Services
//!
//! - `auth` - signup, login, the demo bypass, and account management
//! - `checkout` - order placement and simulated payment confirmation

pub mod auth;
pub mod checkout;

pub use auth::{AuthError, AuthService, ChangePasswordForm, LoginForm, SignupForm};
pub use checkout::{CheckoutError, CheckoutService, confirmation_note};
