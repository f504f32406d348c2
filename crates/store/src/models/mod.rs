//! Persisted domain records.
//!
//! Field names and JSON layouts match the records the storefront pages read
//! and write, so an existing storage file keeps working.

pub mod cart;
pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use cart::{CartItem, CartTotals};
pub use order::{Order, PaymentMeta};
pub use product::{PendingAdd, Product};
pub use session::Session;
pub use user::User;
