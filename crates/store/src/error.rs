//! Store-level errors.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors from [`CommerceStore`](crate::CommerceStore) operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage layer failed to persist a write.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The operation needs a signed-in user with a stored record.
    #[error("not signed in")]
    NotAuthenticated,

    /// An order was placed with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// No order with the given id in the user's order list.
    #[error("order not found")]
    OrderNotFound,

    /// No user record under the given email.
    #[error("user not found")]
    UserNotFound,

    /// A signup reused an email already in the user table.
    #[error("email already registered")]
    EmailAlreadyRegistered,
}
