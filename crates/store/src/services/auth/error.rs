//! Authentication error types.

use thiserror::Error;

use crate::error::StoreError;

/// Errors from authentication and account operations.
///
/// Validation variants carry the message shown inline on the form.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] techedge_core::EmailError),

    /// Password shorter than the configured minimum.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Terms checkbox left unchecked at signup.
    #[error("terms and conditions not accepted")]
    TermsNotAccepted,

    /// Wrong password, or no account under that email.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Signup with an email already registered.
    #[error("email already registered")]
    EmailTaken,

    /// The operation needs a signed-in user.
    #[error("not signed in")]
    NotAuthenticated,

    /// The session pointed at a user record that no longer exists. The
    /// session has been cleared.
    #[error("session out of sync with user table")]
    SessionDesync,

    /// Store or storage failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
