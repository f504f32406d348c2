//! Authentication and account service.
//!
//! Validates the signup, login, and settings forms, owns the demo bypass
//! credential, and drives session state on a [`CommerceStore`].

mod error;

pub use error::AuthError;

use std::fmt;

use chrono::Utc;

use techedge_core::{Email, Password};

use crate::commerce::CommerceStore;
use crate::error::StoreError;
use crate::models::{Session, User};

/// Fields of the signup form.
#[derive(Clone)]
pub struct SignupForm {
    pub fullname: Option<String>,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub accept_terms: bool,
}

/// Fields of the login form.
#[derive(Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    /// Store the session durably instead of for this run only.
    pub remember: bool,
}

/// Fields of the password section of the settings form.
#[derive(Clone)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

/// Authentication and account management service.
#[derive(Debug, Clone)]
pub struct AuthService {
    store: CommerceStore,
}

impl AuthService {
    #[must_use]
    pub const fn new(store: CommerceStore) -> Self {
        Self { store }
    }

    /// The wrapped store.
    #[must_use]
    pub const fn store(&self) -> &CommerceStore {
        &self.store
    }

    // =========================================================================
    // Signup and login
    // =========================================================================

    /// Register a new account and sign it in.
    ///
    /// The fresh session always lands in the durable slot, and any stashed
    /// add-before-login payload is redeemed into the new cart.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail`, `AuthError::WeakPassword`,
    /// `AuthError::PasswordMismatch`, or `AuthError::TermsNotAccepted` when
    /// the form fails validation, and `AuthError::EmailTaken` (leaving the
    /// user table untouched) when the email is already registered.
    pub fn sign_up(&self, form: &SignupForm) -> Result<User, AuthError> {
        let email = Email::parse(&form.email)?;
        self.validate_password(&form.password)?;
        if form.password != form.password_confirm {
            return Err(AuthError::PasswordMismatch);
        }
        if !form.accept_terms {
            return Err(AuthError::TermsNotAccepted);
        }

        let user = User::new(
            email,
            Password::new(form.password.clone()),
            normalize_fullname(form.fullname.as_deref()),
            Utc::now(),
        );
        let user = match self.store.register_user(user) {
            Ok(user) => user,
            Err(StoreError::EmailAlreadyRegistered) => return Err(AuthError::EmailTaken),
            Err(error) => return Err(error.into()),
        };

        let session = Session::for_user(&user, Utc::now());
        self.store.write_session(&session, true)?;
        self.store.redeem_pending_add()?;

        // Re-read so a redeemed pending add shows in the returned cart.
        Ok(self.store.find_user(&user.email).unwrap_or(user))
    }

    /// Sign in with email and password.
    ///
    /// Checks run in the same order as the login page: email format, then
    /// password length, then the credential comparison. The configured demo
    /// pair signs in without a user table entry.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` or `AuthError::WeakPassword` when
    /// the form fails validation, and `AuthError::InvalidCredentials` when
    /// nothing matches.
    pub fn log_in(&self, form: &LoginForm) -> Result<Session, AuthError> {
        let email = Email::parse(&form.email)?;
        self.validate_password(&form.password)?;

        let now = Utc::now();
        let session = match self.store.find_user(&email) {
            Some(user) if user.password.verify(&form.password) => Session::for_user(&user, now),
            _ => {
                let demo = self.store.config().auth.demo_login.as_ref();
                if demo.is_some_and(|demo| demo.matches(&email, &form.password)) {
                    Session::for_email(email, now)
                } else {
                    return Err(AuthError::InvalidCredentials);
                }
            }
        };

        self.store.write_session(&session, form.remember)?;
        self.store.redeem_pending_add()?;
        Ok(session)
    }

    /// Clear the session, wherever it is stored.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the removal cannot be persisted.
    pub fn log_out(&self) -> Result<(), AuthError> {
        self.store.clear_session()?;
        Ok(())
    }

    // =========================================================================
    // Account management
    // =========================================================================

    /// The signed-in user's record.
    ///
    /// A session pointing at a missing record forces a logout and surfaces
    /// the broken state instead of silently returning nothing.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` without a session, and
    /// `AuthError::SessionDesync` (after clearing the session) when the
    /// user record is gone.
    pub fn current_user(&self) -> Result<User, AuthError> {
        let session = self
            .store
            .current_session()
            .ok_or(AuthError::NotAuthenticated)?;
        match self.store.find_user(&session.email) {
            Some(user) => Ok(user),
            None => {
                self.store.clear_session()?;
                Err(AuthError::SessionDesync)
            }
        }
    }

    /// Change the display name on the account and the live session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` or `AuthError::SessionDesync`
    /// per [`current_user`](Self::current_user).
    pub fn update_profile(&self, fullname: Option<&str>) -> Result<User, AuthError> {
        let mut user = self.current_user()?;
        user.fullname = normalize_fullname(fullname);
        let user = self.store.update_user(user)?;

        if let Some(mut session) = self.store.current_session() {
            session.fullname = user.fullname.clone();
            self.store.refresh_session(&session)?;
        }
        Ok(user)
    }

    /// Change the account password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the current password
    /// does not verify, and `AuthError::WeakPassword` or
    /// `AuthError::PasswordMismatch` when the new one fails validation.
    pub fn change_password(&self, form: &ChangePasswordForm) -> Result<(), AuthError> {
        let mut user = self.current_user()?;
        if !user.password.verify(&form.current_password) {
            return Err(AuthError::InvalidCredentials);
        }
        self.validate_password(&form.new_password)?;
        if form.new_password != form.confirm_new_password {
            return Err(AuthError::PasswordMismatch);
        }

        user.password = Password::new(form.new_password.clone());
        self.store.update_user(user)?;
        Ok(())
    }

    /// Remove the signed-in user's record and end the session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` or `AuthError::SessionDesync`
    /// per [`current_user`](Self::current_user).
    pub fn delete_account(&self) -> Result<(), AuthError> {
        let user = self.current_user()?;
        self.store.remove_user(&user.email)?;
        self.store.clear_session()?;
        Ok(())
    }

    fn validate_password(&self, password: &str) -> Result<(), AuthError> {
        let min = self.store.config().auth.min_password_length;
        if password.len() < min {
            return Err(AuthError::WeakPassword(format!(
                "password must be at least {min} characters"
            )));
        }
        Ok(())
    }
}

fn normalize_fullname(fullname: Option<&str>) -> Option<String> {
    let trimmed = fullname?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupForm")
            .field("fullname", &self.fullname)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("password_confirm", &"[REDACTED]")
            .field("accept_terms", &self.accept_terms)
            .finish()
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("remember", &self.remember)
            .finish()
    }
}

impl fmt::Debug for ChangePasswordForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangePasswordForm")
            .field("current_password", &"[REDACTED]")
            .field("new_password", &"[REDACTED]")
            .field("confirm_new_password", &"[REDACTED]")
            .finish()
    }
}
