//! Stored credential type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A stored account password.
///
/// The storefront is a demo: passwords persist in the user table as
/// plaintext. Every credential check goes through [`Password::verify`],
/// the one place that touches the stored value, so a hashed scheme can
/// replace the storage format later without touching callers.
///
/// `Debug` output is redacted. The plaintext leaves this type only via
/// serialization into the user table.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    /// Wrap a raw password as typed at signup.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The empty password carried by stub user records, created when a
    /// cart is saved under a session that has no matching user.
    #[must_use]
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// Compare a login attempt against the stored value.
    ///
    /// Exact, case-sensitive comparison. The empty stub credential never
    /// matches, so placeholder records cannot be logged into.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        !self.0.is_empty() && self.0 == candidate
    }

    /// Length in bytes of the stored value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the stored value is the empty stub credential.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(\"[REDACTED]\")")
    }
}

impl From<String> for Password {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for Password {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_exact_match() {
        let password = Password::new("hunter2secret");
        assert!(password.verify("hunter2secret"));
    }

    #[test]
    fn test_verify_rejects_mismatch() {
        let password = Password::new("hunter2secret");
        assert!(!password.verify("hunter2secre"));
        assert!(!password.verify("hunter2secret "));
        assert!(!password.verify(""));
    }

    #[test]
    fn test_verify_is_case_sensitive() {
        let password = Password::new("Secret123");
        assert!(!password.verify("secret123"));
    }

    #[test]
    fn test_empty_stub_never_verifies() {
        let password = Password::empty();
        assert!(password.is_empty());
        assert_eq!(password.len(), 0);
        assert!(!password.verify(""));
        assert!(!password.verify("anything"));
    }

    #[test]
    fn test_debug_is_redacted() {
        let password = Password::new("hunter2secret");
        let debug = format!("{password:?}");
        assert!(!debug.contains("hunter2secret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let password = Password::new("hunter2secret");
        let json = serde_json::to_string(&password).unwrap();
        assert_eq!(json, "\"hunter2secret\"");

        let parsed: Password = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, password);
    }
}
