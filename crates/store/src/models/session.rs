//! Session records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use techedge_core::Email;

use super::user::User;

/// The client-asserted record naming the signed-in user.
///
/// Stored outside the user table under its own key, in either the durable
/// or the transient slot depending on "remember me". Nothing expires or
/// validates it; a session whose user record has vanished is detected at
/// lookup time and forces a logout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
    pub logged_in: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl Session {
    /// Open a session for a stored user.
    #[must_use]
    pub fn for_user(user: &User, at: DateTime<Utc>) -> Self {
        Self {
            email: user.email.clone(),
            fullname: user.fullname.clone(),
            logged_in: true,
            timestamp: at,
        }
    }

    /// Open a session for an email with no backing user record, as the demo
    /// bypass credential does.
    #[must_use]
    pub const fn for_email(email: Email, at: DateTime<Utc>) -> Self {
        Self {
            email,
            fullname: None,
            logged_in: true,
            timestamp: at,
        }
    }

    /// Name shown in the account header: full name when set, else the email.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.fullname.as_deref().unwrap_or_else(|| self.email.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    use chrono::TimeZone;
    use techedge_core::Password;

    #[test]
    fn test_json_layout() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let user = User::new(
            Email::parse("shopper@example.com").unwrap(),
            Password::new("hunter22"),
            Some("Sam Shopper".to_string()),
            at,
        );

        let session = Session::for_user(&user, at);
        let json = serde_json::to_value(&session).unwrap();

        assert_eq!(json["email"], "shopper@example.com");
        assert_eq!(json["fullname"], "Sam Shopper");
        assert_eq!(json["loggedIn"], true);
        assert_eq!(json["timestamp"], 1_700_000_000_000_i64);
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let session = Session::for_email(Email::parse("demo@demo.com").unwrap(), Utc::now());
        assert_eq!(session.display_name(), "demo@demo.com");

        let mut named = session;
        named.fullname = Some("Demo Person".to_string());
        assert_eq!(named.display_name(), "Demo Person");
    }
}
