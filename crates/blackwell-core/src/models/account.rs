use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single active identity for the process. `None` means logged out.
pub type Session = Option<Account>;

/// External identity providers offered by the sign-in modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "lowercase")]
pub enum SocialProvider {
    Google,
    Facebook,
}

impl SocialProvider {
    /// Tag stored in `Account::auth_provider` and used in synthesized emails.
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialProvider::Google => "google",
            SocialProvider::Facebook => "facebook",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SocialProvider::Google => "Google",
            SocialProvider::Facebook => "Facebook",
        }
    }

    /// Placeholder address for identities whose provider returned no email.
    pub fn fallback_email(&self) -> String {
        format!("user@{}.com", self.as_str())
    }
}

impl fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SocialProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(SocialProvider::Google),
            "facebook" => Ok(SocialProvider::Facebook),
            other => Err(format!("unknown provider: {}", other)),
        }
    }
}

/// A registered identity, and the shape of every session value.
///
/// Social sign-ins produce an `Account` that never enters the account
/// collection: no password, no `created_at`, `auth_provider` set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_login_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub auth_provider: Option<SocialProvider>,
}

impl Account {
    /// Name shown in greetings: first name (or "User") followed by last name.
    pub fn display_name(&self) -> String {
        let first = self
            .first_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("User");
        let last = self.last_name.as_deref().unwrap_or("");
        format!("{} {}", first, last).trim().to_string()
    }

    pub fn is_social(&self) -> bool {
        self.auth_provider.is_some()
    }
}

/// Sign-up form contents as submitted by the modal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl RegisterPayload {
    /// Build the stored account. `confirm_password` is dropped here.
    pub(crate) fn into_account(self, created_at: DateTime<Utc>) -> Account {
        Account {
            email: self.email,
            password: Some(self.password),
            first_name: self.first_name,
            last_name: self.last_name,
            mobile: self.mobile,
            country: self.country,
            created_at: Some(created_at),
            last_login_at: None,
            email_verified: false,
            auth_provider: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
