//! Toast texts for the auth flow.
//!
//! Each notice carries a stable translation key so the locale layer can
//! substitute its own template; `message()` is the English fallback.

use crate::auth::{AuthError, ProviderError};
use crate::models::{Account, SocialProvider};

/// Fallback text for failures that have no specific wording.
pub const GENERIC_ERROR: &str = "Something went wrong";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthNotice {
    SignedUp { name: String },
    LoggedIn { name: String },
    SocialLoggedIn { provider: SocialProvider, name: String },
    LoggedOut { name: String },
}

impl AuthNotice {
    pub fn signed_up(account: &Account) -> Self {
        AuthNotice::SignedUp {
            name: account.display_name(),
        }
    }

    pub fn logged_in(session: &Account) -> Self {
        match session.auth_provider {
            Some(provider) => AuthNotice::SocialLoggedIn {
                provider,
                name: session.display_name(),
            },
            None => AuthNotice::LoggedIn {
                name: session.display_name(),
            },
        }
    }

    pub fn logged_out(session: &Account) -> Self {
        AuthNotice::LoggedOut {
            name: session.display_name(),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            AuthNotice::SignedUp { .. } => "auth.success.signup",
            AuthNotice::LoggedIn { .. } => "auth.success.login",
            AuthNotice::SocialLoggedIn { .. } => "auth.success.social",
            AuthNotice::LoggedOut { .. } => "auth.success.logout",
        }
    }

    pub fn message(&self) -> String {
        match self {
            AuthNotice::SignedUp { name } => format!(
                "Hi {}, welcome to Blackwell, please verify your email immediately.",
                name
            ),
            AuthNotice::LoggedIn { name } => {
                format!("Login successful! Welcome to Blackwell, {}", name)
            }
            AuthNotice::SocialLoggedIn { provider, name } => format!(
                "{} login successful! Welcome, {}",
                provider.display_name(),
                name
            ),
            AuthNotice::LoggedOut { name } => format!("Bye, {}! See you next time.", name),
        }
    }
}

/// Text shown for a failed store operation.
pub fn error_message(error: &AuthError) -> String {
    match error {
        AuthError::Provider(ProviderError::Failed(_) | ProviderError::Superseded) => {
            GENERIC_ERROR.to_string()
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ProviderProfile;

    fn bob() -> Account {
        ProviderProfile {
            display_name: Some("Bob Builder".to_string()),
            email: Some("bob@test.com".to_string()),
            email_verified: false,
        }
        .into_account(SocialProvider::Google)
    }

    #[test]
    fn test_signup_message() {
        let notice = AuthNotice::SignedUp {
            name: "Bob Builder".to_string(),
        };
        assert_eq!(notice.key(), "auth.success.signup");
        assert_eq!(
            notice.message(),
            "Hi Bob Builder, welcome to Blackwell, please verify your email immediately."
        );
    }

    #[test]
    fn test_logged_in_picks_social_variant() {
        let notice = AuthNotice::logged_in(&bob());
        assert_eq!(notice.key(), "auth.success.social");
        assert_eq!(notice.message(), "Google login successful! Welcome, Bob Builder");

        let mut local = bob();
        local.auth_provider = None;
        let notice = AuthNotice::logged_in(&local);
        assert_eq!(
            notice.message(),
            "Login successful! Welcome to Blackwell, Bob Builder"
        );
    }

    #[test]
    fn test_logout_uses_user_fallback() {
        let mut anonymous = bob();
        anonymous.first_name = None;
        anonymous.last_name = None;
        assert_eq!(
            AuthNotice::logged_out(&anonymous).message(),
            "Bye, User! See you next time."
        );
    }

    #[test]
    fn test_error_message() {
        assert_eq!(error_message(&AuthError::InvalidCredentials), "Invalid credentials");
        assert_eq!(
            error_message(&AuthError::Provider(ProviderError::Superseded)),
            GENERIC_ERROR
        );
        assert_eq!(
            error_message(&AuthError::Provider(ProviderError::Cancelled)),
            "Sign-in was cancelled"
        );
        assert_eq!(
            error_message(&AuthError::Provider(ProviderError::Failed("popup closed".into()))),
            GENERIC_ERROR
        );
    }

    #[test]
    fn test_error_message_agrees_with_generic_key() {
        let errors = [
            AuthError::PasswordMismatch,
            AuthError::UserExists { email: "a@x.com".into() },
            AuthError::InvalidCredentials,
            AuthError::Provider(ProviderError::Cancelled),
            AuthError::Provider(ProviderError::Failed("boom".into())),
            AuthError::Provider(ProviderError::Superseded),
        ];
        for error in errors {
            let generic = error_message(&error) == GENERIC_ERROR;
            assert_eq!(generic, error.message_key() == "auth.error.generic", "{:?}", error);
        }
    }
}
