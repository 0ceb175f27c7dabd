//! Social sign-in seam.
//!
//! The store never talks to Google or Facebook directly. It asks an
//! `IdentityProvider` for a profile and maps that profile into the
//! `Account` shape. `SimulatedProvider` stands in for the popup flow with a
//! fixed artificial delay; tests inject their own implementations.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::error::ProviderError;
use crate::models::{Account, SocialProvider};

/// Default latency of the simulated popup round trip.
pub const DEFAULT_SOCIAL_DELAY_MS: u64 = 1000;

/// What an external identity provider hands back after a successful popup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderProfile {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub email_verified: bool,
}

impl ProviderProfile {
    /// Map the profile into a session identity tagged with `provider`.
    ///
    /// The first word of the display name becomes the first name and the
    /// remainder the last name. A missing email falls back to
    /// `user@{provider}.com`.
    pub fn into_account(self, provider: SocialProvider) -> Account {
        let (first_name, last_name) = match self.display_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => match name.split_once(char::is_whitespace) {
                Some((first, rest)) => (
                    Some(first.to_string()),
                    Some(rest.trim().to_string()).filter(|s| !s.is_empty()),
                ),
                None => (Some(name.to_string()), None),
            },
            _ => (None, None),
        };

        Account {
            email: self
                .email
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| provider.fallback_email()),
            password: None,
            first_name,
            last_name,
            mobile: None,
            country: None,
            created_at: None,
            last_login_at: None,
            email_verified: self.email_verified,
            auth_provider: Some(provider),
        }
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Run the provider's sign-in flow and return the resulting profile.
    async fn sign_in(&self, provider: SocialProvider) -> Result<ProviderProfile, ProviderError>;
}

/// Pretends to be an OAuth popup: waits, then returns a canned profile.
#[derive(Debug, Clone)]
pub struct SimulatedProvider {
    delay: Duration,
}

impl SimulatedProvider {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedProvider {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_SOCIAL_DELAY_MS))
    }
}

#[async_trait]
impl IdentityProvider for SimulatedProvider {
    async fn sign_in(&self, provider: SocialProvider) -> Result<ProviderProfile, ProviderError> {
        debug!(%provider, delay_ms = self.delay.as_millis() as u64, "Simulating provider sign-in");
        tokio::time::sleep(self.delay).await;

        Ok(ProviderProfile {
            display_name: Some(format!("{} User", provider.display_name())),
            email: Some(provider.fallback_email()),
            email_verified: true,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    #[test]
    fn test_profile_mapping_splits_display_name() {
        let profile = ProviderProfile {
            display_name: Some("Ada King Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            email_verified: true,
        };
        let account = profile.into_account(SocialProvider::Google);

        assert_eq!(account.first_name.as_deref(), Some("Ada"));
        assert_eq!(account.last_name.as_deref(), Some("King Lovelace"));
        assert_eq!(account.email, "ada@example.com");
        assert!(account.email_verified);
        assert_eq!(account.auth_provider, Some(SocialProvider::Google));
        assert!(account.password.is_none());
        assert!(account.created_at.is_none());
    }

    #[test]
    fn test_profile_mapping_fallbacks() {
        let account = ProviderProfile::default().into_account(SocialProvider::Facebook);
        assert_eq!(account.email, "user@facebook.com");
        assert!(account.first_name.is_none());
        assert!(account.last_name.is_none());
        assert!(!account.email_verified);

        let single = ProviderProfile {
            display_name: Some("Cher".to_string()),
            ..Default::default()
        }
        .into_account(SocialProvider::Google);
        assert_eq!(single.first_name.as_deref(), Some("Cher"));
        assert!(single.last_name.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_provider_waits_for_delay() {
        let provider = SimulatedProvider::new(Duration::from_millis(1000));
        let mut flow = Box::pin(provider.sign_in(SocialProvider::Google));

        assert!((&mut flow).now_or_never().is_none());

        tokio::time::advance(Duration::from_millis(999)).await;
        assert!((&mut flow).now_or_never().is_none());

        tokio::time::advance(Duration::from_millis(1)).await;
        let profile = flow.await.unwrap();
        assert_eq!(profile.display_name.as_deref(), Some("Google User"));
        assert_eq!(profile.email.as_deref(), Some("user@google.com"));
        assert!(profile.email_verified);
    }
}
