use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use parking_lot::ReentrantMutex;
use tracing::{debug, info, warn};

use super::broadcast::{ObserverList, Subscription};
use super::error::{AuthError, ProviderError};
use super::provider::{IdentityProvider, SimulatedProvider};
use crate::config::StoreConfig;
use crate::models::{Account, Credentials, RegisterPayload, Session, SocialProvider};

struct StoreState {
    accounts: Vec<Account>,
    session: Session,
    /// Bumped on every session write; lets a pending social sign-in notice
    /// that the session moved on underneath it.
    generation: u64,
}

/// Registered accounts plus the single active session.
///
/// All mutation goes through the methods below. The state lock is never
/// held while observers run or across an await, so observers may call back
/// into the store.
///
/// Lock order is `broadcast` then `state`.
pub struct IdentityStore {
    state: Mutex<StoreState>,
    /// Held from a session write until its broadcast finishes, so observers
    /// see changes in write order. Re-entrant so an observer may itself
    /// change the session on the same thread.
    broadcast: ReentrantMutex<()>,
    observers: ObserverList<Session>,
    provider: Arc<dyn IdentityProvider>,
    discard_superseded_social: bool,
}

impl IdentityStore {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self::with_accounts(Vec::new(), provider)
    }

    /// Build a store seeded with `accounts`. Duplicate emails after the
    /// first are dropped.
    pub fn with_accounts(accounts: Vec<Account>, provider: Arc<dyn IdentityProvider>) -> Self {
        let mut unique: Vec<Account> = Vec::with_capacity(accounts.len());
        for account in accounts {
            if unique.iter().any(|a| a.email == account.email) {
                warn!(email = %account.email, "Dropping duplicate seeded account");
                continue;
            }
            unique.push(account);
        }

        Self {
            state: Mutex::new(StoreState {
                accounts: unique,
                session: None,
                generation: 0,
            }),
            broadcast: ReentrantMutex::new(()),
            observers: ObserverList::new(),
            provider,
            discard_superseded_social: true,
        }
    }

    /// Wire a store with the simulated social provider described by `config`.
    pub fn from_config(config: &StoreConfig) -> Self {
        let provider = Arc::new(SimulatedProvider::new(config.social_delay()));
        Self::new(provider).discard_superseded_social(config.discard_superseded_social)
    }

    /// When false, a social sign-in that resolves after the session changed
    /// still overwrites it.
    pub fn discard_superseded_social(mut self, discard: bool) -> Self {
        self.discard_superseded_social = discard;
        self
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ===== Accounts =====

    /// Add a new account. Does not sign it in.
    pub async fn register(&self, payload: RegisterPayload) -> Result<Account, AuthError> {
        if payload.password != payload.confirm_password {
            debug!(email = %payload.email, "Registration rejected: password mismatch");
            return Err(AuthError::PasswordMismatch);
        }

        let mut state = self.state();
        if state.accounts.iter().any(|a| a.email == payload.email) {
            debug!(email = %payload.email, "Registration rejected: email taken");
            return Err(AuthError::UserExists {
                email: payload.email,
            });
        }

        let account = payload.into_account(Utc::now());
        state.accounts.push(account.clone());
        info!(email = %account.email, "Account registered");
        Ok(account)
    }

    pub fn accounts(&self) -> Vec<Account> {
        self.state().accounts.clone()
    }

    pub fn account_count(&self) -> usize {
        self.state().accounts.len()
    }

    // ===== Authentication =====

    /// Sign in with email and password (exact, case-sensitive match on both).
    pub async fn authenticate(&self, credentials: Credentials) -> Result<Account, AuthError> {
        let _broadcast = self.broadcast.lock();
        let session = {
            let mut state = self.state();
            let matched = state.accounts.iter_mut().find(|a| {
                a.email == credentials.email
                    && a.password.as_deref() == Some(credentials.password.as_str())
            });

            let Some(account) = matched else {
                debug!(email = %credentials.email, "Authentication rejected");
                return Err(AuthError::InvalidCredentials);
            };

            account.last_login_at = Some(Utc::now());
            let session = account.clone();
            Self::write_session(&mut state, Some(session.clone()));
            session
        };

        info!(email = %session.email, "Signed in");
        self.observers.notify(&Some(session.clone()));
        Ok(session)
    }

    /// Sign in through an external provider.
    ///
    /// The resulting identity becomes the session but is never added to the
    /// account collection. If the session changes while the provider flow is
    /// pending, the result is discarded with `ProviderError::Superseded`
    /// (unless disabled via `discard_superseded_social`).
    pub async fn authenticate_social(&self, provider: SocialProvider) -> Result<Account, AuthError> {
        let started_at = self.state().generation;

        let profile = match self.provider.sign_in(provider).await {
            Ok(profile) => profile,
            Err(e) => {
                debug!(%provider, error = %e, "Social sign-in failed");
                return Err(e.into());
            }
        };
        self.commit_social(provider, started_at, profile.into_account(provider))
    }

    // Kept out of the async body so the broadcast guard never lives across
    // an await.
    fn commit_social(
        &self,
        provider: SocialProvider,
        started_at: u64,
        identity: Account,
    ) -> Result<Account, AuthError> {
        let _broadcast = self.broadcast.lock();
        {
            let mut state = self.state();
            if self.discard_superseded_social && state.generation != started_at {
                warn!(%provider, "Discarding social sign-in: session changed while pending");
                return Err(ProviderError::Superseded.into());
            }
            Self::write_session(&mut state, Some(identity.clone()));
        }

        info!(%provider, email = %identity.email, "Signed in via provider");
        self.observers.notify(&Some(identity.clone()));
        Ok(identity)
    }

    // ===== Session =====

    pub fn session(&self) -> Session {
        self.state().session.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().session.is_some()
    }

    /// Replace the session unconditionally and broadcast.
    pub fn set_session(&self, identity: Session) {
        let _broadcast = self.broadcast.lock();
        Self::write_session(&mut self.state(), identity.clone());
        self.observers.notify(&identity);
    }

    /// Log out and broadcast. Returns the identity that was signed in.
    pub fn clear_session(&self) -> Session {
        let _broadcast = self.broadcast.lock();
        let previous = {
            let mut state = self.state();
            let previous = state.session.take();
            state.generation += 1;
            previous
        };

        if let Some(ref account) = previous {
            info!(email = %account.email, "Signed out");
        }
        self.observers.notify(&None);
        previous
    }

    fn write_session(state: &mut StoreState, session: Session) {
        state.session = session;
        state.generation += 1;
    }

    /// Register `observer` for every subsequent session change.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&Session) + Send + Sync + 'static,
    {
        self.observers.subscribe(observer)
    }
}

impl Default for IdentityStore {
    fn default() -> Self {
        Self::new(Arc::new(SimulatedProvider::default()))
    }
}

// ============================================================================
// Tests
// ============================================================================
