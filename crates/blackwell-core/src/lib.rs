//! Core library for the Blackwell site's sign-up and sign-in flow.
//!
//! This crate provides:
//! - `IdentityStore`: in-memory account collection plus the single active session
//! - `ObserverList`: synchronous session-change broadcast
//! - `IdentityProvider`: seam for social sign-in (Google, Facebook)
//! - Form validation and user-facing notices for the auth modal
//!
//! Credentials are kept in plaintext and in memory. Nothing is persisted.

pub mod auth;
pub mod config;
pub mod models;
pub mod notice;
pub mod validation;

pub use auth::{AuthError, ErrorKind, IdentityStore, ProviderError, Subscription};
pub use config::StoreConfig;
pub use models::{Account, Credentials, RegisterPayload, Session, SocialProvider};
