//! Authentication module: the in-memory identity store and its session broadcast.
//!
//! This module provides:
//! - `IdentityStore`: account registration, password and social sign-in, session state
//! - `ObserverList` / `Subscription`: synchronous session-change notification
//! - `IdentityProvider`: async seam for the social sign-in popup
//!
//! There is exactly one session per store, and nothing is persisted.

pub mod broadcast;
pub mod error;
pub mod provider;
pub mod store;

pub use broadcast::{ObserverList, Subscription};
pub use error::{AuthError, ErrorKind, ProviderError};
pub use provider::{IdentityProvider, ProviderProfile, SimulatedProvider};
pub use store::IdentityStore;
