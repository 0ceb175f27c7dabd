//! Data models shared between the identity store and its UI collaborators.
//!
//! Field names serialize as camelCase so the web front-end sees the same
//! shape it always has.

pub mod account;

pub use account::{Account, Credentials, RegisterPayload, Session, SocialProvider};
