//! # amep-session
//!
//! Authentication session lifecycle for the AMEP client.
//!
//! Provides the [`SessionStore`] — the single source of truth for "who is
//! logged in" — with durable credential persistence (OS keychain → file
//! fallback) and startup re-validation against the backend.

pub mod credential_store;
pub mod error;
pub mod store;

pub use credential_store::{CredentialSource, CredentialStore, PersistedSession};
pub use error::SessionError;
pub use store::{LoginOutcome, SessionState, SessionStore};
