//! Session error types.
//!
//! Auth failures (bad credentials, expired token) are NOT errors here — they
//! are outcomes ([`crate::LoginOutcome`]) or a silent reset to anonymous.
//! `SessionError` covers only credential persistence problems.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("credential store error: {0}")]
    CredentialStore(String),

    #[error("credential serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
