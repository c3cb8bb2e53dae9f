//! The session store: single source of truth for "who is logged in".
//!
//! State machine per session: `Anonymous → (login/register success) →
//! Authenticated`; `Authenticated → (logout | verification failure) →
//! Anonymous`. There is no error state distinct from `Anonymous` — every
//! auth failure degrades to it.

use amep_api::AuthApi;
use amep_core::{Credentials, Identity, RegistrationProfile, Role};

use crate::credential_store::{CredentialSource, CredentialStore, PersistedSession};
use crate::error::SessionError;

const LOGIN_FALLBACK_ERROR: &str = "Login failed";
const REGISTER_FALLBACK_ERROR: &str = "Registration failed";

/// Current session state. Token and identity always travel together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated { token: String, identity: Identity },
}

/// Result of a login or register attempt. Never an `Err` — API failures are
/// folded into `{ success: false, error }` with the server-provided message
/// or a generic fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub success: bool,
    pub identity: Option<Identity>,
    pub error: Option<String>,
}

impl LoginOutcome {
    fn succeeded(identity: Identity) -> Self {
        Self {
            success: true,
            identity: Some(identity),
            error: None,
        }
    }

    fn failed(error: String) -> Self {
        Self {
            success: false,
            identity: None,
            error: Some(error),
        }
    }
}

/// Owns the authentication lifecycle: current identity, durable persistence,
/// startup re-validation, and the login/register/logout transitions.
///
/// Views read identity through the derived queries; nothing outside this
/// store writes the persisted credentials.
pub struct SessionStore<A: AuthApi> {
    api: A,
    credentials: CredentialStore,
    state: SessionState,
    loading: bool,
}

impl<A: AuthApi> SessionStore<A> {
    #[must_use]
    pub fn new(api: A) -> Self {
        Self::with_credentials(api, CredentialStore::new())
    }

    /// Construct with an explicit credential store (tests point this at a
    /// temp file).
    #[must_use]
    pub fn with_credentials(api: A, credentials: CredentialStore) -> Self {
        Self {
            api,
            credentials,
            state: SessionState::Anonymous,
            loading: true,
        }
    }

    /// Restore a persisted session, then re-validate it against the backend.
    ///
    /// The persisted identity is adopted eagerly so callers can render
    /// optimistically; if verification then reports the token invalid (or
    /// the call fails), the persisted state is cleared and the store resets
    /// to anonymous. No error surfaces to the caller — an unverifiable
    /// session is simply "not logged in".
    ///
    /// This is the sole asynchronous startup step: `loading` flips
    /// true→false exactly once, after which the invariant holds that token
    /// and identity are either both present or both absent.
    pub async fn restore(&mut self) {
        let Some((persisted, source)) = self.credentials.load() else {
            self.loading = false;
            return;
        };

        tracing::debug!(source = source.as_str(), "adopting persisted session");
        self.state = SessionState::Authenticated {
            token: persisted.token.clone(),
            identity: persisted.identity,
        };

        let valid = match self.api.verify_token(&persisted.token).await {
            Ok(valid) => valid,
            Err(error) => {
                tracing::warn!(%error, "token verification failed; resetting to anonymous");
                false
            }
        };

        if !valid {
            self.clear_session();
        }
        self.loading = false;
    }

    /// Attempt a login. On success the session is persisted and adopted.
    pub async fn login(&mut self, credentials: &Credentials) -> LoginOutcome {
        match self.api.login(credentials).await {
            Ok(payload) => self.adopt(payload.token, payload.identity),
            Err(error) => {
                tracing::debug!(%error, "login rejected");
                LoginOutcome::failed(
                    error
                        .server_message()
                        .unwrap_or_else(|| LOGIN_FALLBACK_ERROR.into()),
                )
            }
        }
    }

    /// Attempt a registration. Same contract as [`SessionStore::login`].
    pub async fn register(&mut self, profile: &RegistrationProfile) -> LoginOutcome {
        match self.api.register(profile).await {
            Ok(payload) => self.adopt(payload.token, payload.identity),
            Err(error) => {
                tracing::debug!(%error, "registration rejected");
                LoginOutcome::failed(
                    error
                        .server_message()
                        .unwrap_or_else(|| REGISTER_FALLBACK_ERROR.into()),
                )
            }
        }
    }

    /// Clear persisted state and reset to anonymous.
    ///
    /// The host must then discard any view state tied to the old identity —
    /// the CLI does this trivially by exiting; a long-lived host should
    /// restart from its entry point rather than invalidate caches piecemeal.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the persisted credentials cannot be
    /// removed; the in-memory state is reset regardless.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        let result = self.credentials.delete();
        self.state = SessionState::Anonymous;
        result
    }

    // --- Derived queries (pure, synchronous) ---

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    #[must_use]
    pub fn is_student(&self) -> bool {
        self.role() == Some(Role::Student)
    }

    #[must_use]
    pub fn is_teacher(&self) -> bool {
        self.role() == Some(Role::Teacher)
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.identity().map(|i| i.user_id.as_str())
    }

    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        match &self.state {
            SessionState::Authenticated { identity, .. } => Some(identity),
            SessionState::Anonymous => None,
        }
    }

    #[must_use]
    pub const fn token(&self) -> Option<&String> {
        match &self.state {
            SessionState::Authenticated { token, .. } => Some(token),
            SessionState::Anonymous => None,
        }
    }

    /// Which storage tier currently holds a session, if any.
    #[must_use]
    pub fn credential_source(&self) -> Option<CredentialSource> {
        self.credentials.load().map(|(_, source)| source)
    }

    fn role(&self) -> Option<Role> {
        self.identity().map(|i| i.role)
    }

    fn adopt(&mut self, token: String, identity: Identity) -> LoginOutcome {
        let persisted = PersistedSession {
            token: token.clone(),
            identity: identity.clone(),
        };
        if let Err(error) = self.credentials.store(&persisted) {
            // A session that outlives the process is a convenience, not a
            // requirement; the in-memory session still works.
            tracing::warn!(%error, "failed to persist session");
        }
        self.state = SessionState::Authenticated {
            token,
            identity: identity.clone(),
        };
        LoginOutcome::succeeded(identity)
    }

    fn clear_session(&mut self) {
        if let Err(error) = self.credentials.delete() {
            tracing::warn!(%error, "failed to clear persisted session");
        }
        self.state = SessionState::Anonymous;
    }
}
