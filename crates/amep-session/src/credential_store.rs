//! Durable storage for the persisted session (token + identity).
//!
//! The token and identity are stored as ONE serialized blob so they are
//! written and cleared atomically — there is no state where one survives
//! without the other. Priority: OS keychain, falling back to a 0600 file
//! under `~/.amep/credentials` when no keyring backend is available.

use std::fs;
use std::path::PathBuf;

use amep_core::Identity;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

const DEFAULT_KEYRING_SERVICE: &str = "amep-cli";
const KEYRING_USER: &str = "session";
const CREDENTIALS_FILE_NAME: &str = "credentials";

/// The persisted session blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub token: String,
    pub identity: Identity,
}

/// Where a loaded session came from (for status display).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Keyring,
    File,
}

impl CredentialSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyring => "keyring",
            Self::File => "file",
        }
    }
}

/// Handle to the credential storage tiers.
///
/// The default store uses the OS keychain plus the home-directory fallback
/// file. Tests construct a file-only store pointed at a temp directory.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    service: String,
    file_path: Option<PathBuf>,
    use_keyring: bool,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore {
    /// Store against the OS keychain and `~/.amep/credentials`.
    ///
    /// The keyring service defaults to `"amep-cli"`; override via
    /// `AMEP_KEYRING_SERVICE` (e.g., `"amep-cli-test"`) to avoid touching
    /// production credentials.
    #[must_use]
    pub fn new() -> Self {
        let service = std::env::var("AMEP_KEYRING_SERVICE")
            .unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string());
        Self {
            service,
            file_path: None,
            use_keyring: true,
        }
    }

    /// File-only store at an explicit path. Used by tests.
    #[must_use]
    pub fn file_only(path: PathBuf) -> Self {
        Self {
            service: DEFAULT_KEYRING_SERVICE.to_string(),
            file_path: Some(path),
            use_keyring: false,
        }
    }

    /// Persist the session blob. Falls back to file if keyring is unavailable.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the blob cannot be serialized or both
    /// keyring and file storage fail.
    pub fn store(&self, session: &PersistedSession) -> Result<(), SessionError> {
        let blob = serde_json::to_string(session)?;

        if self.use_keyring {
            match keyring::Entry::new(&self.service, KEYRING_USER) {
                Ok(entry) => match entry.set_password(&blob) {
                    Ok(()) => return Ok(()),
                    Err(error) => {
                        tracing::warn!(%error, "keyring store failed; falling back to file");
                    }
                },
                Err(error) => {
                    tracing::warn!(%error, "keyring unavailable; falling back to file");
                }
            }
        }

        self.store_file(&blob)
    }

    /// Load the persisted session, if any. Priority: keyring → file.
    #[must_use]
    pub fn load(&self) -> Option<(PersistedSession, CredentialSource)> {
        if self.use_keyring
            && let Ok(entry) = keyring::Entry::new(&self.service, KEYRING_USER)
            && let Ok(blob) = entry.get_password()
            && let Some(session) = parse_blob(&blob)
        {
            return Some((session, CredentialSource::Keyring));
        }

        self.load_file()
            .map(|session| (session, CredentialSource::File))
    }

    /// Delete the persisted session from keyring and file.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::CredentialStore`] if the credentials file
    /// cannot be removed.
    pub fn delete(&self) -> Result<(), SessionError> {
        // Keyring deletion is best-effort — the entry may not exist.
        if self.use_keyring
            && let Ok(entry) = keyring::Entry::new(&self.service, KEYRING_USER)
        {
            let _ = entry.delete_credential();
        }

        let path = self.credentials_path()?;
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                SessionError::CredentialStore(format!("failed to delete {}: {e}", path.display()))
            })?;
        }

        Ok(())
    }

    // --- Private file helpers ---

    fn credentials_path(&self) -> Result<PathBuf, SessionError> {
        if let Some(path) = &self.file_path {
            return Ok(path.clone());
        }
        dirs::home_dir()
            .map(|h| h.join(".amep").join(CREDENTIALS_FILE_NAME))
            .ok_or_else(|| {
                SessionError::CredentialStore(
                    "home directory not found — cannot store credentials".into(),
                )
            })
    }

    fn store_file(&self, blob: &str) -> Result<(), SessionError> {
        let path = self.credentials_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SessionError::CredentialStore(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }
        fs::write(&path, blob).map_err(|e| {
            SessionError::CredentialStore(format!("write {}: {e}", path.display()))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                SessionError::CredentialStore(format!("chmod {}: {e}", path.display()))
            })?;
        }

        Ok(())
    }

    fn load_file(&self) -> Option<PersistedSession> {
        let path = self.credentials_path().ok()?;
        let blob = fs::read_to_string(&path).ok()?;
        parse_blob(&blob)
    }
}

fn parse_blob(blob: &str) -> Option<PersistedSession> {
    if blob.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(blob) {
        Ok(session) => Some(session),
        Err(error) => {
            tracing::warn!(%error, "stored credentials are unreadable; ignoring them");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use amep_core::Role;
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_session() -> PersistedSession {
        PersistedSession {
            token: "tok.abc".into(),
            identity: Identity {
                user_id: "usr_1".into(),
                role: Role::Teacher,
                display_name: "T. Teacher".into(),
            },
        }
    }

    #[test]
    fn file_store_load_delete_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = CredentialStore::file_only(tmp.path().join("credentials"));

        store.store(&sample_session()).expect("store");
        let (loaded, source) = store.load().expect("load");
        assert_eq!(loaded, sample_session());
        assert_eq!(source, CredentialSource::File);

        store.delete().expect("delete");
        assert!(store.load().is_none());
    }

    #[test]
    fn delete_is_idempotent() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = CredentialStore::file_only(tmp.path().join("credentials"));
        store.delete().expect("delete with nothing stored");
        store.store(&sample_session()).expect("store");
        store.delete().expect("first delete");
        store.delete().expect("second delete");
    }

    #[cfg(unix)]
    #[test]
    fn credentials_file_is_0600() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("credentials");
        let store = CredentialStore::file_only(path.clone());
        store.store(&sample_session()).expect("store");

        let mode = fs::metadata(&path).expect("metadata").permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "credentials file should be 0600");
    }

    #[test]
    fn unreadable_blob_is_ignored() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("credentials");
        fs::write(&path, "not json at all").expect("write");
        let store = CredentialStore::file_only(path);
        assert!(store.load().is_none());
    }

    #[test]
    fn whitespace_blob_is_ignored() {
        assert!(parse_blob("   \n  ").is_none());
    }
}
