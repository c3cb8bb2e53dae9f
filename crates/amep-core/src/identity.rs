//! Authenticated user identity and the auth request/response payloads.

use serde::{Deserialize, Serialize};

/// Platform role attached to every account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Student => write!(f, "student"),
            Self::Teacher => write!(f, "teacher"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Lightweight authenticated user identity for cross-crate passing.
///
/// Produced by `amep-session` on login/register/restore, consumed by the
/// dashboard aggregator (as the fetch root) and the CLI. Contains only data
/// fields — no auth logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Platform user ID.
    pub user_id: String,
    /// Account role.
    pub role: Role,
    /// Name shown in dashboards.
    pub display_name: String,
}

/// Login request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration request payload. Includes the requested role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationProfile {
    pub display_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Successful auth response: an opaque token plus the identity it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub identity: Identity,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Teacher).unwrap(), "\"teacher\"");
        assert_eq!(serde_json::to_string(&Role::Student).unwrap(), "\"student\"");
    }

    #[test]
    fn identity_roundtrip() {
        let identity = Identity {
            user_id: "usr_42".into(),
            role: Role::Teacher,
            display_name: "R. Feynman".into(),
        };
        let json = serde_json::to_string(&identity).unwrap();
        let back: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, identity);
    }

    #[test]
    fn auth_payload_parses_wire_shape() {
        let json = r#"{
            "token": "opaque.session.token",
            "identity": { "user_id": "usr_7", "role": "student", "display_name": "Ada" }
        }"#;
        let payload: AuthPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.token, "opaque.session.token");
        assert_eq!(payload.identity.role, Role::Student);
    }
}
