//! Auth endpoints: login, register, token verification.

use amep_core::{AuthPayload, Credentials, Identity, RegistrationProfile, Role};

use crate::{ApiClient, error::ApiError, http::check_response};

#[derive(serde::Deserialize)]
struct AuthResponse {
    token: String,
    user: UserInfo,
}

#[derive(serde::Deserialize)]
struct UserInfo {
    id: String,
    role: Role,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(serde::Deserialize)]
struct VerifyResponse {
    valid: bool,
}

impl AuthResponse {
    fn into_payload(self) -> AuthPayload {
        // Older accounts predate the display-name field; fall back to email.
        let display_name = self
            .user
            .name
            .or(self.user.email)
            .unwrap_or_else(|| self.user.id.clone());
        AuthPayload {
            token: self.token,
            identity: Identity {
                user_id: self.user.id,
                role: self.user.role,
                display_name,
            },
        }
    }
}

impl ApiClient {
    /// `POST /api/auth/login`.
    pub(crate) async fn login_request(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthPayload, ApiError> {
        let resp =
            check_response(self.post("/api/auth/login").json(credentials).send().await?).await?;
        let data: AuthResponse = resp.json().await?;
        Ok(data.into_payload())
    }

    /// `POST /api/auth/register`.
    pub(crate) async fn register_request(
        &self,
        profile: &RegistrationProfile,
    ) -> Result<AuthPayload, ApiError> {
        let resp =
            check_response(self.post("/api/auth/register").json(profile).send().await?).await?;
        let data: AuthResponse = resp.json().await?;
        Ok(data.into_payload())
    }

    /// `POST /api/auth/verify`. A definitive "invalid" is `Ok(false)`;
    /// transport failures are `Err`.
    pub(crate) async fn verify_token_request(&self, token: &str) -> Result<bool, ApiError> {
        let resp = check_response(
            self.post("/api/auth/verify")
                .json(&serde_json::json!({ "token": token }))
                .send()
                .await?,
        )
        .await;

        match resp {
            Ok(resp) => {
                let data: VerifyResponse = resp.json().await?;
                Ok(data.valid)
            }
            // The backend answers 401 for a dead token rather than {valid:false}.
            Err(ApiError::Unauthorized) => Ok(false),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const FIXTURE: &str = r#"{
        "token": "sess.9f2c",
        "user": {
            "id": "usr_19",
            "role": "teacher",
            "name": "M. Curie",
            "email": "curie@school.example"
        }
    }"#;

    #[test]
    fn parse_auth_response() {
        let data: AuthResponse = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(data.token, "sess.9f2c");
        assert_eq!(data.user.id, "usr_19");
        assert_eq!(data.user.role, Role::Teacher);
    }

    #[test]
    fn maps_to_auth_payload() {
        let data: AuthResponse = serde_json::from_str(FIXTURE).unwrap();
        let payload = data.into_payload();
        assert_eq!(payload.identity.display_name, "M. Curie");
        assert_eq!(payload.identity.user_id, "usr_19");
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let json = r#"{
            "token": "sess.1",
            "user": { "id": "usr_2", "role": "student", "email": "ada@school.example" }
        }"#;
        let data: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(data.into_payload().identity.display_name, "ada@school.example");
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let json = r#"{ "token": "sess.1", "user": { "id": "usr_3", "role": "admin" } }"#;
        let data: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(data.into_payload().identity.display_name, "usr_3");
    }

    #[test]
    fn parse_verify_response() {
        let data: VerifyResponse = serde_json::from_str(r#"{ "valid": false }"#).unwrap();
        assert!(!data.valid);
    }
}
