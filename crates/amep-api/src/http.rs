//! Shared HTTP response helpers for the API client.
//!
//! Centralizes status-code checks (401 → [`ApiError::Unauthorized`],
//! non-success → [`ApiError::Api`]) so resource modules stay focused on
//! request construction and response mapping.

use crate::error::ApiError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **401 Unauthorized** → [`ApiError::Unauthorized`].
/// - **Non-success status** → [`ApiError::Api`] with status code and
///   response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    if resp.status() == 401 {
        return Err(ApiError::Unauthorized);
    }
    if !resp.status().is_success() {
        return Err(ApiError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}
