//! AMEP backend API configuration.

use serde::{Deserialize, Serialize};

/// Overall HTTP request timeout.
const fn default_request_timeout_secs() -> u64 {
    10
}

/// Timeout for one branch of a dashboard fan-out. A branch that exceeds it
/// degrades to an empty result instead of stalling the whole aggregation.
const fn default_branch_timeout_secs() -> u64 {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the AMEP backend (e.g., `https://api.amep.example`).
    #[serde(default)]
    pub base_url: String,

    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Per-branch fan-out timeout in seconds.
    #[serde(default = "default_branch_timeout_secs")]
    pub branch_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            request_timeout_secs: default_request_timeout_secs(),
            branch_timeout_secs: default_branch_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Check if the API config has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
    }

    /// Branch timeout as a [`std::time::Duration`].
    #[must_use]
    pub const fn branch_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.branch_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = ApiConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.branch_timeout_secs, 5);
    }

    #[test]
    fn configured_when_base_url_set() {
        let config = ApiConfig {
            base_url: "https://api.amep.example".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
        assert_eq!(config.branch_timeout().as_secs(), 5);
    }
}
