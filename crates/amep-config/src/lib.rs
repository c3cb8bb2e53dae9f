//! # amep-config
//!
//! Layered configuration loading for the AMEP client using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`AMEP_*` prefix, `__` as separator)
//! 2. Project-level `.amep/config.toml`
//! 3. User-level `~/.config/amep/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `AMEP_API__BASE_URL` -> `api.base_url`,
//! `AMEP_GENERAL__DEFAULT_LIMIT` -> `general.default_limit`, etc. The `__`
//! (double underscore) separates nested config sections.

mod api;
mod error;
mod general;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AmepConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl AmepConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`AmepConfig::load_with_dotenv`] if you
    /// need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if extraction fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// This is the typical entry point for the CLI and tests.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if extraction fails.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add additional
    /// providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".amep/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("AMEP_").split("__"))
    }

    /// Fail fast when the backend URL is missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] if `api.base_url` is empty.
    pub fn require_api(&self) -> Result<&ApiConfig, ConfigError> {
        if self.api.is_configured() {
            Ok(&self.api)
        } else {
            Err(ConfigError::NotConfigured {
                section: "api".into(),
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("amep").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = AmepConfig::default();
        assert!(!config.api.is_configured());
        assert_eq!(config.general.default_limit, 20);
    }

    #[test]
    fn require_api_rejects_unconfigured() {
        let config = AmepConfig::default();
        assert!(matches!(
            config.require_api(),
            Err(ConfigError::NotConfigured { .. })
        ));
    }

    #[test]
    fn env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("AMEP_API__BASE_URL", "https://api.amep.test");
            jail.set_env("AMEP_API__BRANCH_TIMEOUT_SECS", "2");

            let config: AmepConfig = AmepConfig::figment().extract()?;
            assert_eq!(config.api.base_url, "https://api.amep.test");
            assert_eq!(config.api.branch_timeout_secs, 2);
            assert!(config.require_api().is_ok());
            Ok(())
        });
    }

    #[test]
    fn local_toml_layers_under_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir(".amep")?;
            jail.create_file(
                ".amep/config.toml",
                r#"
                [api]
                base_url = "https://from-toml.amep.test"
                request_timeout_secs = 30

                [general]
                default_limit = 50
                "#,
            )?;
            jail.set_env("AMEP_API__BASE_URL", "https://from-env.amep.test");

            let config: AmepConfig = AmepConfig::figment().extract()?;
            // Env wins over TOML; untouched TOML values survive.
            assert_eq!(config.api.base_url, "https://from-env.amep.test");
            assert_eq!(config.api.request_timeout_secs, 30);
            assert_eq!(config.general.default_limit, 50);
            Ok(())
        });
    }
}
