pub mod analytics;
pub mod auth;
pub mod grading;
pub mod interventions;

use std::time::Duration;

use amep_api::ApiClient;
use amep_config::AmepConfig;
use amep_core::Identity;
use amep_session::SessionStore;

use crate::cli::GlobalFlags;

/// Build an unauthenticated client from the configured backend URL.
pub fn client(config: &AmepConfig) -> anyhow::Result<ApiClient> {
    let api = config.require_api()?;
    tracing::debug!(base_url = %api.base_url, "building api client");
    Ok(ApiClient::new(
        &api.base_url,
        Duration::from_secs(api.request_timeout_secs),
    ))
}

/// Restore the persisted session and return a token-bearing client plus the
/// verified identity. Dashboard commands are teacher-only.
pub async fn teacher_client(config: &AmepConfig) -> anyhow::Result<(ApiClient, Identity)> {
    let client = client(config)?;
    let mut session = SessionStore::new(client.clone());
    session.restore().await;

    let (Some(token), Some(identity)) = (session.token(), session.identity()) else {
        anyhow::bail!("not logged in — run `amep auth login`");
    };
    if !session.is_teacher() {
        anyhow::bail!(
            "this command needs a teacher account; logged in as {} ({})",
            identity.display_name,
            identity.role
        );
    }
    tracing::debug!(user_id = %identity.user_id, "session restored");

    Ok((client.clone().with_token(token), identity.clone()))
}

/// Effective list limit: an explicit `--limit` wins over the configured
/// default.
pub fn effective_limit(flags: &GlobalFlags, config: &AmepConfig) -> usize {
    let limit = flags.limit.unwrap_or(config.general.default_limit);
    usize::try_from(limit).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cli::OutputFormat;

    fn flags(limit: Option<u32>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            limit,
        }
    }

    #[test]
    fn limit_flag_overrides_configured_default() {
        let config = AmepConfig::default();
        assert_eq!(effective_limit(&flags(Some(3)), &config), 3);
    }

    #[test]
    fn limit_falls_back_to_configured_default() {
        let config = AmepConfig::default();
        assert_eq!(
            effective_limit(&flags(None), &config),
            usize::try_from(config.general.default_limit).unwrap()
        );
    }
}
