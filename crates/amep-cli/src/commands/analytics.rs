use amep_config::AmepConfig;
use amep_dashboard::analytics::analytics_summary;

use crate::cli::{AnalyticsArgs, GlobalFlags};
use crate::output::output;

pub async fn handle(
    args: &AnalyticsArgs,
    flags: &GlobalFlags,
    config: &AmepConfig,
) -> anyhow::Result<()> {
    let (api, identity) = super::teacher_client(config).await?;
    let recent = args
        .recent
        .unwrap_or_else(|| usize::try_from(config.general.recent_alerts).unwrap_or(usize::MAX));
    let summary =
        analytics_summary(&api, &identity.user_id, config.api.branch_timeout(), recent).await?;
    output(&summary, flags.format)
}
