//! Analytics hub: one-screen summary of a teacher's classrooms, alerts,
//! and interventions.

use std::time::Duration;

use amep_api::PlatformApi;
use amep_core::{
    AlertFilter, AlertSeverity, InterventionStatus,
    responses::{AnalyticsSummary, SeverityCounts},
};

use crate::branch::settle;
use crate::error::DashboardError;
use crate::interventions::merge_alert_rows;

/// Assemble the analytics summary for one teacher.
///
/// Classrooms are the root collection; alerts and interventions are
/// branches that degrade to empty (their panels then show zeros rather
/// than failing the whole screen).
///
/// # Errors
///
/// Returns [`DashboardError::RootFetch`] if classrooms cannot be listed.
pub async fn analytics_summary<A: PlatformApi>(
    api: &A,
    teacher_id: &str,
    branch_timeout: Duration,
    recent_limit: usize,
) -> Result<AnalyticsSummary, DashboardError> {
    let filter = AlertFilter {
        teacher_id: Some(teacher_id.to_string()),
        severity: None,
    };
    let (classrooms, alerts, interventions) = tokio::join!(
        api.list_teacher_classrooms(teacher_id),
        settle("alerts", branch_timeout, api.list_alerts(&filter)),
        settle(
            "interventions",
            branch_timeout,
            api.list_teacher_interventions(teacher_id),
        ),
    );
    let classrooms = classrooms.map_err(|source| DashboardError::root("classrooms", source))?;

    let mut counts = SeverityCounts::default();
    for alert in &alerts {
        match alert.severity {
            AlertSeverity::Critical => counts.critical += 1,
            AlertSeverity::AtRisk => counts.at_risk += 1,
            AlertSeverity::Monitor => counts.monitor += 1,
        }
    }

    let active = interventions
        .iter()
        .filter(|i| i.status == InterventionStatus::Active)
        .count();
    let completed = interventions.len() - active;

    let mut recent_alerts = merge_alert_rows(alerts, &interventions);
    recent_alerts.truncate(recent_limit);

    Ok(AnalyticsSummary {
        classroom_count: u32::try_from(classrooms.len()).unwrap_or(u32::MAX),
        student_count: classrooms.iter().map(|c| c.student_count).sum(),
        alerts: counts,
        active_interventions: u32::try_from(active).unwrap_or(u32::MAX),
        completed_interventions: u32::try_from(completed).unwrap_or(u32::MAX),
        recent_alerts,
    })
}
