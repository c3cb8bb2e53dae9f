//! Interventions dashboard: at-risk alerts merged with their interventions.

use std::time::Duration;

use amep_api::{ApiError, PlatformApi};
use amep_core::{
    Alert, AlertBehavior, AlertFilter, AlertRowStatus, AlertSeverity, Intervention,
    InterventionStatus, MergedAlertRow, NewIntervention,
    responses::InterventionBoardResponse,
};

use crate::branch::settle;
use crate::error::DashboardError;

/// Assemble the interventions dashboard for one teacher.
///
/// Alerts and the teacher's interventions are the dashboard's primary
/// collections — either failing fails the load. Recommendations are a
/// branch and degrade to empty.
///
/// # Errors
///
/// Returns [`DashboardError::RootFetch`] if alerts or interventions cannot
/// be listed.
pub async fn intervention_board<A: PlatformApi>(
    api: &A,
    teacher_id: &str,
    branch_timeout: Duration,
) -> Result<InterventionBoardResponse, DashboardError> {
    let filter = AlertFilter {
        teacher_id: Some(teacher_id.to_string()),
        severity: None,
    };
    let (alerts, interventions, recommendations) = tokio::join!(
        api.list_alerts(&filter),
        api.list_teacher_interventions(teacher_id),
        settle(
            "recommendations",
            branch_timeout,
            api.get_intervention_recommendations(teacher_id),
        ),
    );
    let alerts = alerts.map_err(|source| DashboardError::root("alerts", source))?;
    let interventions =
        interventions.map_err(|source| DashboardError::root("interventions", source))?;

    Ok(InterventionBoardResponse {
        rows: merge_alert_rows(alerts, &interventions),
        recommendations,
    })
}

/// Merge alerts with interventions into triaged rows, newest first.
///
/// An alert links to the first non-completed intervention for its student,
/// in list order (the backend does not document its ordering; first match
/// is the tie-break). With no active match but a completed intervention on
/// record, the row is `Completed`; with no intervention at all it is
/// `NeedsAttention`.
#[must_use]
pub fn merge_alert_rows(
    alerts: Vec<Alert>,
    interventions: &[Intervention],
) -> Vec<MergedAlertRow> {
    let mut rows: Vec<MergedAlertRow> = alerts
        .into_iter()
        .map(|alert| {
            let active = interventions.iter().find(|i| {
                i.student_id == alert.student_id && i.status != InterventionStatus::Completed
            });
            let (linked_intervention, status) = match active {
                Some(intervention) => {
                    (Some(intervention.clone()), AlertRowStatus::InterventionActive)
                }
                None => interventions
                    .iter()
                    .find(|i| i.student_id == alert.student_id)
                    .map_or((None, AlertRowStatus::NeedsAttention), |intervention| {
                        (Some(intervention.clone()), AlertRowStatus::Completed)
                    }),
            };
            MergedAlertRow {
                row_id: alert.id,
                student_id: alert.student_id,
                student_name: alert.student_name,
                severity: alert.severity,
                reason: summarize_behaviors(&alert.behaviors),
                date: alert.detected_at,
                linked_intervention,
                status,
            }
        })
        .collect();

    // Stable sort: exact-timestamp ties keep insertion order.
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows
}

/// Pure post-filter over merged rows. Filtering never refetches.
#[must_use]
pub fn filter_rows(
    rows: &[MergedAlertRow],
    status: Option<AlertRowStatus>,
    severity: Option<AlertSeverity>,
) -> Vec<MergedAlertRow> {
    rows.iter()
        .filter(|row| status.is_none_or(|s| row.status == s))
        .filter(|row| severity.is_none_or(|s| row.severity == s))
        .cloned()
        .collect()
}

/// Create an intervention.
///
/// Discipline: mutate-then-invalidate — on success the caller re-runs
/// [`intervention_board`] rather than patching rows locally.
///
/// # Errors
///
/// Passes the [`ApiError`] through untouched; it is retryable and no local
/// state has changed.
pub async fn create_intervention<A: PlatformApi>(
    api: &A,
    payload: &NewIntervention,
) -> Result<Intervention, ApiError> {
    api.create_intervention(payload).await
}

/// Mark an intervention completed. Same mutate-then-invalidate discipline
/// as [`create_intervention`].
///
/// # Errors
///
/// Passes the [`ApiError`] through untouched.
pub async fn complete_intervention<A: PlatformApi>(
    api: &A,
    id: &str,
    notes: Option<&str>,
) -> Result<Intervention, ApiError> {
    api.update_intervention_status(id, InterventionStatus::Completed, notes)
        .await
}

fn summarize_behaviors(behaviors: &[AlertBehavior]) -> String {
    if behaviors.is_empty() {
        return "No recorded behaviors".into();
    }
    behaviors
        .iter()
        .map(|b| b.detail.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn alert(id: &str, student_id: &str, day: u32) -> Alert {
        Alert {
            id: id.into(),
            student_id: student_id.into(),
            student_name: format!("Student {student_id}"),
            severity: AlertSeverity::AtRisk,
            behaviors: vec![AlertBehavior {
                kind: "engagement".into(),
                detail: "No submissions this week".into(),
            }],
            detected_at: Utc.with_ymd_and_hms(2026, 2, day, 9, 0, 0).unwrap(),
        }
    }

    fn intervention(id: &str, student_id: &str, status: InterventionStatus) -> Intervention {
        Intervention {
            id: id.into(),
            student_id: student_id.into(),
            student_name: None,
            kind: "tutoring".into(),
            description: "Weekly check-in".into(),
            status,
            created_at: Utc.with_ymd_and_hms(2026, 2, 1, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn unmatched_alert_needs_attention() {
        let rows = merge_alert_rows(vec![alert("alr-1", "stu-1", 10)], &[]);
        assert_eq!(rows[0].status, AlertRowStatus::NeedsAttention);
        assert!(rows[0].linked_intervention.is_none());
    }

    #[test]
    fn active_intervention_links_and_marks_row() {
        let interventions = vec![intervention("int-1", "stu-1", InterventionStatus::Active)];
        let rows = merge_alert_rows(vec![alert("alr-1", "stu-1", 10)], &interventions);
        assert_eq!(rows[0].status, AlertRowStatus::InterventionActive);
        assert_eq!(
            rows[0].linked_intervention.as_ref().unwrap().id,
            "int-1"
        );
    }

    #[test]
    fn completed_only_interventions_mark_row_completed() {
        let interventions = vec![intervention("int-1", "stu-1", InterventionStatus::Completed)];
        let rows = merge_alert_rows(vec![alert("alr-1", "stu-1", 10)], &interventions);
        assert_eq!(rows[0].status, AlertRowStatus::Completed);
    }

    #[test]
    fn first_non_completed_match_wins() {
        let interventions = vec![
            intervention("int-done", "stu-1", InterventionStatus::Completed),
            intervention("int-a", "stu-1", InterventionStatus::Active),
            intervention("int-b", "stu-1", InterventionStatus::Active),
        ];
        let rows = merge_alert_rows(vec![alert("alr-1", "stu-1", 10)], &interventions);
        assert_eq!(rows[0].linked_intervention.as_ref().unwrap().id, "int-a");
    }

    #[test]
    fn rows_sorted_newest_first() {
        let rows = merge_alert_rows(
            vec![
                alert("alr-old", "stu-1", 2),
                alert("alr-new", "stu-2", 20),
                alert("alr-mid", "stu-3", 11),
            ],
            &[],
        );
        let ids: Vec<&str> = rows.iter().map(|r| r.row_id.as_str()).collect();
        assert_eq!(ids, vec!["alr-new", "alr-mid", "alr-old"]);
    }

    #[test]
    fn timestamp_ties_keep_insertion_order() {
        let rows = merge_alert_rows(
            vec![alert("alr-a", "stu-1", 10), alert("alr-b", "stu-2", 10)],
            &[],
        );
        let ids: Vec<&str> = rows.iter().map(|r| r.row_id.as_str()).collect();
        assert_eq!(ids, vec!["alr-a", "alr-b"]);
    }

    #[test]
    fn reason_joins_behavior_details() {
        let mut one = alert("alr-1", "stu-1", 10);
        one.behaviors.push(AlertBehavior {
            kind: "attendance".into(),
            detail: "2 absences".into(),
        });
        let rows = merge_alert_rows(vec![one], &[]);
        assert_eq!(rows[0].reason, "No submissions this week; 2 absences");
    }

    #[test]
    fn empty_behaviors_get_placeholder_reason() {
        let mut bare = alert("alr-1", "stu-1", 10);
        bare.behaviors.clear();
        let rows = merge_alert_rows(vec![bare], &[]);
        assert_eq!(rows[0].reason, "No recorded behaviors");
    }

    #[rstest]
    #[case(Some(AlertRowStatus::NeedsAttention), 1)]
    #[case(Some(AlertRowStatus::InterventionActive), 1)]
    #[case(Some(AlertRowStatus::Completed), 0)]
    #[case(None, 2)]
    fn status_filter_counts(#[case] status: Option<AlertRowStatus>, #[case] expected: usize) {
        let interventions = vec![intervention("int-1", "stu-2", InterventionStatus::Active)];
        let rows = merge_alert_rows(
            vec![alert("alr-1", "stu-1", 10), alert("alr-2", "stu-2", 11)],
            &interventions,
        );
        assert_eq!(filter_rows(&rows, status, None).len(), expected);
    }

    #[test]
    fn filter_is_pure_post_filter() {
        let interventions = vec![intervention("int-1", "stu-2", InterventionStatus::Active)];
        let rows = merge_alert_rows(
            vec![alert("alr-1", "stu-1", 10), alert("alr-2", "stu-2", 11)],
            &interventions,
        );

        let active = filter_rows(&rows, Some(AlertRowStatus::InterventionActive), None);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].row_id, "alr-2");

        // The source sequence is untouched.
        assert_eq!(rows.len(), 2);

        let at_risk = filter_rows(&rows, None, Some(AlertSeverity::AtRisk));
        assert_eq!(at_risk.len(), 2);
        let critical = filter_rows(&rows, None, Some(AlertSeverity::Critical));
        assert!(critical.is_empty());
    }
}
