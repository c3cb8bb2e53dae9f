//! Grading queue: classrooms → projects → deliverables + milestones,
//! flattened into one newest-first sequence of [`GradableItem`]s.

use std::time::Duration;

use amep_api::{ApiError, PlatformApi};
use amep_core::{
    Deliverable, GradableItem, GradableKind, Grade, GradeSubmission, Milestone,
    MilestoneRejection, MilestoneReview, MilestoneStatus, Project,
};
use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;

use crate::branch::settle;
use crate::error::DashboardError;

/// The assembled grading queue.
///
/// Rebuilt on every fetch; mutations patch it in place (see
/// [`submit_grade`]) so the held sequence stays indistinguishable from a
/// fresh re-fetch for the fields a mutation touches.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GradingQueue {
    pub items: Vec<GradableItem>,
}

/// A grading decision applied to a milestone.
#[derive(Debug, Clone)]
pub enum MilestoneDecision {
    Approved { feedback: String },
    Rejected { reason: String },
}

/// Assemble the grading queue for one teacher.
///
/// The classroom list is the root: its failure fails the load. Every level
/// below — each classroom's projects, each project's deliverables and
/// milestones — is an isolated branch that degrades to empty on failure or
/// timeout. Each leaf is tagged with its ancestry (classroom name, project
/// title, team) so the queue renders without further lookups.
///
/// # Errors
///
/// Returns [`DashboardError::RootFetch`] if classrooms cannot be listed.
pub async fn grading_queue<A: PlatformApi>(
    api: &A,
    teacher_id: &str,
    branch_timeout: Duration,
) -> Result<GradingQueue, DashboardError> {
    let classrooms = api
        .list_teacher_classrooms(teacher_id)
        .await
        .map_err(|source| DashboardError::root("classrooms", source))?;

    let branches = classrooms.iter().map(|classroom| async move {
        let projects = settle(
            &format!("projects/{}", classroom.id),
            branch_timeout,
            api.list_classroom_projects(&classroom.id),
        )
        .await;

        let leaves = projects.into_iter().map(|project| async move {
            let deliverables_label = format!("deliverables/{}", project.id);
            let milestones_label = format!("milestones/{}", project.id);
            let (deliverables, milestones) = tokio::join!(
                settle(
                    &deliverables_label,
                    branch_timeout,
                    api.list_project_deliverables(&project.id),
                ),
                settle(
                    &milestones_label,
                    branch_timeout,
                    api.list_project_milestones(&project.id),
                ),
            );

            let mut items = Vec::with_capacity(deliverables.len() + milestones.len());
            items.extend(
                deliverables
                    .into_iter()
                    .map(|d| deliverable_item(d, &project, &classroom.name)),
            );
            items.extend(
                milestones
                    .into_iter()
                    .map(|m| milestone_item(m, &project, &classroom.name)),
            );
            items
        });

        join_all(leaves)
            .await
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
    });

    let mut items: Vec<GradableItem> = join_all(branches).await.into_iter().flatten().collect();
    // Stable sort: exact-timestamp ties keep insertion order.
    items.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
    Ok(GradingQueue { items })
}

impl GradingQueue {
    /// Patch a graded deliverable in place. Equivalent to what a re-fetch
    /// would show for `graded`, `grade`, and `feedback`.
    pub fn apply_grade(&mut self, item_id: &str, grade: f64, feedback: &str) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.kind == GradableKind::Deliverable && i.item_id == item_id)
        {
            item.graded = true;
            item.grade = Some(Grade::Score(grade));
            item.feedback = Some(feedback.to_string());
        }
    }

    /// Patch a reviewed milestone in place.
    pub fn apply_milestone_decision(&mut self, milestone_id: &str, decision: &MilestoneDecision) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.kind == GradableKind::Milestone && i.item_id == milestone_id)
        {
            item.graded = true;
            match decision {
                MilestoneDecision::Approved { feedback } => {
                    item.grade = Some(Grade::approved());
                    item.feedback = Some(feedback.clone());
                }
                MilestoneDecision::Rejected { reason } => {
                    item.grade = None;
                    item.feedback = Some(reason.clone());
                }
            }
        }
    }

    /// Pure post-filter for the "ungraded only" view.
    #[must_use]
    pub fn pending(&self) -> Vec<GradableItem> {
        self.items.iter().filter(|i| !i.graded).cloned().collect()
    }
}

/// Grade a deliverable.
///
/// Discipline: mutate-then-patch — on success the held queue is patched
/// rather than rebuilt, avoiding a visible reload. Nothing is patched
/// until the call succeeds.
///
/// # Errors
///
/// Passes the [`ApiError`] through untouched; it is retryable and no local
/// state has changed.
pub async fn submit_grade<A: PlatformApi>(
    api: &A,
    queue: &mut GradingQueue,
    item_id: &str,
    submission: &GradeSubmission,
) -> Result<(), ApiError> {
    api.update_deliverable_grade(item_id, submission).await?;
    queue.apply_grade(item_id, submission.grade, &submission.feedback);
    Ok(())
}

/// Approve a milestone. Same mutate-then-patch discipline as
/// [`submit_grade`].
///
/// # Errors
///
/// Passes the [`ApiError`] through untouched.
pub async fn approve_milestone<A: PlatformApi>(
    api: &A,
    queue: &mut GradingQueue,
    project_id: &str,
    milestone_id: &str,
    review: &MilestoneReview,
) -> Result<(), ApiError> {
    api.approve_milestone(project_id, milestone_id, review).await?;
    queue.apply_milestone_decision(
        milestone_id,
        &MilestoneDecision::Approved {
            feedback: review.feedback.clone(),
        },
    );
    Ok(())
}

/// Reject a milestone. Same mutate-then-patch discipline as
/// [`submit_grade`].
///
/// # Errors
///
/// Passes the [`ApiError`] through untouched.
pub async fn reject_milestone<A: PlatformApi>(
    api: &A,
    queue: &mut GradingQueue,
    project_id: &str,
    milestone_id: &str,
    rejection: &MilestoneRejection,
) -> Result<(), ApiError> {
    api.reject_milestone(project_id, milestone_id, rejection).await?;
    queue.apply_milestone_decision(
        milestone_id,
        &MilestoneDecision::Rejected {
            reason: rejection.reason.clone(),
        },
    );
    Ok(())
}

fn deliverable_item(d: Deliverable, project: &Project, classroom_name: &str) -> GradableItem {
    GradableItem {
        item_id: d.id,
        kind: GradableKind::Deliverable,
        project_id: d.project_id,
        project_title: project.title.clone(),
        classroom_name: classroom_name.to_string(),
        team_name: project.team_name.clone(),
        submitted_at: d.submitted_at.unwrap_or_else(Utc::now),
        graded: d.graded,
        grade: d.grade.map(Grade::Score),
        feedback: d.feedback,
        file_refs: d.files,
    }
}

fn milestone_item(m: Milestone, project: &Project, classroom_name: &str) -> GradableItem {
    GradableItem {
        item_id: m.id,
        kind: GradableKind::Milestone,
        project_id: m.project_id,
        project_title: project.title.clone(),
        classroom_name: classroom_name.to_string(),
        team_name: project.team_name.clone(),
        submitted_at: m.submitted_at.or(m.completed_at).unwrap_or_else(Utc::now),
        graded: m.status != MilestoneStatus::Pending,
        grade: (m.status == MilestoneStatus::Approved).then(Grade::approved),
        feedback: m.feedback,
        file_refs: m.files,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;

    fn project() -> Project {
        Project {
            id: "prj-1".into(),
            classroom_id: "cls-1".into(),
            title: "Bridge design".into(),
            team_name: Some("Team Rocket".into()),
        }
    }

    fn deliverable(id: &str, day: Option<u32>) -> Deliverable {
        Deliverable {
            id: id.into(),
            project_id: "prj-1".into(),
            title: "Draft".into(),
            submitted_at: day.map(|d| Utc.with_ymd_and_hms(2026, 2, d, 12, 0, 0).unwrap()),
            graded: false,
            grade: None,
            feedback: None,
            files: vec![],
        }
    }

    fn milestone(id: &str, status: MilestoneStatus) -> Milestone {
        Milestone {
            id: id.into(),
            project_id: "prj-1".into(),
            title: "Prototype".into(),
            submitted_at: None,
            completed_at: Some(Utc.with_ymd_and_hms(2026, 2, 8, 16, 0, 0).unwrap()),
            status,
            feedback: None,
            files: vec![],
        }
    }

    #[test]
    fn deliverable_item_carries_ancestry() {
        let item = deliverable_item(deliverable("del-1", Some(10)), &project(), "Physics 9A");
        assert_eq!(item.classroom_name, "Physics 9A");
        assert_eq!(item.project_title, "Bridge design");
        assert_eq!(item.team_name.as_deref(), Some("Team Rocket"));
        assert_eq!(item.kind, GradableKind::Deliverable);
    }

    #[test]
    fn missing_submitted_at_falls_back_to_completed_at() {
        let item = milestone_item(milestone("m-1", MilestoneStatus::Pending), &project(), "C");
        assert_eq!(
            item.submitted_at,
            Utc.with_ymd_and_hms(2026, 2, 8, 16, 0, 0).unwrap()
        );
    }

    #[test]
    fn missing_timestamps_fall_back_to_now() {
        let before = Utc::now();
        let item = deliverable_item(deliverable("del-1", None), &project(), "C");
        assert!(item.submitted_at >= before);
        assert!(item.submitted_at <= Utc::now());
    }

    #[test]
    fn approved_milestone_maps_to_approved_grade() {
        let item = milestone_item(milestone("m-1", MilestoneStatus::Approved), &project(), "C");
        assert!(item.graded);
        assert_eq!(item.grade, Some(Grade::approved()));
    }

    #[test]
    fn rejected_milestone_is_graded_without_grade() {
        let item = milestone_item(milestone("m-1", MilestoneStatus::Rejected), &project(), "C");
        assert!(item.graded);
        assert!(item.grade.is_none());
    }

    #[test]
    fn apply_grade_patches_matching_deliverable_only() {
        let mut queue = GradingQueue {
            items: vec![
                deliverable_item(deliverable("del-1", Some(10)), &project(), "C"),
                milestone_item(milestone("del-1", MilestoneStatus::Pending), &project(), "C"),
            ],
        };
        queue.apply_grade("del-1", 88.0, "Solid work");

        assert!(queue.items[0].graded);
        assert_eq!(queue.items[0].grade, Some(Grade::Score(88.0)));
        assert_eq!(queue.items[0].feedback.as_deref(), Some("Solid work"));
        // The milestone sharing the ID is untouched.
        assert!(!queue.items[1].graded);
    }

    #[test]
    fn apply_milestone_decision_patches_both_ways() {
        let mut queue = GradingQueue {
            items: vec![
                milestone_item(milestone("m-1", MilestoneStatus::Pending), &project(), "C"),
                milestone_item(milestone("m-2", MilestoneStatus::Pending), &project(), "C"),
            ],
        };

        queue.apply_milestone_decision(
            "m-1",
            &MilestoneDecision::Approved {
                feedback: "Ship it".into(),
            },
        );
        queue.apply_milestone_decision(
            "m-2",
            &MilestoneDecision::Rejected {
                reason: "Needs tests".into(),
            },
        );

        assert_eq!(queue.items[0].grade, Some(Grade::approved()));
        assert_eq!(queue.items[0].feedback.as_deref(), Some("Ship it"));
        assert!(queue.items[1].graded);
        assert!(queue.items[1].grade.is_none());
        assert_eq!(queue.items[1].feedback.as_deref(), Some("Needs tests"));
    }

    #[test]
    fn pending_filter_excludes_graded_items() {
        let mut graded = deliverable_item(deliverable("del-1", Some(10)), &project(), "C");
        graded.graded = true;
        let queue = GradingQueue {
            items: vec![
                graded,
                deliverable_item(deliverable("del-2", Some(11)), &project(), "C"),
            ],
        };
        let pending = queue.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].item_id, "del-2");
    }
}
