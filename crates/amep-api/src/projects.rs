//! Project, deliverable, and milestone listing endpoints.

use amep_core::{Deliverable, FileRef, Milestone, MilestoneStatus, Project};
use chrono::{DateTime, Utc};

use crate::{ApiClient, error::ApiError, http::check_response};

#[derive(serde::Deserialize)]
struct ProjectDto {
    id: String,
    classroom_id: String,
    title: String,
    #[serde(default)]
    team_name: Option<String>,
}

#[derive(serde::Deserialize)]
struct DeliverableDto {
    id: String,
    project_id: String,
    title: String,
    #[serde(default)]
    submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    grade: Option<f64>,
    #[serde(default)]
    feedback: Option<String>,
    #[serde(default)]
    files: Vec<FileRef>,
}

#[derive(serde::Deserialize)]
struct MilestoneDto {
    id: String,
    project_id: String,
    title: String,
    #[serde(default)]
    submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    status: Option<MilestoneStatus>,
    #[serde(default)]
    approved: Option<bool>,
    #[serde(default)]
    feedback: Option<String>,
    #[serde(default)]
    files: Vec<FileRef>,
}

impl DeliverableDto {
    fn into_deliverable(self) -> Deliverable {
        Deliverable {
            // The wire has no explicit graded flag; a recorded grade is the flag.
            graded: self.grade.is_some(),
            id: self.id,
            project_id: self.project_id,
            title: self.title,
            submitted_at: self.submitted_at,
            grade: self.grade,
            feedback: self.feedback,
            files: self.files,
        }
    }
}

impl MilestoneDto {
    fn into_milestone(self) -> Milestone {
        // Older endpoints report a bare `approved` bool instead of `status`.
        let status = self.status.unwrap_or(match self.approved {
            Some(true) => MilestoneStatus::Approved,
            Some(false) => MilestoneStatus::Rejected,
            None => MilestoneStatus::Pending,
        });
        Milestone {
            id: self.id,
            project_id: self.project_id,
            title: self.title,
            submitted_at: self.submitted_at,
            completed_at: self.completed_at,
            status,
            feedback: self.feedback,
            files: self.files,
        }
    }
}

impl ApiClient {
    /// `GET /api/classrooms/{classroom_id}/projects`.
    pub(crate) async fn list_classroom_projects_request(
        &self,
        classroom_id: &str,
    ) -> Result<Vec<Project>, ApiError> {
        let path = format!(
            "/api/classrooms/{}/projects",
            urlencoding::encode(classroom_id)
        );
        let resp = check_response(self.get(&path).send().await?).await?;
        let data: Vec<ProjectDto> = resp.json().await?;
        Ok(data
            .into_iter()
            .map(|p| Project {
                id: p.id,
                classroom_id: p.classroom_id,
                title: p.title,
                team_name: p.team_name,
            })
            .collect())
    }

    /// `GET /api/projects/{project_id}/deliverables`.
    pub(crate) async fn list_project_deliverables_request(
        &self,
        project_id: &str,
    ) -> Result<Vec<Deliverable>, ApiError> {
        let path = format!(
            "/api/projects/{}/deliverables",
            urlencoding::encode(project_id)
        );
        let resp = check_response(self.get(&path).send().await?).await?;
        let data: Vec<DeliverableDto> = resp.json().await?;
        Ok(data
            .into_iter()
            .map(DeliverableDto::into_deliverable)
            .collect())
    }

    /// `GET /api/projects/{project_id}/milestones`.
    pub(crate) async fn list_project_milestones_request(
        &self,
        project_id: &str,
    ) -> Result<Vec<Milestone>, ApiError> {
        let path = format!(
            "/api/projects/{}/milestones",
            urlencoding::encode(project_id)
        );
        let resp = check_response(self.get(&path).send().await?).await?;
        let data: Vec<MilestoneDto> = resp.json().await?;
        Ok(data.into_iter().map(MilestoneDto::into_milestone).collect())
    }
}
