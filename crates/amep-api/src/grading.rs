//! Grading endpoints: deliverable grades and milestone approve/reject.

use amep_core::{Deliverable, GradeSubmission, Milestone, MilestoneRejection, MilestoneReview};

use crate::{ApiClient, error::ApiError, http::check_response};

impl ApiClient {
    /// `PATCH /api/deliverables/{id}/grade`.
    pub(crate) async fn update_deliverable_grade_request(
        &self,
        id: &str,
        submission: &GradeSubmission,
    ) -> Result<Deliverable, ApiError> {
        let path = format!("/api/deliverables/{}/grade", urlencoding::encode(id));
        let resp = check_response(self.patch(&path).json(submission).send().await?).await?;
        Ok(resp.json().await?)
    }

    /// `POST /api/projects/{project_id}/milestones/{milestone_id}/approve`.
    pub(crate) async fn approve_milestone_request(
        &self,
        project_id: &str,
        milestone_id: &str,
        review: &MilestoneReview,
    ) -> Result<Milestone, ApiError> {
        let path = format!(
            "/api/projects/{}/milestones/{}/approve",
            urlencoding::encode(project_id),
            urlencoding::encode(milestone_id)
        );
        let resp = check_response(self.post(&path).json(review).send().await?).await?;
        Ok(resp.json().await?)
    }

    /// `POST /api/projects/{project_id}/milestones/{milestone_id}/reject`.
    pub(crate) async fn reject_milestone_request(
        &self,
        project_id: &str,
        milestone_id: &str,
        rejection: &MilestoneRejection,
    ) -> Result<Milestone, ApiError> {
        let path = format!(
            "/api/projects/{}/milestones/{}/reject",
            urlencoding::encode(project_id),
            urlencoding::encode(milestone_id)
        );
        let resp = check_response(self.post(&path).json(rejection).send().await?).await?;
        Ok(resp.json().await?)
    }
}
