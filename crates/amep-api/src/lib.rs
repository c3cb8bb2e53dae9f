//! # amep-api
//!
//! Typed REST client for the AMEP backend.
//!
//! One module per resource group (auth, classrooms, projects, interventions,
//! grading); each maps wire DTOs into `amep-core` types at the boundary so
//! the rest of the client never sees backend field-name quirks.
//!
//! The [`AuthApi`] and [`PlatformApi`] traits are the seams consumed by
//! `amep-session` and `amep-dashboard`; [`ApiClient`] implements both, and
//! tests substitute in-memory fakes.

pub mod auth;
pub mod classrooms;
pub mod grading;
pub mod interventions;
pub mod projects;

mod error;
mod http;

pub use error::ApiError;

use amep_core::{
    Alert, AlertFilter, AuthPayload, Classroom, Credentials, Deliverable, GradeSubmission,
    Intervention, InterventionStatus, Milestone, MilestoneRejection, MilestoneReview,
    NewIntervention, Project, Recommendation, RegistrationProfile,
};

/// Auth operations the session store depends on.
#[allow(async_fn_in_trait)] // consumers await in-task; no Send bound needed
pub trait AuthApi {
    async fn login(&self, credentials: &Credentials) -> Result<AuthPayload, ApiError>;
    async fn register(&self, profile: &RegistrationProfile) -> Result<AuthPayload, ApiError>;
    async fn verify_token(&self, token: &str) -> Result<bool, ApiError>;
}

/// Classroom, grading, and early-warning operations the dashboard
/// aggregator fans out over.
#[allow(async_fn_in_trait)] // consumers await in-task; no Send bound needed
pub trait PlatformApi {
    async fn list_teacher_classrooms(&self, teacher_id: &str) -> Result<Vec<Classroom>, ApiError>;
    async fn list_classroom_projects(&self, classroom_id: &str) -> Result<Vec<Project>, ApiError>;
    async fn list_project_deliverables(
        &self,
        project_id: &str,
    ) -> Result<Vec<Deliverable>, ApiError>;
    async fn list_project_milestones(&self, project_id: &str) -> Result<Vec<Milestone>, ApiError>;

    async fn list_alerts(&self, filter: &AlertFilter) -> Result<Vec<Alert>, ApiError>;
    async fn list_teacher_interventions(
        &self,
        teacher_id: &str,
    ) -> Result<Vec<Intervention>, ApiError>;
    async fn create_intervention(
        &self,
        payload: &NewIntervention,
    ) -> Result<Intervention, ApiError>;
    async fn update_intervention_status(
        &self,
        id: &str,
        status: InterventionStatus,
        notes: Option<&str>,
    ) -> Result<Intervention, ApiError>;
    async fn get_intervention_recommendations(
        &self,
        teacher_id: &str,
    ) -> Result<Vec<Recommendation>, ApiError>;

    async fn update_deliverable_grade(
        &self,
        id: &str,
        submission: &GradeSubmission,
    ) -> Result<Deliverable, ApiError>;
    async fn approve_milestone(
        &self,
        project_id: &str,
        milestone_id: &str,
        review: &MilestoneReview,
    ) -> Result<Milestone, ApiError>;
    async fn reject_milestone(
        &self,
        project_id: &str,
        milestone_id: &str,
        rejection: &MilestoneRejection,
    ) -> Result<Milestone, ApiError>;
}

/// HTTP client for the AMEP backend.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new client against `base_url`.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(base_url: &str, request_timeout: std::time::Duration) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent("amep/0.1")
                .timeout(request_timeout)
                .build()
                .expect("reqwest client should build"),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Return a client that sends `token` as a bearer credential.
    #[must_use]
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.request(reqwest::Method::GET, path)
    }

    pub(crate) fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.request(reqwest::Method::POST, path)
    }

    pub(crate) fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.request(reqwest::Method::PATCH, path)
    }
}

impl AuthApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<AuthPayload, ApiError> {
        self.login_request(credentials).await
    }

    async fn register(&self, profile: &RegistrationProfile) -> Result<AuthPayload, ApiError> {
        self.register_request(profile).await
    }

    async fn verify_token(&self, token: &str) -> Result<bool, ApiError> {
        self.verify_token_request(token).await
    }
}

impl PlatformApi for ApiClient {
    async fn list_teacher_classrooms(&self, teacher_id: &str) -> Result<Vec<Classroom>, ApiError> {
        self.list_teacher_classrooms_request(teacher_id).await
    }

    async fn list_classroom_projects(&self, classroom_id: &str) -> Result<Vec<Project>, ApiError> {
        self.list_classroom_projects_request(classroom_id).await
    }

    async fn list_project_deliverables(
        &self,
        project_id: &str,
    ) -> Result<Vec<Deliverable>, ApiError> {
        self.list_project_deliverables_request(project_id).await
    }

    async fn list_project_milestones(&self, project_id: &str) -> Result<Vec<Milestone>, ApiError> {
        self.list_project_milestones_request(project_id).await
    }

    async fn list_alerts(&self, filter: &AlertFilter) -> Result<Vec<Alert>, ApiError> {
        self.list_alerts_request(filter).await
    }

    async fn list_teacher_interventions(
        &self,
        teacher_id: &str,
    ) -> Result<Vec<Intervention>, ApiError> {
        self.list_teacher_interventions_request(teacher_id).await
    }

    async fn create_intervention(
        &self,
        payload: &NewIntervention,
    ) -> Result<Intervention, ApiError> {
        self.create_intervention_request(payload).await
    }

    async fn update_intervention_status(
        &self,
        id: &str,
        status: InterventionStatus,
        notes: Option<&str>,
    ) -> Result<Intervention, ApiError> {
        self.update_intervention_status_request(id, status, notes)
            .await
    }

    async fn get_intervention_recommendations(
        &self,
        teacher_id: &str,
    ) -> Result<Vec<Recommendation>, ApiError> {
        self.get_intervention_recommendations_request(teacher_id)
            .await
    }

    async fn update_deliverable_grade(
        &self,
        id: &str,
        submission: &GradeSubmission,
    ) -> Result<Deliverable, ApiError> {
        self.update_deliverable_grade_request(id, submission).await
    }

    async fn approve_milestone(
        &self,
        project_id: &str,
        milestone_id: &str,
        review: &MilestoneReview,
    ) -> Result<Milestone, ApiError> {
        self.approve_milestone_request(project_id, milestone_id, review)
            .await
    }

    async fn reject_milestone(
        &self,
        project_id: &str,
        milestone_id: &str,
        rejection: &MilestoneRejection,
    ) -> Result<Milestone, ApiError> {
        self.reject_milestone_request(project_id, milestone_id, rejection)
            .await
    }
}
