//! Alert, intervention, and recommendation endpoints.

use amep_core::{Alert, AlertFilter, Intervention, InterventionStatus, NewIntervention, Recommendation};

use crate::{ApiClient, error::ApiError, http::check_response};

#[derive(serde::Serialize)]
struct StatusUpdate<'a> {
    status: InterventionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

fn alerts_query(filter: &AlertFilter) -> String {
    let mut params = Vec::new();
    if let Some(teacher_id) = &filter.teacher_id {
        params.push(format!("teacher_id={}", urlencoding::encode(teacher_id)));
    }
    if let Some(severity) = filter.severity {
        // Query value matches the wire enum spelling (CRITICAL, AT_RISK, ...).
        let value = serde_json::to_value(severity).map_or_else(
            |_| String::new(),
            |v| v.as_str().unwrap_or_default().to_string(),
        );
        params.push(format!("severity={value}"));
    }
    if params.is_empty() {
        String::new()
    } else {
        format!("?{}", params.join("&"))
    }
}

impl ApiClient {
    /// `GET /api/alerts`.
    pub(crate) async fn list_alerts_request(
        &self,
        filter: &AlertFilter,
    ) -> Result<Vec<Alert>, ApiError> {
        let path = format!("/api/alerts{}", alerts_query(filter));
        let resp = check_response(self.get(&path).send().await?).await?;
        Ok(resp.json().await?)
    }

    /// `GET /api/teachers/{teacher_id}/interventions`.
    pub(crate) async fn list_teacher_interventions_request(
        &self,
        teacher_id: &str,
    ) -> Result<Vec<Intervention>, ApiError> {
        let path = format!(
            "/api/teachers/{}/interventions",
            urlencoding::encode(teacher_id)
        );
        let resp = check_response(self.get(&path).send().await?).await?;
        Ok(resp.json().await?)
    }

    /// `POST /api/interventions`.
    pub(crate) async fn create_intervention_request(
        &self,
        payload: &NewIntervention,
    ) -> Result<Intervention, ApiError> {
        let resp =
            check_response(self.post("/api/interventions").json(payload).send().await?).await?;
        Ok(resp.json().await?)
    }

    /// `PATCH /api/interventions/{id}`.
    pub(crate) async fn update_intervention_status_request(
        &self,
        id: &str,
        status: InterventionStatus,
        notes: Option<&str>,
    ) -> Result<Intervention, ApiError> {
        let path = format!("/api/interventions/{}", urlencoding::encode(id));
        let resp = check_response(
            self.patch(&path)
                .json(&StatusUpdate { status, notes })
                .send()
                .await?,
        )
        .await?;
        Ok(resp.json().await?)
    }

    /// `GET /api/teachers/{teacher_id}/recommendations`.
    pub(crate) async fn get_intervention_recommendations_request(
        &self,
        teacher_id: &str,
    ) -> Result<Vec<Recommendation>, ApiError> {
        let path = format!(
            "/api/teachers/{}/recommendations",
            urlencoding::encode(teacher_id)
        );
        let resp = check_response(self.get(&path).send().await?).await?;
        Ok(resp.json().await?)
    }
}
