//! Platform entities as returned by the AMEP REST API.
//!
//! These are the classroom-hierarchy and early-warning shapes the dashboard
//! aggregator fans out over. They carry only the fields the client core
//! reads; the backend owns the full records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A classroom owned by one teacher. Root of the grading-queue fan-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classroom {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub student_count: u32,
}

/// A project inside a classroom, worked on by one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub classroom_id: String,
    pub title: String,
    #[serde(default)]
    pub team_name: Option<String>,
}

/// Severity tier assigned to an at-risk alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertSeverity {
    Critical,
    AtRisk,
    Monitor,
}

/// One observed behavior contributing to an alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertBehavior {
    pub kind: String,
    pub detail: String,
}

/// An at-risk alert produced by the backend's early-warning pipeline.
/// Read-only to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub severity: AlertSeverity,
    #[serde(default)]
    pub behaviors: Vec<AlertBehavior>,
    pub detected_at: DateTime<Utc>,
}

/// Filter for the alert listing endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AlertFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<AlertSeverity>,
}

/// Lifecycle of an intervention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterventionStatus {
    Active,
    Completed,
}

/// A support intervention created by a teacher for one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intervention {
    pub id: String,
    pub student_id: String,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub status: InterventionStatus,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating an intervention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIntervention {
    pub student_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

/// A suggested intervention strategy for a struggling student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub student_id: String,
    pub strategy: String,
    #[serde(default)]
    pub rationale: String,
}
