//! Gradable submissions: deliverables, milestones, and the normalized
//! [`GradableItem`] the grading queue is built from.
//!
//! Deliverables and milestones arrive from two distinct endpoints with two
//! distinct shapes. The aggregator tags and flattens both into `GradableItem`
//! so the grading queue is one ordered sequence; the item is never persisted
//! and is rebuilt on every fetch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reference to a submitted file. The annotation UI is out of scope; the
/// client only carries the label and URL through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub label: String,
    pub url: String,
}

/// A graded project deliverable as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deliverable {
    pub id: String,
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub graded: bool,
    #[serde(default)]
    pub grade: Option<f64>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub files: Vec<FileRef>,
}

/// Review state of a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneStatus {
    Pending,
    Approved,
    Rejected,
}

/// A project milestone awaiting approve/reject review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub status: MilestoneStatus,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub files: Vec<FileRef>,
}

/// Which endpoint a [`GradableItem`] was normalized from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradableKind {
    Deliverable,
    Milestone,
}

/// A recorded grade: numeric for deliverables, `"Approved"` for milestones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Grade {
    Score(f64),
    Label(String),
}

impl Grade {
    /// The milestone approval marker.
    #[must_use]
    pub fn approved() -> Self {
        Self::Label("Approved".into())
    }
}

/// Unified view over deliverables and milestones for the grading queue.
///
/// Each item is tagged with its ancestry (project title, classroom name,
/// team) so the queue can be displayed without further lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradableItem {
    pub item_id: String,
    pub kind: GradableKind,
    pub project_id: String,
    pub project_title: String,
    pub classroom_name: String,
    pub team_name: Option<String>,
    /// Normalized submission timestamp — `submitted_at || completed_at || now`
    /// so a missing upstream field never produces an unsortable item.
    pub submitted_at: DateTime<Utc>,
    pub graded: bool,
    pub grade: Option<Grade>,
    pub feedback: Option<String>,
    pub file_refs: Vec<FileRef>,
}

/// Payload for grading a deliverable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeSubmission {
    pub grade: f64,
    pub feedback: String,
    #[serde(default)]
    pub annotations: Vec<serde_json::Value>,
}

/// Payload for approving a milestone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneReview {
    pub feedback: String,
    #[serde(default)]
    pub annotations: Vec<serde_json::Value>,
}

/// Payload for rejecting a milestone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneRejection {
    pub reason: String,
    #[serde(default)]
    pub annotations: Vec<serde_json::Value>,
}
