//! Merged alert rows for the interventions dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{AlertSeverity, Intervention};

/// Triage state of a merged alert row.
///
/// `InterventionActive` iff the row's linked intervention exists and is not
/// completed. `Completed` when the only interventions for the student are
/// completed ones. `NeedsAttention` when no intervention exists at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertRowStatus {
    NeedsAttention,
    InterventionActive,
    Completed,
}

/// One alert joined with any intervention linked to the same student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedAlertRow {
    /// Row key; the alert's ID.
    pub row_id: String,
    pub student_id: String,
    pub student_name: String,
    pub severity: AlertSeverity,
    /// Human-readable summary of the alert's behaviors.
    pub reason: String,
    pub date: DateTime<Utc>,
    pub linked_intervention: Option<Intervention>,
    pub status: AlertRowStatus,
}
