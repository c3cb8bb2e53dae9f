//! CLI response types returned as JSON by `amep` commands.
//!
//! These structs define the shape of JSON output for commands like
//! `amep auth status`, `amep interventions list`, and `amep analytics`.

use serde::{Deserialize, Serialize};

use crate::alert_row::MergedAlertRow;
use crate::entities::Recommendation;
use crate::identity::Role;

/// Response from `amep auth login` and `amep auth register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthSessionResponse {
    pub authenticated: bool,
    pub user_id: String,
    pub role: Role,
    pub display_name: String,
}

/// Response from `amep auth status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
    pub user_id: Option<String>,
    pub role: Option<Role>,
    pub display_name: Option<String>,
    /// Where the persisted session was found (`keyring` or `file`).
    pub credential_source: Option<String>,
}

/// Response from `amep interventions list`: the merged alert rows plus
/// suggested strategies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InterventionBoardResponse {
    pub rows: Vec<MergedAlertRow>,
    pub recommendations: Vec<Recommendation>,
}

/// Alert counts by severity tier.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeverityCounts {
    pub critical: u32,
    pub at_risk: u32,
    pub monitor: u32,
}

/// Response from `amep analytics`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyticsSummary {
    pub classroom_count: u32,
    pub student_count: u32,
    pub alerts: SeverityCounts,
    pub active_interventions: u32,
    pub completed_interventions: u32,
    /// Newest merged alert rows, for the "recent activity" panel.
    pub recent_alerts: Vec<MergedAlertRow>,
}
