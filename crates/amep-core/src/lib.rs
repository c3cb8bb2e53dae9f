//! # amep-core
//!
//! Core types for the AMEP client.
//!
//! This crate provides the foundational types shared across all AMEP crates:
//! - Identity and role types produced by `amep-session`
//! - Platform entities (classrooms, projects, deliverables, milestones,
//!   alerts, interventions) as returned by the REST API
//! - Normalized dashboard view models (`GradableItem`, `MergedAlertRow`)
//! - CLI response types

pub mod alert_row;
pub mod entities;
pub mod gradable;
pub mod identity;
pub mod responses;

pub use alert_row::{AlertRowStatus, MergedAlertRow};
pub use entities::{
    Alert, AlertBehavior, AlertFilter, AlertSeverity, Classroom, Intervention, InterventionStatus,
    NewIntervention, Project, Recommendation,
};
pub use gradable::{
    Deliverable, FileRef, GradableItem, GradableKind, Grade, GradeSubmission, Milestone,
    MilestoneRejection, MilestoneReview, MilestoneStatus,
};
pub use identity::{AuthPayload, Credentials, Identity, RegistrationProfile, Role};
