//! # amep-dashboard
//!
//! Dashboard aggregation for the AMEP client.
//!
//! Each dashboard routine takes a root identity (a teacher ID), fans out
//! tiered concurrent fetches through [`amep_api::PlatformApi`], and folds
//! the heterogeneous results into one ordered view-model sequence:
//!
//! - [`interventions::intervention_board`] — alerts merged with
//!   interventions into triaged rows
//! - [`grading::grading_queue`] — classrooms → projects → deliverables +
//!   milestones, flattened newest-first
//! - [`analytics::analytics_summary`] — counts plus recent activity
//!
//! Branch failures degrade to empty results ([`branch::settle`]); only a
//! root fetch failure fails a load. Overlapping refreshes are serialized
//! by ignoring stale passes ([`pass::PassCounter`]).

pub mod analytics;
pub mod branch;
pub mod grading;
pub mod interventions;
pub mod pass;

mod error;

pub use error::DashboardError;
pub use grading::{GradingQueue, MilestoneDecision};
pub use pass::{Pass, PassCounter};
