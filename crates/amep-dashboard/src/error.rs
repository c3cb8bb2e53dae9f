//! Dashboard error types.

use amep_api::ApiError;
use thiserror::Error;

/// Errors fatal to a dashboard load.
///
/// Only a root-level fetch failure is fatal; branch and leaf failures
/// degrade to empty results inside the aggregation. Mutation failures pass
/// through as [`ApiError`] so callers can retry them.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The dashboard's primary collection could not be fetched at all.
    #[error("failed to load {resource}: {source}")]
    RootFetch {
        resource: &'static str,
        source: ApiError,
    },
}

impl DashboardError {
    pub(crate) const fn root(resource: &'static str, source: ApiError) -> Self {
        Self::RootFetch { resource, source }
    }
}
