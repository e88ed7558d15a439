//! crates/review_harvest_core/src/error.rs
//!
//! Defines the primary error type for the harvesting core.

use crate::ports::PortError;

/// The primary error type for the `review_harvest_core` crate.
#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    /// The given URL does not contain a recognizable product identifier.
    #[error("could not locate a product id in '{0}'")]
    InvalidIdentifierSource(String),

    /// A feed request failed mid-pagination. The whole fetch session is
    /// aborted; no partial result is surfaced.
    #[error("review feed request failed: {0}")]
    RetrievalFailed(#[from] PortError),

    /// A monthly group was summarized with zero members. Grouping only ever
    /// produces non-empty groups, so this guards refactors, not data.
    #[error("cannot summarize an empty month group")]
    DivisionUndefined,
}
