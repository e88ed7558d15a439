//! crates/review_harvest_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the harvesting core.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to stay independent of the concrete HTTP client talking to the
//! upstream review feed.

use crate::domain::{Cursor, FeedPage, GlobalSummary};
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for feed port operations.
/// This abstracts away the specific errors of the underlying HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("malformed upstream response: {0}")]
    Malformed(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Feed Port (Trait)
//=========================================================================================

/// Immutable state of one page request against the review feed.
///
/// A new value is derived per iteration via [`PageRequest::advance`]; the
/// pagination loop never mutates a shared request in place.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub app_id: u32,
    pub language: String,
    pub include_offtopic: bool,
    pub page_size: u32,
    pub cursor: Cursor,
}

impl PageRequest {
    pub fn first(app_id: u32, language: String, include_offtopic: bool, page_size: u32) -> Self {
        Self {
            app_id,
            language,
            include_offtopic,
            // Zero-sized pages would never terminate; clamp rather than fail.
            page_size: page_size.max(1),
            cursor: Cursor::start(),
        }
    }

    /// The same request pointed at the next page.
    pub fn advance(&self, cursor: Cursor) -> Self {
        Self {
            cursor,
            ..self.clone()
        }
    }
}

/// One product's review feed, as seen by the core.
///
/// Implemented by the Steam Web API adapter in production and by scripted
/// stubs in tests. Retry policy, if any, lives behind this trait; the core
/// treats every error as terminal for the current fetch session.
#[async_trait]
pub trait ReviewFeed: Send + Sync {
    /// Fetches a single page of reviews at the request's cursor position.
    async fn fetch_page(&self, request: &PageRequest) -> PortResult<FeedPage>;

    /// Fetches the product-wide review totals, independent of pagination.
    async fn fetch_global_summary(&self, app_id: u32, language: &str)
        -> PortResult<GlobalSummary>;
}
