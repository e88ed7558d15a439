//! crates/review_harvest_core/src/fetch.rs
//!
//! Drives cursor pagination against the review feed and yields only the
//! records whose creation time falls inside a caller-supplied window.
//!
//! The upstream feed is consumed in "most recent first" order. That ordering
//! is what makes early termination possible: once a page's oldest record is
//! older than the window start, no later page can contain in-window records.
//! The feed's ordering contract cannot be verified from here; if the upstream
//! ever returns out-of-order pages the fetch truncates silently. Known
//! limitation, kept behind the single `page_ends_below_window` check.

use crate::domain::{FeedPage, Review, TimeWindow};
use crate::error::HarvestError;
use crate::ports::{PageRequest, ReviewFeed};
use async_stream::try_stream;
use futures::Stream;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Per-session fetch settings supplied by the caller.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Upstream language filter; `"all"` disables it.
    pub language: String,
    pub include_offtopic: bool,
    pub page_size: u32,
    /// Pause between page requests. Throttling courtesy to the upstream,
    /// not a correctness mechanism.
    pub inter_request_delay: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            language: "all".to_string(),
            include_offtopic: false,
            page_size: 100,
            inter_request_delay: Duration::from_millis(300),
        }
    }
}

/// A lazy, finite, non-restartable sequence of in-window reviews.
/// Dropping it early stops the session without issuing further requests.
pub type ReviewStream = Pin<Box<dyn Stream<Item = Result<Review, HarvestError>> + Send>>;

/// The single named check behind the early-termination rule.
///
/// Under the newest-first ordering assumption, a page whose oldest (last)
/// entry is already below the window start means every remaining page is
/// below it too.
fn page_ends_below_window(page: &FeedPage, window: &TimeWindow) -> bool {
    page.entries
        .last()
        .map(|entry| window.is_below(entry.timestamp_created.unwrap_or(0)))
        .unwrap_or(false)
}

/// Fetches one product's reviews restricted to a time window, page by page.
pub struct WindowedReviewFetcher {
    feed: Arc<dyn ReviewFeed>,
    config: FetchConfig,
}

impl WindowedReviewFetcher {
    pub fn new(feed: Arc<dyn ReviewFeed>, config: FetchConfig) -> Self {
        Self { feed, config }
    }

    /// Streams every review of `app_id` whose creation timestamp lies in
    /// `window`, newest first.
    ///
    /// Terminates cleanly on an empty page (feed exhausted) or when a page
    /// ends below the window start. Any feed error aborts the stream with
    /// [`HarvestError::RetrievalFailed`].
    pub fn stream(&self, app_id: u32, window: TimeWindow) -> ReviewStream {
        let feed = Arc::clone(&self.feed);
        let config = self.config.clone();

        Box::pin(try_stream! {
            let mut request = PageRequest::first(
                app_id,
                config.language.clone(),
                config.include_offtopic,
                config.page_size,
            );
            let mut page_no = 0u32;

            loop {
                let page = feed.fetch_page(&request).await?;
                page_no += 1;
                debug!(page_no, entries = page.entries.len(), "fetched review page");

                if page.entries.is_empty() {
                    break;
                }

                let stop = page_ends_below_window(&page, &window);
                let next_cursor = page.next_cursor;

                for entry in page.entries {
                    if window.contains(entry.timestamp_created.unwrap_or(0)) {
                        yield Review::from_entry(app_id, entry);
                    }
                }

                if stop {
                    debug!(page_no, "page ended below window start, stopping pagination");
                    break;
                }

                // Keep the current cursor when the upstream omits one.
                if let Some(cursor) = next_cursor {
                    request = request.advance(cursor);
                }
                if !config.inter_request_delay.is_zero() {
                    tokio::time::sleep(config.inter_request_delay).await;
                }
            }
        })
    }

    /// Materializes the whole window into memory, in stream order.
    pub async fn collect(&self, app_id: u32, window: TimeWindow) -> Result<Vec<Review>, HarvestError> {
        use futures::StreamExt;

        let mut stream = self.stream(app_id, window);
        let mut reviews = Vec::new();
        while let Some(review) = stream.next().await {
            reviews.push(review?);
        }
        Ok(reviews)
    }
}
