//! crates/review_harvest_core/src/domain.rs
//!
//! Defines the pure, core data structures for the harvesting pipeline.
//! These structs are independent of any HTTP transport or serialization format.

use chrono::{DateTime, Datelike, Utc};
use std::fmt;

/// One user review retrieved from the upstream feed.
///
/// Constructed by the fetcher from a single raw feed entry and never mutated
/// afterwards; sampled subsets and monthly totals are new values, not views
/// into mutated records.
#[derive(Debug, Clone)]
pub struct Review {
    pub app_id: u32,
    pub recommendation_id: String,
    pub author_id: String,
    pub language: String,
    pub body: String,
    /// Creation time in epoch seconds. Authoritative for all window and
    /// month-bucket decisions. Defaults to 0 when the upstream omits it,
    /// which sorts the record outside any realistic window.
    pub timestamp_created: i64,
    /// UTC calendar time derived from `timestamp_created`.
    pub created_at: DateTime<Utc>,
    pub voted_up: bool,
    pub votes_up: u64,
    pub votes_funny: u64,
    pub comment_count: u64,
    pub steam_purchase: bool,
    pub received_for_free: bool,
    pub playtime_at_review: Option<u64>,
}

impl Review {
    /// Builds a review from one raw feed entry. A missing creation timestamp
    /// degrades to 0 rather than failing the batch.
    pub fn from_entry(app_id: u32, entry: FeedEntry) -> Self {
        let ts = entry.timestamp_created.unwrap_or(0);
        Self {
            app_id,
            recommendation_id: entry.recommendation_id,
            author_id: entry.author_id,
            language: entry.language,
            body: entry.body,
            timestamp_created: ts,
            created_at: DateTime::from_timestamp(ts, 0).unwrap_or(DateTime::UNIX_EPOCH),
            voted_up: entry.voted_up,
            votes_up: entry.votes_up,
            votes_funny: entry.votes_funny,
            comment_count: entry.comment_count,
            steam_purchase: entry.steam_purchase,
            received_for_free: entry.received_for_free,
            playtime_at_review: entry.playtime_at_review,
        }
    }

    /// Calendar year-month bucket of this review, in UTC.
    pub fn month(&self) -> MonthKey {
        MonthKey::from_datetime(self.created_at)
    }
}

/// One raw entry as handed over by the feed port, before it is normalized
/// into a [`Review`]. Optional fields mirror what the upstream may omit.
#[derive(Debug, Clone, Default)]
pub struct FeedEntry {
    pub recommendation_id: String,
    pub author_id: String,
    pub language: String,
    pub body: String,
    pub timestamp_created: Option<i64>,
    pub voted_up: bool,
    pub votes_up: u64,
    pub votes_funny: u64,
    pub comment_count: u64,
    pub steam_purchase: bool,
    pub received_for_free: bool,
    pub playtime_at_review: Option<u64>,
}

/// One page of the upstream feed: the raw entries plus the cursor for the
/// following page. An empty entry list signals end of feed.
#[derive(Debug, Clone)]
pub struct FeedPage {
    pub entries: Vec<FeedEntry>,
    /// Cursor for the next page. `None` means the upstream omitted it, in
    /// which case the caller keeps its current cursor.
    pub next_cursor: Option<Cursor>,
}

/// Opaque pagination token. Only meaningful within a single fetch session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor(String);

impl Cursor {
    /// The sentinel value the upstream expects for the first page.
    pub fn start() -> Self {
        Cursor("*".to_string())
    }

    pub fn new(token: impl Into<String>) -> Self {
        Cursor(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Half-open time interval `[start, end)` over review creation instants,
/// converted once to epoch-second bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start_ts: i64,
    end_ts: i64,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start_ts: start.timestamp(),
            end_ts: end.timestamp(),
        }
    }

    pub fn start_ts(&self) -> i64 {
        self.start_ts
    }

    pub fn end_ts(&self) -> i64 {
        self.end_ts
    }

    /// Window membership: `start <= ts < end`.
    pub fn contains(&self, ts: i64) -> bool {
        self.start_ts <= ts && ts < self.end_ts
    }

    /// True when `ts` falls strictly before the window start.
    pub fn is_below(&self, ts: i64) -> bool {
        ts < self.start_ts
    }
}

/// Calendar year-month grouping key, derived from a review's creation
/// instant. Orders chronologically and displays as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self {
            year: instant.year(),
            month: instant.month(),
        }
    }

    /// Months since year zero. Stable identity used for per-month sub-seed
    /// derivation in random sampling.
    pub fn index(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Product-wide review totals from the upstream's summary block, independent
/// of any time window.
#[derive(Debug, Clone)]
pub struct GlobalSummary {
    pub score_desc: String,
    pub total_positive: u64,
    pub total_negative: u64,
    pub total_reviews: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn window_is_half_open() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let window = TimeWindow::new(start, end);

        assert!(window.contains(start.timestamp()));
        assert!(window.contains(end.timestamp() - 1));
        assert!(!window.contains(end.timestamp()));
        assert!(!window.contains(start.timestamp() - 1));
        assert!(window.is_below(start.timestamp() - 1));
        assert!(!window.is_below(start.timestamp()));
    }

    #[test]
    fn month_key_orders_and_displays() {
        let jan = MonthKey::new(2024, 1);
        let feb = MonthKey::new(2024, 2);
        let dec_prev = MonthKey::new(2023, 12);

        assert!(dec_prev < jan);
        assert!(jan < feb);
        assert_eq!(jan.to_string(), "2024-01");
        assert_eq!(feb.index() - jan.index(), 1);
        assert_eq!(jan.index() - dec_prev.index(), 1);
    }

    #[test]
    fn missing_timestamp_defaults_to_epoch() {
        let entry = FeedEntry {
            recommendation_id: "1".into(),
            timestamp_created: None,
            ..FeedEntry::default()
        };
        let review = Review::from_entry(42, entry);
        assert_eq!(review.timestamp_created, 0);
        assert_eq!(review.created_at, DateTime::UNIX_EPOCH);
        assert_eq!(review.month(), MonthKey::new(1970, 1));
    }
}
