//! End-to-end pipeline scenario: windowed fetch over a scripted feed,
//! followed by sampling and monthly aggregation of the same record set.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use review_harvest_core::{
    monthly_sample, monthly_summary, Cursor, FeedEntry, FeedPage, FetchConfig, GlobalSummary,
    MonthKey, PageRequest, PortResult, ReviewFeed, SampleMode, TimeWindow, WindowedReviewFetcher,
};
use std::sync::Arc;
use std::time::Duration;

struct PagedFeed {
    pages: Vec<FeedPage>,
}

#[async_trait]
impl ReviewFeed for PagedFeed {
    async fn fetch_page(&self, request: &PageRequest) -> PortResult<FeedPage> {
        let index: usize = if request.cursor == Cursor::start() {
            0
        } else {
            request.cursor.as_str().parse().unwrap()
        };
        Ok(self.pages.get(index).cloned().unwrap_or(FeedPage {
            entries: vec![],
            next_cursor: None,
        }))
    }

    async fn fetch_global_summary(&self, _app_id: u32, _language: &str) -> PortResult<GlobalSummary> {
        Ok(GlobalSummary {
            score_desc: "Very Positive".to_string(),
            total_positive: 120,
            total_negative: 30,
            total_reviews: 150,
        })
    }
}

fn entry(year: i32, month: u32, day: u32, voted_up: bool, votes_up: u64, id: usize) -> FeedEntry {
    FeedEntry {
        recommendation_id: format!("rec-{id}"),
        timestamp_created: Some(
            Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
                .unwrap()
                .timestamp(),
        ),
        voted_up,
        votes_up,
        ..FeedEntry::default()
    }
}

/// 150 upstream records, newest first: 100 after the window, 5 in February
/// (all positive), 20 in January (12 positive), 25 from 2023.
fn scripted_feed() -> PagedFeed {
    let mut entries = Vec::new();
    let mut id = 0;
    for i in 0..100 {
        entries.push(entry(2024, 4, 28 - i / 4, i % 2 == 0, i as u64, id));
        id += 1;
    }
    for i in 0..5 {
        entries.push(entry(2024, 2, 25 - i, true, i as u64, id));
        id += 1;
    }
    for i in 0..20 {
        entries.push(entry(2024, 1, 28 - i, i < 12, i as u64, id));
        id += 1;
    }
    for i in 0..25 {
        entries.push(entry(2023, 11, 25 - i / 2, true, 0, id));
        id += 1;
    }
    assert_eq!(entries.len(), 150);

    let pages = entries
        .chunks(50)
        .enumerate()
        .map(|(i, chunk)| FeedPage {
            entries: chunk.to_vec(),
            next_cursor: Some(Cursor::new((i + 1).to_string())),
        })
        .collect();
    PagedFeed { pages }
}

fn window() -> TimeWindow {
    TimeWindow::new(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
    )
}

#[tokio::test]
async fn fetch_sample_and_summarize() {
    let fetcher = WindowedReviewFetcher::new(
        Arc::new(scripted_feed()),
        FetchConfig {
            language: "english".to_string(),
            inter_request_delay: Duration::ZERO,
            ..FetchConfig::default()
        },
    );

    let reviews = fetcher.collect(367_520, window()).await.unwrap();
    assert_eq!(reviews.len(), 25);
    assert!(reviews
        .iter()
        .all(|r| window().contains(r.timestamp_created)));

    let rows = monthly_summary(&reviews).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].month, MonthKey::new(2024, 1));
    assert_eq!(rows[0].total_reviews, 20);
    assert_eq!(rows[0].positive, 12);
    assert_eq!(rows[0].negative, 8);
    assert_eq!(rows[0].pos_share, 0.6);
    assert_eq!(rows[1].month, MonthKey::new(2024, 2));
    assert_eq!(rows[1].total_reviews, 5);
    assert_eq!(rows[1].positive, 5);
    assert_eq!(rows[1].negative, 0);
    assert_eq!(rows[1].pos_share, 1.0);

    let sampled = monthly_sample(&reviews, 10, SampleMode::Random { seed: 123 });
    assert_eq!(sampled.len(), 15); // 10 of 20 in January, all 5 in February
    let rerun = monthly_sample(&reviews, 10, SampleMode::Random { seed: 123 });
    let ids: Vec<&str> = sampled.iter().map(|r| r.recommendation_id.as_str()).collect();
    let rerun_ids: Vec<&str> = rerun.iter().map(|r| r.recommendation_id.as_str()).collect();
    assert_eq!(ids, rerun_ids);
}
