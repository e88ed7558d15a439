//! services/harvester/src/adapters/steam.rs
//!
//! This module contains the adapter for the Steam store review API.
//! It implements the `ReviewFeed` port from the `core` crate.

use async_trait::async_trait;
use review_harvest_core::{
    Cursor, FeedEntry, FeedPage, GlobalSummary, PageRequest, PortError, PortResult, ReviewFeed,
};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

//=========================================================================================
// Wire Types
//=========================================================================================

#[derive(Debug, Deserialize)]
struct ReviewsResponse {
    #[serde(default)]
    success: i64,
    #[serde(default)]
    reviews: Vec<ReviewDto>,
    cursor: Option<String>,
    query_summary: Option<QuerySummaryDto>,
}

#[derive(Debug, Deserialize)]
struct ReviewDto {
    #[serde(default)]
    recommendationid: String,
    #[serde(default)]
    language: String,
    #[serde(default)]
    review: String,
    timestamp_created: Option<i64>,
    #[serde(default)]
    voted_up: bool,
    #[serde(default)]
    votes_up: u64,
    #[serde(default)]
    votes_funny: u64,
    #[serde(default)]
    comment_count: u64,
    #[serde(default)]
    steam_purchase: bool,
    #[serde(default)]
    received_for_free: bool,
    author: Option<AuthorDto>,
}

#[derive(Debug, Deserialize, Default)]
struct AuthorDto {
    #[serde(default)]
    steamid: String,
    playtime_at_review: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct QuerySummaryDto {
    #[serde(default)]
    review_score_desc: String,
    #[serde(default)]
    total_positive: u64,
    #[serde(default)]
    total_negative: u64,
    #[serde(default)]
    total_reviews: u64,
}

impl From<ReviewDto> for FeedEntry {
    fn from(dto: ReviewDto) -> Self {
        let author = dto.author.unwrap_or_default();
        FeedEntry {
            recommendation_id: dto.recommendationid,
            author_id: author.steamid,
            language: dto.language,
            body: dto.review,
            timestamp_created: dto.timestamp_created,
            voted_up: dto.voted_up,
            votes_up: dto.votes_up,
            votes_funny: dto.votes_funny,
            comment_count: dto.comment_count,
            steam_purchase: dto.steam_purchase,
            received_for_free: dto.received_for_free,
            playtime_at_review: author.playtime_at_review,
        }
    }
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `ReviewFeed` against the Steam store API.
#[derive(Clone)]
pub struct SteamFeedAdapter {
    client: reqwest::Client,
    base_url: String,
}

impl SteamFeedAdapter {
    /// Creates a new adapter with its own HTTP client.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> PortResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PortError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn reviews_url(&self, app_id: u32) -> String {
        format!("{}/appreviews/{}", self.base_url, app_id)
    }

    async fn get_reviews(
        &self,
        app_id: u32,
        query: &[(&str, String)],
    ) -> PortResult<ReviewsResponse> {
        let url = self.reviews_url(app_id);
        debug!(%url, "requesting review page");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(map_reqwest_error)?
            .error_for_status()
            .map_err(map_reqwest_error)?;

        let body: ReviewsResponse = response.json().await.map_err(map_reqwest_error)?;
        if body.success != 1 {
            return Err(PortError::Malformed(format!(
                "upstream reported success={}",
                body.success
            )));
        }
        Ok(body)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> PortError {
    match err.status() {
        Some(status) => PortError::Status(status.as_u16()),
        None => PortError::Transport(err.to_string()),
    }
}

//=========================================================================================
// `ReviewFeed` Trait Implementation
//=========================================================================================

#[async_trait]
impl ReviewFeed for SteamFeedAdapter {
    async fn fetch_page(&self, request: &PageRequest) -> PortResult<FeedPage> {
        // "filter=recent" keeps the feed newest-first, which the fetcher's
        // early-termination rule depends on, and guarantees pagination can
        // end with an empty list.
        let query = [
            ("json", "1".to_string()),
            ("language", request.language.clone()),
            ("review_type", "all".to_string()),
            ("purchase_type", "all".to_string()),
            ("filter", "recent".to_string()),
            ("num_per_page", request.page_size.to_string()),
            ("cursor", request.cursor.as_str().to_string()),
            (
                "filter_offtopic_activity",
                if request.include_offtopic { "1" } else { "0" }.to_string(),
            ),
        ];

        let body = self.get_reviews(request.app_id, &query).await?;
        Ok(FeedPage {
            entries: body.reviews.into_iter().map(FeedEntry::from).collect(),
            next_cursor: body.cursor.map(Cursor::new),
        })
    }

    async fn fetch_global_summary(
        &self,
        app_id: u32,
        language: &str,
    ) -> PortResult<GlobalSummary> {
        // A single minimal page; only the summary block is of interest.
        let query = [
            ("json", "1".to_string()),
            ("language", language.to_string()),
            ("review_type", "all".to_string()),
            ("purchase_type", "all".to_string()),
            ("filter", "recent".to_string()),
            ("num_per_page", "1".to_string()),
            ("cursor", Cursor::start().as_str().to_string()),
        ];

        let body = self.get_reviews(app_id, &query).await?;
        let summary = body
            .query_summary
            .ok_or_else(|| PortError::Malformed("response carried no query_summary".into()))?;
        Ok(GlobalSummary {
            score_desc: summary.review_score_desc,
            total_positive: summary.total_positive,
            total_negative: summary.total_negative,
            total_reviews: summary.total_reviews,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_dto_maps_author_fields() {
        let dto: ReviewDto = serde_json::from_str(
            r#"{
                "recommendationid": "777",
                "language": "english",
                "review": "solid",
                "timestamp_created": 1700000000,
                "voted_up": true,
                "votes_up": 3,
                "author": {"steamid": "7656", "playtime_at_review": 120}
            }"#,
        )
        .unwrap();
        let entry = FeedEntry::from(dto);

        assert_eq!(entry.recommendation_id, "777");
        assert_eq!(entry.author_id, "7656");
        assert_eq!(entry.playtime_at_review, Some(120));
        assert_eq!(entry.timestamp_created, Some(1700000000));
        assert!(entry.voted_up);
    }

    #[test]
    fn review_dto_tolerates_missing_fields() {
        let dto: ReviewDto = serde_json::from_str(r#"{"recommendationid": "1"}"#).unwrap();
        let entry = FeedEntry::from(dto);

        assert_eq!(entry.timestamp_created, None);
        assert_eq!(entry.author_id, "");
        assert_eq!(entry.playtime_at_review, None);
    }
}
