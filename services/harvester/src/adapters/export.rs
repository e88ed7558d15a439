//! services/harvester/src/adapters/export.rs
//!
//! CSV export sinks for the sampled review subset and the monthly summary.
//! The core hands over ordered named columns; file naming and directory
//! bookkeeping live here, not in the core.

use chrono::Utc;
use review_harvest_core::{MonthlySummaryRow, Review};
use std::path::{Path, PathBuf};

/// Errors raised while persisting export files.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes run artifacts into one output directory, each file tagged with the
/// run timestamp so repeated runs never clobber each other.
pub struct CsvExporter {
    output_dir: PathBuf,
    run_tag: String,
}

impl CsvExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            run_tag: Utc::now().format("%Y%m%d_%H%M%S").to_string(),
        }
    }

    #[cfg(test)]
    fn with_run_tag(output_dir: impl Into<PathBuf>, run_tag: &str) -> Self {
        Self {
            output_dir: output_dir.into(),
            run_tag: run_tag.to_string(),
        }
    }

    fn target_path(&self, label: &str, kind: &str) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(&self.output_dir)?;
        Ok(self
            .output_dir
            .join(format!("{}_{}_{}.csv", label, kind, self.run_tag)))
    }

    /// Persists the sampled review subset, one row per review.
    pub fn write_sample(&self, label: &str, reviews: &[Review]) -> Result<PathBuf, ExportError> {
        let path = self.target_path(label, "sample_reviews")?;
        write_sample_csv(&path, reviews)?;
        Ok(path)
    }

    /// Persists the monthly summary, one row per month.
    pub fn write_monthly_summary(
        &self,
        label: &str,
        rows: &[MonthlySummaryRow],
    ) -> Result<PathBuf, ExportError> {
        let path = self.target_path(label, "monthly_summary")?;
        write_summary_csv(&path, rows)?;
        Ok(path)
    }
}

fn write_sample_csv(path: &Path, reviews: &[Review]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "app_id",
        "recommendationid",
        "author_steamid",
        "language",
        "review_text",
        "timestamp_created",
        "datetime_created_utc",
        "voted_up",
        "votes_up",
        "votes_funny",
        "comment_count",
        "steam_purchase",
        "received_for_free",
        "playtime_at_review",
        "month",
    ])?;
    for review in reviews {
        writer.write_record([
            review.app_id.to_string(),
            review.recommendation_id.clone(),
            review.author_id.clone(),
            review.language.clone(),
            review.body.clone(),
            review.timestamp_created.to_string(),
            review.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            review.voted_up.to_string(),
            review.votes_up.to_string(),
            review.votes_funny.to_string(),
            review.comment_count.to_string(),
            review.steam_purchase.to_string(),
            review.received_for_free.to_string(),
            review
                .playtime_at_review
                .map(|p| p.to_string())
                .unwrap_or_default(),
            review.month().to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_summary_csv(path: &Path, rows: &[MonthlySummaryRow]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["month", "total_reviews", "positive", "negative", "pos_share"])?;
    for row in rows {
        writer.write_record([
            row.month.to_string(),
            row.total_reviews.to_string(),
            row.positive.to_string(),
            row.negative.to_string(),
            format!("{:.3}", row.pos_share),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use review_harvest_core::{FeedEntry, MonthKey};

    fn review(ts: i64) -> Review {
        Review::from_entry(
            42,
            FeedEntry {
                recommendation_id: "r1".into(),
                author_id: "a1".into(),
                language: "english".into(),
                body: "nice, has\ncommas and newlines".into(),
                timestamp_created: Some(ts),
                voted_up: true,
                votes_up: 5,
                playtime_at_review: Some(90),
                ..FeedEntry::default()
            },
        )
    }

    #[test]
    fn writes_sample_with_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvExporter::with_run_tag(dir.path(), "20240101_000000");
        let ts = chrono::Utc
            .with_ymd_and_hms(2024, 1, 15, 8, 0, 0)
            .unwrap()
            .timestamp();

        let path = exporter.write_sample("Game_42", &[review(ts)]).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "Game_42_sample_reviews_20240101_000000.csv"
        );

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "app_id");
        assert_eq!(&headers[14], "month");

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][1], "r1");
        assert_eq!(&rows[0][14], "2024-01");
    }

    #[test]
    fn writes_monthly_summary_rows() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvExporter::with_run_tag(dir.path(), "20240101_000000");
        let rows = vec![MonthlySummaryRow {
            month: MonthKey::new(2024, 2),
            total_reviews: 5,
            positive: 5,
            negative: 0,
            pos_share: 1.0,
        }];

        let path = exporter
            .write_monthly_summary("Game_42", &rows)
            .unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("month,total_reviews,positive,negative,pos_share"));
        assert!(content.contains("2024-02,5,5,0,1.000"));
    }

    #[test]
    fn creates_output_directory_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        let exporter = CsvExporter::with_run_tag(&nested, "20240101_000000");
        exporter.write_monthly_summary("x", &[]).unwrap();
        assert!(nested.exists());
    }
}
