//! services/harvester/src/bin/harvest.rs
//!
//! Batch job: fetch one product's reviews for a time window, sample them per
//! month, aggregate monthly totals, and export both as CSV.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::Parser;
use harvester_lib::{
    adapters::{export::CsvExporter, steam::SteamFeedAdapter},
    config::Config,
    error::CliError,
};
use review_harvest_core::{
    monthly_sample, monthly_summary, product_id_from_url, FetchConfig, ReviewFeed, SampleMode,
    TimeWindow, WindowedReviewFetcher,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "harvest")]
#[command(about = "Fetch, sample and summarize Steam reviews for one product")]
struct Args {
    /// Store page URL to derive the product id from
    #[arg(long, conflicts_with = "app_id")]
    url: Option<String>,

    /// Numeric product id (alternative to --url)
    #[arg(long)]
    app_id: Option<u32>,

    /// Window start date (inclusive, UTC midnight)
    #[arg(long, value_parser = parse_utc_date)]
    start: DateTime<Utc>,

    /// Window end date (exclusive, UTC midnight); defaults to now
    #[arg(long, value_parser = parse_utc_date)]
    end: Option<DateTime<Utc>>,

    /// Upstream language filter ("all" disables it)
    #[arg(long, default_value = "english")]
    language: String,

    /// Maximum reviews kept per calendar month
    #[arg(long, default_value_t = 10)]
    per_month: usize,

    /// Seed for random sampling mode
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Rank by helpfulness votes instead of drawing randomly
    #[arg(long)]
    top_helpful: bool,

    /// Reviews requested per page
    #[arg(long, default_value_t = 100)]
    page_size: u32,

    /// Pause between page requests, in milliseconds
    #[arg(long, default_value_t = 250)]
    delay_ms: u64,

    /// Include reviews flagged as off-topic activity
    #[arg(long)]
    include_offtopic: bool,

    /// File name label; defaults to Game_{app_id}
    #[arg(long)]
    label: Option<String>,

    /// Skip the product-wide summary probe
    #[arg(long)]
    skip_global_summary: bool,
}

fn parse_utc_date(raw: &str) -> Result<DateTime<Utc>, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            config.log_level.to_string(),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let app_id = match (&args.url, args.app_id) {
        (Some(url), _) => product_id_from_url(url)?,
        (None, Some(id)) => id,
        (None, None) => {
            return Err(CliError::Usage(
                "either --url or --app-id is required".to_string(),
            ))
        }
    };
    let end = args.end.unwrap_or_else(Utc::now);
    if end <= args.start {
        return Err(CliError::Usage(
            "--end must be after --start".to_string(),
        ));
    }
    let window = TimeWindow::new(args.start, end);
    let label = args.label.clone().unwrap_or_else(|| format!("Game_{app_id}"));

    // --- 2. Initialize the Feed Adapter & Fetch the Window ---
    let feed = Arc::new(SteamFeedAdapter::new(
        config.api_base.clone(),
        config.http_timeout,
    )?);
    let fetcher = WindowedReviewFetcher::new(
        feed.clone(),
        FetchConfig {
            language: args.language.clone(),
            include_offtopic: args.include_offtopic,
            page_size: args.page_size,
            inter_request_delay: Duration::from_millis(args.delay_ms),
        },
    );

    info!(app_id, %label, start = %args.start, end = %end, "fetching reviews");
    let reviews = fetcher.collect(app_id, window).await?;
    info!(count = reviews.len(), "fetch complete");

    if reviews.is_empty() {
        info!("no reviews in the requested window, nothing to export");
        return Ok(());
    }

    // --- 3. Sample & Aggregate ---
    let mode = if args.top_helpful {
        SampleMode::TopHelpful
    } else {
        SampleMode::Random { seed: args.seed }
    };
    let sampled = monthly_sample(&reviews, args.per_month, mode);
    let summary = monthly_summary(&reviews)?;

    // --- 4. Export ---
    let exporter = CsvExporter::new(config.output_dir.clone());
    let sample_path = exporter.write_sample(&label, &sampled)?;
    info!(path = %sample_path.display(), rows = sampled.len(), "wrote sampled reviews");
    let summary_path = exporter.write_monthly_summary(&label, &summary)?;
    info!(path = %summary_path.display(), rows = summary.len(), "wrote monthly summary");

    // --- 5. Global Summary Probe (best effort) ---
    if !args.skip_global_summary {
        match feed.fetch_global_summary(app_id, &args.language).await {
            Ok(global) => info!(
                score = %global.score_desc,
                total_positive = global.total_positive,
                total_negative = global.total_negative,
                total_reviews = global.total_reviews,
                "product-wide review summary"
            ),
            Err(e) => warn!(error = %e, "global summary probe failed"),
        }
    }

    Ok(())
}
