pub mod aggregate;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod ident;
pub mod ports;
pub mod sample;

pub use aggregate::{monthly_summary, MonthlySummaryRow};
pub use domain::{Cursor, FeedEntry, FeedPage, GlobalSummary, MonthKey, Review, TimeWindow};
pub use error::HarvestError;
pub use fetch::{FetchConfig, ReviewStream, WindowedReviewFetcher};
pub use ident::product_id_from_url;
pub use ports::{PageRequest, PortError, PortResult, ReviewFeed};
pub use sample::{monthly_sample, SampleMode};
