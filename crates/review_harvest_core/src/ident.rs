//! crates/review_harvest_core/src/ident.rs
//!
//! Extracts the numeric product identifier from a store page URL.

use crate::error::HarvestError;

/// Path segment that precedes the product id in a store URL,
/// e.g. `https://store.steampowered.com/app/2344520/Diablo_IV/`.
const APP_MARKER: &str = "app";

/// Parses a store page URL into its numeric product id.
///
/// Looks for the path segment literally equal to `app` and parses the segment
/// immediately following it. Fails with
/// [`HarvestError::InvalidIdentifierSource`] when no marker is present or the
/// following segment is not a valid id; there is no partial result.
pub fn product_id_from_url(url: &str) -> Result<u32, HarvestError> {
    let segments: Vec<&str> = url.split('/').filter(|s| !s.is_empty()).collect();
    segments
        .iter()
        .position(|s| *s == APP_MARKER)
        .and_then(|i| segments.get(i + 1))
        .and_then(|s| s.parse::<u32>().ok())
        .ok_or_else(|| HarvestError::InvalidIdentifierSource(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_id_from_store_url() {
        let id = product_id_from_url("https://example.com/app/12345/Name/").unwrap();
        assert_eq!(id, 12345);
    }

    #[test]
    fn extracts_id_without_trailing_name() {
        let id = product_id_from_url("https://store.steampowered.com/app/2344520").unwrap();
        assert_eq!(id, 2344520);
    }

    #[test]
    fn rejects_url_without_marker() {
        let err = product_id_from_url("https://example.com/nope/").unwrap_err();
        assert!(matches!(err, HarvestError::InvalidIdentifierSource(_)));
    }

    #[test]
    fn rejects_non_numeric_segment() {
        let err = product_id_from_url("https://example.com/app/not-a-number/").unwrap_err();
        assert!(matches!(err, HarvestError::InvalidIdentifierSource(_)));
    }

    #[test]
    fn rejects_marker_at_end_of_path() {
        let err = product_id_from_url("https://example.com/app/").unwrap_err();
        assert!(matches!(err, HarvestError::InvalidIdentifierSource(_)));
    }
}
