//! services/harvester/src/error.rs
//!
//! Defines the primary error type for the `harvester` service.

use crate::adapters::export::ExportError;
use crate::config::ConfigError;
use review_harvest_core::{HarvestError, PortError};

/// The primary error type for the `harvester` service.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from the harvesting core.
    #[error("Harvest error: {0}")]
    Harvest(#[from] HarvestError),

    /// Represents a feed port error outside a fetch session
    /// (e.g. the global summary probe).
    #[error("Feed error: {0}")]
    Feed(#[from] PortError),

    /// Represents a failure while writing export files. IO failures during
    /// a run surface here, wrapped by the exporter.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Invalid combination or value of command-line arguments.
    #[error("Invalid usage: {0}")]
    Usage(String),
}
