#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Street data sources and the dataset store.
//!
//! Each reference table is described by a TOML source definition (see
//! [`registry`]). Sources feed either the primary or the backup dataset,
//! and within a role they are tried in priority order until one yields
//! records. [`DatasetStore`] runs that load once and shares the result.

pub mod csv_download;
pub mod embedded;
pub mod registry;
pub mod source_def;
pub mod store;

pub use council_lookup_source_models::{
    DatasetStats, FetcherKind, LoadStatus, SourceRole, SourceSummary,
};
pub use registry::{all_sources, enabled_sources};
pub use source_def::{FetcherConfig, SourceDefinition};
pub use store::{DatasetLoader, DatasetStore, Datasets, LoadError, SourceChain};

/// Errors that can occur while loading a street data source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// Response status code.
        status: u16,
    },

    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The delimited file is not a valid street table.
    #[error("Dataset error: {0}")]
    Dataset(#[from] council_lookup_street::DatasetError),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A source names an embedded dataset that does not exist.
    #[error("Unknown embedded dataset: {0}")]
    UnknownDataset(String),

    /// Neither the primary nor the backup dataset has any records.
    #[error("No street data available")]
    NoData,
}

/// Builds the source list for a run: the registry filtered by
/// `source_filter` (or `COUNCIL_LOOKUP_SOURCES`), with an optional CSV
/// file or URL tried before everything else.
#[must_use]
pub fn configured_sources(
    source_filter: Option<String>,
    csv_override: Option<&str>,
) -> Vec<SourceDefinition> {
    let mut sources = enabled_sources(source_filter);

    if let Some(location) = csv_override {
        log::info!("Using CSV override {location}");
        sources.insert(0, SourceDefinition::csv_override(location));
    }

    sources
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_override_comes_first() {
        let sources = configured_sources(Some("street_data".to_string()), Some("streets.csv"));
        let ids: Vec<&str> = sources.iter().map(SourceDefinition::id).collect();
        assert_eq!(ids, vec![source_def::CSV_OVERRIDE_ID, "street_data"]);
    }

    #[test]
    fn status_error_message() {
        let err = SourceError::Status {
            url: "https://example.org/a.csv".to_string(),
            status: 404,
        };
        assert_eq!(err.to_string(), "HTTP 404 from https://example.org/a.csv");
    }
}
