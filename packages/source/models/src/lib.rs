#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Street data source types.
//!
//! Every reference table (embedded array, local CSV, remote CSV) is
//! described by a source definition with a [`SourceRole`]. The types here
//! are the serializable views of those definitions and of the loader's
//! lifecycle, shared by the CLI and the HTTP API.

use council_lookup_street_models::DatasetFormat;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Which dataset a source feeds.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SourceRole {
    /// Searched first.
    Primary,
    /// Searched only when the primary dataset has no candidates.
    Backup,
}

/// How a source obtains its rows.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FetcherKind {
    /// Array-of-arrays compiled into the binary.
    Embedded,
    /// CSV file on local disk.
    CsvFile,
    /// CSV file fetched over HTTP.
    CsvUrl,
}

/// A source definition as shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSummary {
    /// Unique identifier (e.g., `"street_data_v2"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Dataset this source feeds.
    pub role: SourceRole,
    /// Lower values are tried first within a role.
    pub priority: u32,
    /// Whether the source takes part in loading.
    pub enabled: bool,
    /// How rows are obtained.
    pub fetcher: FetcherKind,
    /// Embedded dataset name, file path, or URL.
    pub location: String,
    /// Row layout. `None` means detected from the first row.
    pub format: Option<DatasetFormat>,
}

/// Record counts of the loaded datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStats {
    /// Records in the primary dataset.
    pub primary_records: usize,
    /// Records in the backup dataset.
    pub backup_records: usize,
}

impl DatasetStats {
    /// Records across both datasets.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.primary_records + self.backup_records
    }
}

/// Lifecycle of the dataset store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadStatus {
    /// No load has been attempted.
    Uninitialized,
    /// A load is in flight.
    Loading,
    /// Datasets are available.
    Ready {
        /// Sizes of the loaded datasets.
        stats: DatasetStats,
    },
    /// The last attempt failed. The next request starts a new one.
    Failed {
        /// Why the load failed.
        reason: String,
    },
}
