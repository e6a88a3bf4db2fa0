//! Config-driven street data source definition.
//!
//! [`SourceDefinition`] captures everything unique about a reference table
//! in a serializable config struct. A single generic implementation
//! fetches every source, whatever the transport.

use council_lookup_source_models::{FetcherKind, SourceRole, SourceSummary};
use council_lookup_street::DatasetFormat;
use council_lookup_street_models::StreetRecord;
use serde::Deserialize;

use crate::SourceError;
use crate::csv_download::{fetch_csv_file, fetch_csv_url};
use crate::embedded::load_embedded;

/// Identifier given to a source created from a `--csv` override.
pub const CSV_OVERRIDE_ID: &str = "csv_override";

// ── Top-level source definition ──────────────────────────────────────────

/// A complete, config-driven street data source definition.
///
/// Loaded from TOML files at compile time, or built from a CLI override.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceDefinition {
    /// Unique identifier (e.g., `"street_data_v2"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Dataset this source feeds.
    pub role: SourceRole,
    /// Lower values are tried first within a role.
    #[serde(default = "default_priority")]
    pub priority: u32,
    /// Disabled sources are listed but never fetched.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// How to obtain the rows.
    pub fetcher: FetcherConfig,
}

const fn default_priority() -> u32 {
    100
}

const fn default_enabled() -> bool {
    true
}

// ── Fetcher config ───────────────────────────────────────────────────────

/// How to obtain the raw rows of a source.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FetcherConfig {
    /// Array-of-arrays compiled into the binary.
    Embedded {
        /// Name of the embedded dataset.
        dataset: String,
        /// Row layout. Omit to detect it from the width of the first row.
        format: Option<DatasetFormat>,
    },
    /// CSV file with a header row, read from local disk.
    CsvFile {
        /// Path to the file, relative to the working directory.
        path: String,
    },
    /// CSV file with a header row, fetched with a single HTTP GET.
    CsvUrl {
        /// URL of the file.
        url: String,
    },
}

impl FetcherConfig {
    /// The kind of transport this fetcher uses.
    #[must_use]
    pub const fn kind(&self) -> FetcherKind {
        match self {
            Self::Embedded { .. } => FetcherKind::Embedded,
            Self::CsvFile { .. } => FetcherKind::CsvFile,
            Self::CsvUrl { .. } => FetcherKind::CsvUrl,
        }
    }

    /// Embedded dataset name, file path, or URL.
    #[must_use]
    pub fn location(&self) -> &str {
        match self {
            Self::Embedded { dataset, .. } => dataset,
            Self::CsvFile { path } => path,
            Self::CsvUrl { url } => url,
        }
    }

    /// Row layout. Delimited files are always ranged.
    #[must_use]
    pub const fn format(&self) -> Option<DatasetFormat> {
        match self {
            Self::Embedded { format, .. } => *format,
            Self::CsvFile { .. } | Self::CsvUrl { .. } => Some(DatasetFormat::Ranged),
        }
    }
}

impl SourceDefinition {
    /// Returns the unique source identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the human-readable source name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Builds a primary CSV source that is tried before every configured
    /// one. URLs (`http://`, `https://`) are fetched; anything else is
    /// read from disk.
    #[must_use]
    pub fn csv_override(location: &str) -> Self {
        let fetcher = if location.starts_with("http://") || location.starts_with("https://") {
            FetcherConfig::CsvUrl {
                url: location.to_string(),
            }
        } else {
            FetcherConfig::CsvFile {
                path: location.to_string(),
            }
        };

        Self {
            id: CSV_OVERRIDE_ID.to_string(),
            name: format!("CSV override ({location})"),
            role: SourceRole::Primary,
            priority: 0,
            enabled: true,
            fetcher,
        }
    }

    /// Serializable view for listings.
    #[must_use]
    pub fn summary(&self) -> SourceSummary {
        SourceSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            role: self.role,
            priority: self.priority,
            enabled: self.enabled,
            fetcher: self.fetcher.kind(),
            location: self.fetcher.location().to_string(),
            format: self.fetcher.format(),
        }
    }

    /// Fetches and builds this source's records.
    ///
    /// Returns `Ok(None)` when the source has nothing to offer (an
    /// embedded dataset with no rows), so the next source for the same
    /// role can be tried.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the file cannot be read, the HTTP
    /// request fails or returns a non-success status, or the data cannot
    /// be parsed.
    pub async fn fetch(&self) -> Result<Option<Vec<StreetRecord>>, SourceError> {
        log::debug!("[{}] Fetching {}", self.id, self.fetcher.location());

        let records = match &self.fetcher {
            FetcherConfig::Embedded { dataset, format } => {
                return load_embedded(dataset, *format);
            }
            FetcherConfig::CsvFile { path } => fetch_csv_file(path).await?,
            FetcherConfig::CsvUrl { url } => fetch_csv_url(url).await?,
        };

        Ok(Some(records))
    }
}

/// Parses a [`SourceDefinition`] from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or missing required fields.
pub fn parse_source_toml(toml_str: &str) -> Result<SourceDefinition, String> {
    toml::de::from_str(toml_str).map_err(|e| e.to_string())
}
