#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Address-matching engine for council district lookup.
//!
//! Resolves a typed street address against a small reference table of
//! streets, either one row per address or one row per block range with
//! an odd/even qualifier.
//!
//! # Architecture
//!
//! - **Load time**: raw rows are normalized into [`StreetRecord`]s by
//!   [`dataset`] (abbreviations expanded, ordinals spelled out, type
//!   token split off into a base name).
//! - **Query time**: the input is parsed by [`address`] with the same
//!   normalization, then [`matcher`] runs exact, typed, and base-name
//!   tiers. When nothing matches, [`suggest`] offers the nearest street
//!   names by edit distance.
//!
//! # Usage
//!
//! ```rust
//! use council_lookup_street::{DatasetFormat, build_dataset_from_cells, find_candidates, parse_address};
//!
//! let dataset = build_dataset_from_cells(
//!     &[vec!["1", "999", "all", "S Salina St", "3", "04"]],
//!     DatasetFormat::Ranged,
//! );
//! let parsed = parse_address("500 South Salina Street").unwrap();
//! let found = find_candidates(&parsed, &dataset);
//! assert_eq!(found[0].city_council, "04");
//! ```

pub mod address;
pub mod dataset;
pub mod matcher;
pub mod normalize;
pub mod suggest;
pub mod synonyms;

pub use address::parse_address;
pub use council_lookup_street_models::{DatasetFormat, ParsedAddress, Parity, RawRow, StreetRecord};
pub use dataset::{build_dataset, build_dataset_from_cells, build_dataset_from_csv, detect_format};
pub use matcher::{find_candidates, unique_candidates_by_street};
pub use normalize::{base_street_name, normalize_street_name, normalize_tokens};
pub use suggest::{find_closest_candidates, levenshtein_distance};

/// Errors that can occur while building a dataset from a delimited file.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The file could not be read as CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required header is absent.
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}
