#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared types for the council district street matcher.
//!
//! This crate contains only data types and simple conversions. It has no
//! heavyweight dependencies (no regex, no I/O).

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A street address parsed from free-text user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedAddress {
    /// House number.
    pub number: u32,
    /// Street text after unit/apartment suffixes were stripped.
    pub street_raw: String,
    /// Space-joined normalized tokens, including any street-type token.
    pub street_normalized: String,
    /// `street_normalized` without a trailing street-type token.
    pub street_base: String,
    /// Whether the last normalized token is a recognized street type.
    pub has_type_token: bool,
}

/// Layout of the rows in a reference table.
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
pub enum DatasetFormat {
    /// One row per address: `street_number, street_name, city_council, ward`.
    AddressLevel,
    /// One row per block range:
    /// `num_from, num_to, range_type, street_name, ward, city_council`.
    Ranged,
}

/// A single row of a reference table before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRow {
    /// Address-level row keyed by an exact house number.
    AddressLevel {
        /// Exact house number as written in the source.
        street_number: String,
        /// Street name as written in the source.
        street_name: String,
        /// Council district code.
        city_council: String,
        /// Ward code.
        ward: String,
    },
    /// Block-range row keyed by an inclusive number interval.
    Ranged {
        /// Lower bound cell.
        num_from: String,
        /// Upper bound cell.
        num_to: String,
        /// Parity qualifier (`"odd"`, `"even"`, `"all"`, or free text).
        range_type: String,
        /// Street name as written in the source.
        street_name: String,
        /// Ward code.
        ward: String,
        /// Council district code.
        city_council: String,
    },
}

impl RawRow {
    /// Builds a row from positional cells. Missing cells become empty
    /// strings.
    #[must_use]
    pub fn from_cells<S: AsRef<str>>(cells: &[S], format: DatasetFormat) -> Self {
        let cell = |i: usize| cells.get(i).map_or_else(String::new, |c| c.as_ref().to_string());

        match format {
            DatasetFormat::AddressLevel => Self::AddressLevel {
                street_number: cell(0),
                street_name: cell(1),
                city_council: cell(2),
                ward: cell(3),
            },
            DatasetFormat::Ranged => Self::Ranged {
                num_from: cell(0),
                num_to: cell(1),
                range_type: cell(2),
                street_name: cell(3),
                ward: cell(4),
                city_council: cell(5),
            },
        }
    }

    /// The format this row belongs to.
    #[must_use]
    pub const fn format(&self) -> DatasetFormat {
        match self {
            Self::AddressLevel { .. } => DatasetFormat::AddressLevel,
            Self::Ranged { .. } => DatasetFormat::Ranged,
        }
    }
}

/// A normalized reference-table record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreetRecord {
    /// Inclusive lower bound. `None` when absent or unparseable.
    pub num_from: Option<i64>,
    /// Inclusive upper bound. `None` when absent or unparseable.
    pub num_to: Option<i64>,
    /// Parity qualifier. Address-level records carry `"all"`.
    pub range_type: String,
    /// Normalized full street name.
    pub street_name: String,
    /// Normalized street name without its trailing type token.
    pub street_base: String,
    /// Raw ward code.
    pub ward: String,
    /// Raw council district code.
    pub city_council: String,
    /// Exact house number (address-level records only).
    pub street_number: Option<String>,
}

impl StreetRecord {
    /// Returns the exact house number if this record has a non-empty one.
    #[must_use]
    pub fn exact_number(&self) -> Option<&str> {
        self.street_number.as_deref().filter(|n| !n.is_empty())
    }
}

/// Odd/even restriction derived from a free-text range qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Parity {
    /// Only odd house numbers.
    Odd,
    /// Only even house numbers.
    Even,
    /// No restriction.
    Any,
}

impl Parity {
    /// Interprets a range qualifier. `"odd"` anywhere in the text wins over
    /// `"even"`; anything else is unrestricted.
    #[must_use]
    pub fn from_range_type(range_type: &str) -> Self {
        let lower = range_type.to_lowercase();
        if lower.contains("odd") {
            Self::Odd
        } else if lower.contains("even") {
            Self::Even
        } else {
            Self::Any
        }
    }

    /// Whether `number` is on this side of the street.
    #[must_use]
    pub const fn admits(self, number: u32) -> bool {
        match self {
            Self::Odd => number % 2 == 1,
            Self::Even => number % 2 == 0,
            Self::Any => true,
        }
    }
}
