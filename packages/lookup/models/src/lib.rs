#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! District lookup result types.
//!
//! These are the display-ready shapes of a search result, shared by the
//! CLI and the HTTP API.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// One resolved address with its district assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictRow {
    /// House number and title-cased street, e.g. `"201 East Jefferson Street"`.
    pub address: String,
    /// Council district number without leading zeros. Empty when unknown.
    pub district: String,
    /// Ward number without leading zeros. Empty when unknown.
    pub ward: String,
    /// Councilor for the district. Empty when unknown.
    pub councilor: String,
}

/// Kind of search result.
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
pub enum LookupStatus {
    /// Exactly one street matched.
    Match,
    /// Several streets matched.
    Options,
    /// Nothing matched; near street names are offered.
    Suggestions,
    /// Nothing matched and nothing was close.
    NoMatch,
    /// The input has no leading house number.
    Unparsed,
    /// The input was blank.
    EmptyInput,
}
