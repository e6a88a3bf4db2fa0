#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the council district lookup server.

use council_lookup_models::{DistrictRow, LookupStatus};
use council_lookup_source_models::{LoadStatus, SourceSummary};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Query parameters for the lookup endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupQueryParams {
    /// Free-text address, e.g. `"201 E Jefferson St"`.
    pub address: Option<String>,
}

/// Lookup endpoint response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiLookupResponse {
    /// Kind of result.
    pub status: LookupStatus,
    /// Banner message. Absent for a single match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Matched or suggested addresses.
    pub results: Vec<DistrictRow>,
}

/// Sources endpoint response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSources {
    /// Configured sources in load order.
    pub sources: Vec<SourceSummary>,
    /// State of the dataset store.
    pub status: LoadStatus,
}
