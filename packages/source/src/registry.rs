//! Source registry: loads all source definitions from embedded TOML configs.
//!
//! Each `.toml` file in `packages/source/sources/` is baked into the binary
//! at compile time via [`include_str!`]. Adding a new source is as simple as
//! creating a new TOML file and adding it to the list below.

use crate::source_def::{SourceDefinition, parse_source_toml};

/// Environment variable holding a comma-separated source id filter.
pub const SOURCES_ENV_VAR: &str = "COUNCIL_LOOKUP_SOURCES";

/// TOML configs embedded at compile time.
const SOURCE_TOMLS: &[(&str, &str)] = &[
    ("street_data_v2", include_str!("../sources/street_data_v2.toml")),
    (
        "street_data_csv",
        include_str!("../sources/street_data_csv.toml"),
    ),
    ("street_data", include_str!("../sources/street_data.toml")),
];

/// Total number of configured sources (used in tests).
#[cfg(test)]
const EXPECTED_SOURCE_COUNT: usize = 3;

/// Returns all configured source definitions, parsed from embedded TOML,
/// ordered by role then priority.
///
/// # Panics
///
/// Panics if any TOML config is malformed (this is a compile-time guarantee
/// since the configs are embedded).
#[must_use]
pub fn all_sources() -> Vec<SourceDefinition> {
    let mut sources: Vec<SourceDefinition> = SOURCE_TOMLS
        .iter()
        .map(|(name, toml)| {
            parse_source_toml(toml).unwrap_or_else(|e| panic!("Failed to parse {name}.toml: {e}"))
        })
        .collect();

    sources.sort_by_key(|s| (s.role, s.priority));
    sources
}

/// Returns the sources to load, optionally filtered by a comma-separated
/// list of source ids.
///
/// The filter comes from `cli_filter` if provided, otherwise from the
/// `COUNCIL_LOOKUP_SOURCES` environment variable. If neither is set, all
/// sources are returned. Disabled sources are kept so they can be listed;
/// the loader skips them.
#[must_use]
pub fn enabled_sources(cli_filter: Option<String>) -> Vec<SourceDefinition> {
    let filter = cli_filter.or_else(|| std::env::var(SOURCES_ENV_VAR).ok());
    filter_sources(all_sources(), filter.as_deref())
}

fn filter_sources(all: Vec<SourceDefinition>, filter: Option<&str>) -> Vec<SourceDefinition> {
    let Some(filter_str) = filter.filter(|f| !f.trim().is_empty()) else {
        return all;
    };

    let ids: Vec<&str> = filter_str.split(',').map(str::trim).collect();

    let available = all
        .iter()
        .map(|s| s.id().to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let filtered: Vec<SourceDefinition> =
        all.into_iter().filter(|s| ids.contains(&s.id())).collect();

    if filtered.is_empty() {
        log::warn!("No matching sources found for filter {ids:?}. Available: {available}");
    }

    filtered
}
