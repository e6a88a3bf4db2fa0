//! District councilor directory, embedded from `councilors.toml`.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Deserialize;

/// Councilor directory config embedded at compile time.
const COUNCILORS_TOML: &str = include_str!("../councilors.toml");

static DIRECTORY: LazyLock<CouncilorDirectory> = LazyLock::new(|| {
    toml::de::from_str(COUNCILORS_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse councilors.toml: {e}"))
});

/// Councilors keyed by district number.
#[derive(Debug, Clone, Deserialize)]
pub struct CouncilorDirectory {
    /// City the districts belong to.
    pub city: String,
    /// Title shown before a councilor's name.
    pub title: String,
    /// District number (no leading zeros) to councilor name.
    pub districts: BTreeMap<String, String>,
}

impl CouncilorDirectory {
    /// The embedded directory.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    #[must_use]
    pub fn embedded() -> &'static Self {
        &DIRECTORY
    }

    /// Councilor for a district, if known.
    #[must_use]
    pub fn councilor(&self, district: &str) -> Option<&str> {
        self.districts.get(district).map(String::as_str)
    }
}
