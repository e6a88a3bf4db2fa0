#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Council district search.
//!
//! Ties the street matcher to the dataset store: parse the input, search
//! the primary dataset, fall back to the backup dataset, and when nothing
//! matches offer the nearest street names from both. Results come back as
//! display rows carrying the district, ward, and councilor.

pub mod councilors;
pub mod display;
pub mod sequence;

use std::sync::Arc;

use council_lookup_source::{DatasetStore, Datasets, LoadError};
use council_lookup_street::{
    ParsedAddress, StreetRecord, find_candidates, find_closest_candidates, parse_address,
    unique_candidates_by_street,
};

pub use council_lookup_models::{DistrictRow, LookupStatus};
pub use councilors::CouncilorDirectory;
pub use sequence::{LatestSearch, SearchTicket};

/// Shown for blank input.
pub const EMPTY_INPUT_MESSAGE: &str = "Enter a Syracuse address to see district details.";
/// Shown when the input has no leading house number.
pub const UNPARSED_MESSAGE: &str = "Enter a street number and street name.";
/// Shown above option and suggestion lists.
pub const OPTIONS_MESSAGE: &str = "No exact match, did you mean one of the options below?";
/// Shown when nothing matched or was close.
pub const NO_MATCH_MESSAGE: &str = "No results found for this address.";
/// Shown when the datasets could not be loaded.
pub const LOAD_FAILURE_MESSAGE: &str = "Unable to load district data. Check street_data.csv.";

/// Errors that can occur during a search.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LookupError {
    /// The datasets could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),
}

impl LookupError {
    /// User-facing message for this error.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Load(_) => LOAD_FAILURE_MESSAGE,
        }
    }
}

/// Result of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The input was blank.
    EmptyInput,
    /// The input has no leading house number.
    Unparsed,
    /// Exactly one street matched.
    Match(DistrictRow),
    /// Several streets matched.
    Options(Vec<DistrictRow>),
    /// Nothing matched; these streets are close to what was typed.
    Suggestions(Vec<DistrictRow>),
    /// Nothing matched and nothing was close.
    NoMatch,
}

impl LookupOutcome {
    /// Kind of result.
    #[must_use]
    pub const fn status(&self) -> LookupStatus {
        match self {
            Self::EmptyInput => LookupStatus::EmptyInput,
            Self::Unparsed => LookupStatus::Unparsed,
            Self::Match(_) => LookupStatus::Match,
            Self::Options(_) => LookupStatus::Options,
            Self::Suggestions(_) => LookupStatus::Suggestions,
            Self::NoMatch => LookupStatus::NoMatch,
        }
    }

    /// Banner message. A single match has none; its row is the message.
    #[must_use]
    pub const fn message(&self) -> Option<&'static str> {
        match self {
            Self::EmptyInput => Some(EMPTY_INPUT_MESSAGE),
            Self::Unparsed => Some(UNPARSED_MESSAGE),
            Self::Match(_) => None,
            Self::Options(_) | Self::Suggestions(_) => Some(OPTIONS_MESSAGE),
            Self::NoMatch => Some(NO_MATCH_MESSAGE),
        }
    }

    /// Display rows, if any.
    #[must_use]
    pub fn rows(&self) -> &[DistrictRow] {
        match self {
            Self::Match(row) => std::slice::from_ref(row),
            Self::Options(rows) | Self::Suggestions(rows) => rows,
            Self::EmptyInput | Self::Unparsed | Self::NoMatch => &[],
        }
    }

    /// Plain-text rendering for terminals.
    #[must_use]
    pub fn render(&self, directory: &CouncilorDirectory) -> String {
        match self {
            Self::Match(row) => display::format_match(row, directory),
            Self::Options(rows) | Self::Suggestions(rows) => {
                let mut lines = vec![OPTIONS_MESSAGE.to_string()];
                lines.extend(rows.iter().map(|row| format!("  {}", display::format_option(row))));
                lines.join("\n")
            }
            Self::EmptyInput | Self::Unparsed | Self::NoMatch => {
                self.message().unwrap_or_default().to_string()
            }
        }
    }
}

/// Resolves a parsed address against loaded datasets.
///
/// Searches the primary dataset, then the backup dataset if the primary
/// has no candidates. With no candidates at all, suggests the nearest
/// streets from both datasets.
#[must_use]
pub fn resolve(
    parsed: &ParsedAddress,
    datasets: &Datasets,
    directory: &CouncilorDirectory,
) -> LookupOutcome {
    let mut candidates = find_candidates(parsed, &datasets.primary);
    if candidates.is_empty() {
        log::debug!("No primary candidates, searching backup dataset");
        candidates = find_candidates(parsed, &datasets.backup);
    }
    let candidates = unique_candidates_by_street(candidates);

    let rows = |records: &[&StreetRecord]| -> Vec<DistrictRow> {
        records
            .iter()
            .map(|record| display::district_row(parsed, record, directory))
            .collect()
    };

    match candidates.as_slice() {
        [] => {
            let close = find_closest_candidates(parsed, datasets.all_records());
            if close.is_empty() {
                LookupOutcome::NoMatch
            } else {
                LookupOutcome::Suggestions(rows(&close))
            }
        }
        [only] => LookupOutcome::Match(display::district_row(parsed, only, directory)),
        many => LookupOutcome::Options(rows(many)),
    }
}

/// Search entry point over a shared dataset store.
#[derive(Debug)]
pub struct Lookup {
    store: Arc<DatasetStore>,
    directory: &'static CouncilorDirectory,
    latest: LatestSearch,
}

impl Lookup {
    /// Creates a lookup over `store` with the embedded councilor directory.
    #[must_use]
    pub fn new(store: Arc<DatasetStore>) -> Self {
        Self {
            store,
            directory: CouncilorDirectory::embedded(),
            latest: LatestSearch::new(),
        }
    }

    /// The dataset store searched by this lookup.
    #[must_use]
    pub const fn store(&self) -> &Arc<DatasetStore> {
        &self.store
    }

    /// The councilor directory used for display rows.
    #[must_use]
    pub const fn directory(&self) -> &'static CouncilorDirectory {
        self.directory
    }

    /// Searches for an address.
    ///
    /// Blank input is answered without touching the datasets. Otherwise
    /// the datasets are loaded (once) before the input is parsed.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Load`] if the datasets cannot be loaded.
    pub async fn search(&self, input: &str) -> Result<LookupOutcome, LookupError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(LookupOutcome::EmptyInput);
        }

        let datasets = self.store.get().await?;

        let Some(parsed) = parse_address(input) else {
            log::debug!("Could not parse {input:?}");
            return Ok(LookupOutcome::Unparsed);
        };

        let outcome = resolve(&parsed, &datasets, self.directory);
        log::info!("Lookup {input:?}: {}", outcome.status());

        Ok(outcome)
    }

    /// Searches for an address, discarding the result if a newer search
    /// started while this one was running.
    ///
    /// Returns `Ok(None)` for a superseded search.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Load`] if the datasets cannot be loaded and
    /// this is still the newest search.
    pub async fn search_latest(&self, input: &str) -> Result<Option<LookupOutcome>, LookupError> {
        let ticket = self.latest.begin();
        let result = self.search(input).await;

        if !self.latest.is_current(ticket) {
            log::debug!("Discarding superseded search for {input:?}");
            return Ok(None);
        }

        result.map(Some)
    }
}
