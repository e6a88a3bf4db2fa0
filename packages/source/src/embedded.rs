//! Datasets compiled into the binary.
//!
//! Each dataset is a JSON array of rows, each row an array of cells
//! (strings or numbers). Address-level rows have four cells, ranged rows
//! six.

use council_lookup_street::{DatasetFormat, build_dataset_from_cells, detect_format};
use council_lookup_street_models::StreetRecord;

use crate::SourceError;

/// Embedded datasets, by name.
const EMBEDDED_DATASETS: &[(&str, &str)] = &[
    ("street_data_v2", include_str!("../data/street_data_v2.json")),
    ("street_data", include_str!("../data/street_data.json")),
];

/// Names of every embedded dataset.
#[must_use]
pub fn embedded_dataset_names() -> Vec<&'static str> {
    EMBEDDED_DATASETS.iter().map(|(name, _)| *name).collect()
}

/// Parses an embedded dataset into string cells.
///
/// # Errors
///
/// * [`SourceError::UnknownDataset`] if no dataset has that name
/// * [`SourceError::Json`] if the embedded JSON is not an array of arrays
pub fn embedded_rows(name: &str) -> Result<Vec<Vec<String>>, SourceError> {
    let json = EMBEDDED_DATASETS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, json)| *json)
        .ok_or_else(|| {
            log::warn!(
                "No embedded dataset named {name:?}. Available: {}",
                embedded_dataset_names().join(", ")
            );
            SourceError::UnknownDataset(name.to_string())
        })?;

    parse_rows(json)
}

/// Builds the records of an embedded dataset.
///
/// Returns `Ok(None)` when the dataset has no rows.
///
/// # Errors
///
/// See [`embedded_rows`].
pub fn load_embedded(
    name: &str,
    format: Option<DatasetFormat>,
) -> Result<Option<Vec<StreetRecord>>, SourceError> {
    let rows = embedded_rows(name)?;
    if rows.is_empty() {
        log::warn!("Embedded dataset {name} has no rows");
        return Ok(None);
    }

    let format = format.unwrap_or_else(|| detect_format(&rows));
    let records = build_dataset_from_cells(&rows, format);

    log::info!(
        "Built {} {format} records from embedded dataset {name}",
        records.len()
    );

    Ok(Some(records))
}

fn parse_rows(json: &str) -> Result<Vec<Vec<String>>, SourceError> {
    let rows: Vec<Vec<serde_json::Value>> = serde_json::from_str(json)?;

    Ok(rows
        .into_iter()
        .map(|row| row.into_iter().map(cell_to_string).collect())
        .collect())
}

fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
