//! CSV fetchers.
//!
//! Reads a delimited street table from disk or downloads it with a single
//! HTTP GET, then hands the bytes to the dataset builder. There is no
//! retry: a failed request fails the load.

use council_lookup_street::build_dataset_from_csv;
use council_lookup_street_models::StreetRecord;

use crate::SourceError;

/// Reads and builds a CSV file from local disk.
///
/// # Errors
///
/// Returns [`SourceError`] if the file cannot be read or is not a valid
/// street table.
pub async fn fetch_csv_file(path: &str) -> Result<Vec<StreetRecord>, SourceError> {
    let bytes = tokio::fs::read(path).await?;

    log::debug!("Read {} bytes from {path}", bytes.len());

    let records = build_dataset_from_csv(&bytes)?;
    log::info!("Loaded {} records from {path}", records.len());

    Ok(records)
}

/// Downloads and builds a CSV file.
///
/// # Errors
///
/// Returns [`SourceError::Status`] for a non-success response, or another
/// [`SourceError`] if the request fails or the body is not a valid street
/// table.
pub async fn fetch_csv_url(url: &str) -> Result<Vec<StreetRecord>, SourceError> {
    let response = reqwest::get(url).await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().await?;

    log::debug!("Downloaded {} bytes from {url}", bytes.len());

    let records = build_dataset_from_csv(&bytes)?;
    log::info!("Loaded {} records from {url}", records.len());

    Ok(records)
}
