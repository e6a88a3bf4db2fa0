//! Display rows and text rendering of search results.

use council_lookup_models::DistrictRow;
use council_lookup_street::dataset::parse_leading_int;
use council_lookup_street::{ParsedAddress, StreetRecord};

use crate::councilors::CouncilorDirectory;

/// Placeholder for a missing district, ward, or councilor.
const UNKNOWN: &str = "Unknown";

/// Whole-number content of a code with leading zeros dropped.
///
/// `"04"` → `"4"`, `"12A"` → `"12"`, `"0"` → `""`, `"n/a"` → `""`.
#[must_use]
pub fn to_whole_number(code: &str) -> String {
    parse_leading_int(code)
        .map(|n| n.to_string())
        .unwrap_or_default()
        .trim_start_matches('0')
        .to_string()
}

/// Upper-cases the first letter of each space-separated word.
#[must_use]
pub fn title_case(value: &str) -> String {
    value
        .split(' ')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds the display row for a matched record.
#[must_use]
pub fn district_row(
    parsed: &ParsedAddress,
    record: &StreetRecord,
    directory: &CouncilorDirectory,
) -> DistrictRow {
    let district = to_whole_number(&record.city_council);
    let ward = to_whole_number(&record.ward);
    let councilor = directory
        .councilor(&district)
        .unwrap_or_default()
        .to_string();

    DistrictRow {
        address: format!("{} {}", parsed.number, title_case(&record.street_name)),
        district,
        ward,
        councilor,
    }
}

fn or_unknown(value: &str) -> &str {
    if value.is_empty() { UNKNOWN } else { value }
}

/// Multi-line rendering of a single match.
#[must_use]
pub fn format_match(row: &DistrictRow, directory: &CouncilorDirectory) -> String {
    format!(
        "{}\nDistrict {}\nWard {}\n{}: {}",
        row.address,
        or_unknown(&row.district),
        or_unknown(&row.ward),
        directory.title,
        or_unknown(&row.councilor)
    )
}

/// One-line rendering of a row in an option list. Unknown parts are
/// left out.
#[must_use]
pub fn format_option(row: &DistrictRow) -> String {
    let mut parts = Vec::new();
    if !row.district.is_empty() {
        parts.push(format!("District {}", row.district));
    }
    if !row.ward.is_empty() {
        parts.push(format!("Ward {}", row.ward));
    }
    if !row.councilor.is_empty() {
        parts.push(format!("Councilor {}", row.councilor));
    }

    if parts.is_empty() {
        row.address.clone()
    } else {
        format!("{} - {}", row.address, parts.join(", "))
    }
}
