//! Free-text address parsing.
//!
//! Users type addresses in many shapes:
//! - Plain: `"201 E Jefferson St"`
//! - With a secondary line after a comma: `"201 E Jefferson St, Apt 4"`
//! - With an inline unit: `"105 Main Ave Apt 3"`, `"105 Main Ave #3"`
//!
//! This module reduces them to a house number plus normalized street
//! tokens.

use council_lookup_street_models::ParsedAddress;
use regex::Regex;
use std::sync::LazyLock;

use crate::normalize::{base_street_name, ends_with_street_type, normalize_tokens};

/// Regex for a leading house number followed by the street text.
static NUMBER_STREET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(.+)$").expect("valid regex"));

/// Regex for unit designators and everything after them.
static UNIT_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\b(?:apt|unit|suite)\b|#).*$").expect("valid regex")
});

/// Parses a free-text address into a house number and street.
///
/// Returns `None` for blank input, or when the text before the first
/// comma does not start with `<digits><whitespace><street>`. Everything
/// after the first comma is treated as secondary-address info and
/// dropped.
#[must_use]
pub fn parse_address(input: &str) -> Option<ParsedAddress> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let main_part = trimmed.split(',').next().unwrap_or_default().trim();
    let caps = NUMBER_STREET_RE.captures(main_part)?;

    let number = caps.get(1)?.as_str().parse::<u32>().ok()?;
    let street_raw = UNIT_SUFFIX_RE
        .replace(caps.get(2)?.as_str(), "")
        .trim()
        .to_string();

    let tokens = normalize_tokens(&street_raw);
    let has_type_token = ends_with_street_type(&tokens);
    let street_base = base_street_name(&tokens);
    let street_normalized = tokens.join(" ");

    log::trace!("Parsed {input:?} as {number} {street_normalized:?}");

    Some(ParsedAddress {
        number,
        street_raw,
        street_normalized,
        street_base,
        has_type_token,
    })
}
