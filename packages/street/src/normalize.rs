//! Street-name normalization.
//!
//! Provides a deterministic normalization pipeline applied symmetrically
//! to reference data at load time and to user input at query time. This
//! ensures that "201 E Jefferson St" and "201 EAST JEFFERSON STREET"
//! produce the same normalized form.

use regex::Regex;
use std::sync::LazyLock;

use crate::synonyms;

/// Regex for ordinal tokens such as `1st`, `22nd`, `3rd`, `14th`.
static ORDINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)(?:st|nd|rd|th)$").expect("valid regex"));

/// Normalizes free text into canonical street-name tokens.
///
/// The pipeline:
/// 1. Lowercase
/// 2. Strip periods and commas
/// 3. Split on whitespace
/// 4. Expand abbreviations (st→street, n→north, etc.)
/// 5. Spell out ordinals 1–20 (`1st`→`first`); larger ordinals keep their
///    digits and lose the suffix (`21st`→`21`)
#[must_use]
pub fn normalize_tokens(input: &str) -> Vec<String> {
    let lower = input.to_lowercase().replace(['.', ','], "");

    lower
        .split_whitespace()
        .map(|token| normalize_ordinal(synonyms::expand_token(token)))
        .collect()
}

/// Normalizes free text into a single space-joined street name.
#[must_use]
pub fn normalize_street_name(input: &str) -> String {
    normalize_tokens(input).join(" ")
}

/// Drops a trailing street-type token and joins the rest.
///
/// `["main", "street"]` → `"main"`, `["main"]` → `"main"`, `[]` → `""`.
#[must_use]
pub fn base_street_name<S: AsRef<str>>(tokens: &[S]) -> String {
    let kept = match tokens.split_last() {
        Some((last, rest)) if synonyms::is_street_type(last.as_ref()) => rest,
        _ => tokens,
    };

    kept.iter()
        .map(AsRef::as_ref)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns `true` if the last token is a canonical street type.
#[must_use]
pub fn ends_with_street_type<S: AsRef<str>>(tokens: &[S]) -> bool {
    tokens
        .last()
        .is_some_and(|t| synonyms::is_street_type(t.as_ref()))
}

/// Rewrites an ordinal token, leaving everything else untouched.
fn normalize_ordinal(token: &str) -> String {
    let Some(digits) = ORDINAL_RE.captures(token).and_then(|c| c.get(1)) else {
        return token.to_string();
    };

    digits
        .as_str()
        .parse::<u32>()
        .ok()
        .and_then(synonyms::ordinal_word)
        .map_or_else(|| digits.as_str().to_string(), str::to_string)
}
