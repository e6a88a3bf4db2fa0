//! Street type, directional, and ordinal synonym tables.
//!
//! These tables map the abbreviations people type into the canonical
//! lowercase words stored in the reference data, so that "201 E Jefferson
//! St" and "201 East Jefferson Street" normalize identically.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

/// Maps street type abbreviations (and the full words themselves) to their
/// canonical form.
static STREET_TYPE_ABBREVIATIONS: LazyLock<BTreeMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        BTreeMap::from([
            ("st", "street"),
            ("street", "street"),
            ("rd", "road"),
            ("road", "road"),
            ("ave", "avenue"),
            ("av", "avenue"),
            ("aven", "avenue"),
            ("avenue", "avenue"),
            ("blvd", "boulevard"),
            ("boulevard", "boulevard"),
            ("dr", "drive"),
            ("drive", "drive"),
            ("ln", "lane"),
            ("lane", "lane"),
            ("ct", "court"),
            ("court", "court"),
            ("pl", "place"),
            ("place", "place"),
            ("ter", "terrace"),
            ("terr", "terrace"),
            ("terrace", "terrace"),
            ("pkwy", "parkway"),
            ("parkway", "parkway"),
            ("hwy", "highway"),
            ("highway", "highway"),
            ("cir", "circle"),
            ("circle", "circle"),
            ("sq", "square"),
            ("square", "square"),
            ("way", "way"),
        ])
    });

/// Maps directional abbreviations to their full form.
static DIRECTIONALS: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    BTreeMap::from([
        ("n", "north"),
        ("s", "south"),
        ("e", "east"),
        ("w", "west"),
        ("ne", "northeast"),
        ("nw", "northwest"),
        ("se", "southeast"),
        ("sw", "southwest"),
    ])
});

/// Canonical street type words. A trailing token from this set is what
/// separates a full street name from its base name.
static STREET_TYPES: LazyLock<BTreeSet<&'static str>> = LazyLock::new(|| {
    BTreeSet::from([
        "street",
        "road",
        "avenue",
        "boulevard",
        "drive",
        "lane",
        "court",
        "place",
        "terrace",
        "parkway",
        "highway",
        "circle",
        "square",
        "way",
    ])
});

/// Spelled-out ordinals, indexed by value minus one.
const ORDINAL_WORDS: [&str; 20] = [
    "first",
    "second",
    "third",
    "fourth",
    "fifth",
    "sixth",
    "seventh",
    "eighth",
    "ninth",
    "tenth",
    "eleventh",
    "twelfth",
    "thirteenth",
    "fourteenth",
    "fifteenth",
    "sixteenth",
    "seventeenth",
    "eighteenth",
    "nineteenth",
    "twentieth",
];

/// Expands a single lowercase token if it matches a known abbreviation.
///
/// Checks directionals first, then street types. Returns the token
/// unchanged when neither table knows it.
#[must_use]
pub fn expand_token(token: &str) -> &str {
    if let Some(expanded) = DIRECTIONALS.get(token) {
        return expanded;
    }
    if let Some(expanded) = STREET_TYPE_ABBREVIATIONS.get(token) {
        return expanded;
    }
    token
}

/// Returns `true` if the token is a canonical street type word.
///
/// Abbreviations are not accepted here; tokens are expected to have gone
/// through [`expand_token`] first.
#[must_use]
pub fn is_street_type(token: &str) -> bool {
    STREET_TYPES.contains(token)
}

/// Spelled-out ordinal for `1..=20`.
#[must_use]
pub fn ordinal_word(value: u32) -> Option<&'static str> {
    let index = usize::try_from(value.checked_sub(1)?).ok()?;
    ORDINAL_WORDS.get(index).copied()
}
