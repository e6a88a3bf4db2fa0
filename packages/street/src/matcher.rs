//! Tiered candidate matching.
//!
//! Tries progressively less specific strategies and returns the first
//! non-empty result:
//!
//! 1. **Exact**: full normalized name plus exact house number (only for
//!    datasets that carry house numbers at all)
//! 2. **Typed**: full normalized name plus number check, when the user
//!    typed a street type ("Jefferson St" vs "Jefferson Ave")
//! 3. **Base**: street name with the type stripped, plus number check

use std::collections::BTreeSet;

use council_lookup_street_models::{ParsedAddress, Parity, StreetRecord};

/// Whether `number` satisfies the parity implied by a range qualifier.
#[must_use]
pub fn matches_range(number: u32, range_type: &str) -> bool {
    Parity::from_range_type(range_type).admits(number)
}

/// Whether `number` falls inside the record's inclusive range and on the
/// right side of the street. Records with a missing bound never match.
#[must_use]
pub fn is_range_match(record: &StreetRecord, number: u32) -> bool {
    let (Some(from), Some(to)) = (record.num_from, record.num_to) else {
        return false;
    };
    let n = i64::from(number);
    if n < from || n > to {
        return false;
    }
    matches_range(number, &record.range_type)
}

/// Number check shared by every tier after the exact one: exact house
/// number for address-level records, range with parity otherwise.
#[must_use]
pub fn number_matches(record: &StreetRecord, number: u32) -> bool {
    record.exact_number().map_or_else(
        || is_range_match(record, number),
        |exact| exact == number.to_string(),
    )
}

fn is_exact_match(record: &StreetRecord, parsed: &ParsedAddress) -> bool {
    record.exact_number().is_some_and(|exact| {
        record.street_name == parsed.street_normalized && exact == parsed.number.to_string()
    })
}

/// Finds the records matching a parsed address, in dataset order.
#[must_use]
pub fn find_candidates<'a>(
    parsed: &ParsedAddress,
    dataset: &'a [StreetRecord],
) -> Vec<&'a StreetRecord> {
    if dataset.iter().any(|r| r.exact_number().is_some()) {
        let exact: Vec<_> = dataset
            .iter()
            .filter(|r| is_exact_match(r, parsed))
            .collect();
        if !exact.is_empty() {
            log::debug!(
                "Exact tier: {} candidate(s) for {} {}",
                exact.len(),
                parsed.number,
                parsed.street_normalized
            );
            return exact;
        }
    }

    if parsed.has_type_token {
        let typed: Vec<_> = dataset
            .iter()
            .filter(|r| {
                r.street_name == parsed.street_normalized && number_matches(r, parsed.number)
            })
            .collect();
        if !typed.is_empty() {
            log::debug!(
                "Typed tier: {} candidate(s) for {} {}",
                typed.len(),
                parsed.number,
                parsed.street_normalized
            );
            return typed;
        }
    }

    let base: Vec<_> = dataset
        .iter()
        .filter(|r| r.street_base == parsed.street_base && number_matches(r, parsed.number))
        .collect();

    log::debug!(
        "Base tier: {} candidate(s) for {} {}",
        base.len(),
        parsed.number,
        parsed.street_base
    );

    base
}

/// Keeps the first record seen for each distinct street name.
#[must_use]
pub fn unique_candidates_by_street<'a>(
    candidates: impl IntoIterator<Item = &'a StreetRecord>,
) -> Vec<&'a StreetRecord> {
    let mut seen = BTreeSet::new();
    let mut unique = Vec::new();
    for record in candidates {
        if seen.insert(record.street_name.as_str()) {
            unique.push(record);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use council_lookup_street_models::DatasetFormat;

    use super::*;
    use crate::address::parse_address;
    use crate::dataset::build_dataset_from_cells;

    fn ranged(from: &str, to: &str, range_type: &str, street: &str, council: &str) -> StreetRecord {
        build_dataset_from_cells(
            &[vec![from, to, range_type, street, "1", council]],
            DatasetFormat::Ranged,
        )
        .remove(0)
    }

    fn exact(number: &str, street: &str, council: &str) -> StreetRecord {
        build_dataset_from_cells(&[vec![number, street, council, "1"]], DatasetFormat::AddressLevel)
            .remove(0)
    }

    #[test]
    fn parity_and_bounds() {
        let record = ranged("100", "200", "odd", "Main St", "1");
        assert!(is_range_match(&record, 151));
        assert!(!is_range_match(&record, 150));
        assert!(!is_range_match(&record, 201));
        assert!(!is_range_match(&record, 99));
    }

    #[test]
    fn bounds_are_inclusive() {
        let record = ranged("100", "200", "even", "Main St", "1");
        assert!(is_range_match(&record, 100));
        assert!(is_range_match(&record, 200));
    }

    #[test]
    fn missing_bound_never_matches() {
        let record = ranged("", "200", "all", "Main St", "1");
        assert!(!is_range_match(&record, 150));
        let record = ranged("1", "x", "all", "Main St", "1");
        assert!(!is_range_match(&record, 1));
    }

    #[test]
    fn matches_range_reads_substrings() {
        assert!(matches_range(3, "Odd Side"));
        assert!(!matches_range(3, "EVEN"));
        assert!(matches_range(3, "both"));
    }

    #[test]
    fn exact_tier_wins_over_ranges() {
        let dataset = vec![
            ranged("1", "999", "all", "E Jefferson St", "2"),
            exact("201", "E Jefferson St", "4"),
        ];
        let parsed = parse_address("201 E Jefferson St").unwrap();

        let found = find_candidates(&parsed, &dataset);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].city_council, "4");
    }

    #[test]
    fn typed_tier_separates_street_types() {
        let dataset = vec![
            ranged("1", "999", "all", "James St", "1"),
            ranged("1", "999", "all", "James Ave", "2"),
        ];
        let parsed = parse_address("10 James Ave").unwrap();

        let found = find_candidates(&parsed, &dataset);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].street_name, "james avenue");
    }

    #[test]
    fn base_tier_returns_every_type() {
        let dataset = vec![
            ranged("1", "999", "all", "James St", "1"),
            ranged("1", "999", "all", "James Ave", "2"),
        ];
        let parsed = parse_address("10 James").unwrap();

        let found = find_candidates(&parsed, &dataset);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn typed_tier_falls_back_to_base_name() {
        let dataset = vec![ranged("1", "999", "all", "Jefferson", "3")];
        let parsed = parse_address("201 Jefferson St").unwrap();

        let found = find_candidates(&parsed, &dataset);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].city_council, "3");
    }

    #[test]
    fn address_level_number_must_match_in_every_tier() {
        let dataset = vec![exact("200", "Main St", "1")];
        let parsed = parse_address("201 Main").unwrap();
        assert!(find_candidates(&parsed, &dataset).is_empty());
    }

    #[test]
    fn no_candidates_for_even_number_on_odd_side() {
        let dataset = vec![ranged("1", "999", "odd", "south salina street", "4")];
        let parsed = parse_address("500 S Salina St").unwrap();
        assert!(find_candidates(&parsed, &dataset).is_empty());
    }

    #[test]
    fn dedupes_by_street_name_keeping_first() {
        let a = ranged("1", "99", "all", "Main St", "1");
        let b = ranged("100", "199", "all", "Main St", "2");
        let c = ranged("1", "99", "all", "Oak St", "3");

        let unique = unique_candidates_by_street([&a, &b, &c]);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].city_council, "1");
        assert_eq!(unique[1].street_name, "oak street");
    }
}
