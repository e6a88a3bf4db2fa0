//! Edit-distance street suggestions.
//!
//! Used when no candidate matches: among the records whose house-number
//! constraint admits the typed number, returns the street names closest
//! to what the user typed, provided they are close enough to be a
//! plausible typo.

use council_lookup_street_models::{ParsedAddress, StreetRecord};

use crate::matcher::{number_matches, unique_candidates_by_street};

/// Minimum edit distance always tolerated, regardless of key length.
const MIN_THRESHOLD: usize = 2;

/// Levenshtein (edit) distance over `char`s with unit costs.
#[must_use]
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev_row: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        curr_row[0] = i + 1;

        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_chars.len()]
}

/// Largest distance accepted for a key of `key_len` chars:
/// `max(2, round(0.3 * max(1, key_len)))`, rounding halves up.
#[must_use]
pub fn suggestion_threshold(key_len: usize) -> usize {
    let len = key_len.max(1);
    ((len * 3 + 5) / 10).max(MIN_THRESHOLD)
}

/// Finds the streets nearest to the parsed street name among records
/// that admit the parsed house number.
///
/// All records tied at the minimum distance are returned, one per
/// street name. The result is empty when the key is empty, nothing
/// admits the number, or the best distance exceeds
/// [`suggestion_threshold`].
#[must_use]
pub fn find_closest_candidates<'a>(
    parsed: &ParsedAddress,
    dataset: impl IntoIterator<Item = &'a StreetRecord>,
) -> Vec<&'a StreetRecord> {
    let name_key = if parsed.street_base.is_empty() {
        parsed.street_normalized.as_str()
    } else {
        parsed.street_base.as_str()
    };
    if name_key.is_empty() {
        return Vec::new();
    }

    let unique = unique_candidates_by_street(
        dataset
            .into_iter()
            .filter(|r| number_matches(r, parsed.number)),
    );

    let mut best_distance = usize::MAX;
    let mut best = Vec::new();

    for record in unique {
        let compare_key = if record.street_base.is_empty() {
            &record.street_name
        } else {
            &record.street_base
        };
        let distance = levenshtein_distance(name_key, compare_key);

        if distance < best_distance {
            best_distance = distance;
            best.clear();
            best.push(record);
        } else if distance == best_distance {
            best.push(record);
        }
    }

    let threshold = suggestion_threshold(name_key.chars().count());
    if best_distance > threshold {
        log::debug!("Closest street to {name_key:?} is {best_distance} edits away (max {threshold})");
        return Vec::new();
    }

    best
}

#[cfg(test)]
mod tests {
    use council_lookup_street_models::DatasetFormat;

    use super::*;
    use crate::address::parse_address;
    use crate::dataset::build_dataset_from_cells;

    fn dataset(rows: &[[&str; 6]]) -> Vec<StreetRecord> {
        let rows: Vec<Vec<&str>> = rows.iter().map(|r| r.to_vec()).collect();
        build_dataset_from_cells(&rows, DatasetFormat::Ranged)
    }

    #[test]
    fn distance_basics() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("jefferson", "jefferon"), 1);
        assert_eq!(levenshtein_distance("flaw", "lawn"), 2);
    }

    #[test]
    fn distance_counts_chars_not_bytes() {
        assert_eq!(levenshtein_distance("café", "cafe"), 1);
    }

    #[test]
    fn threshold_scales_with_length() {
        assert_eq!(suggestion_threshold(0), 2);
        assert_eq!(suggestion_threshold(3), 2);
        assert_eq!(suggestion_threshold(5), 2);
        assert_eq!(suggestion_threshold(9), 3);
        assert_eq!(suggestion_threshold(10), 3);
        assert_eq!(suggestion_threshold(20), 6);
    }

    #[test]
    fn suggests_near_typo() {
        let data = dataset(&[["1", "999", "all", "Jefferon St", "1", "2"]]);
        let parsed = parse_address("201 Jefferson St").unwrap();

        let found = find_closest_candidates(&parsed, &data);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].street_name, "jefferon street");
    }

    #[test]
    fn rejects_distant_names() {
        let data = dataset(&[["1", "999", "all", "Burnet Ave", "1", "2"]]);
        let parsed = parse_address("201 Jefferson St").unwrap();
        assert!(find_closest_candidates(&parsed, &data).is_empty());
    }

    #[test]
    fn keeps_all_ties_once_per_street() {
        let data = dataset(&[
            ["1", "999", "all", "Mian St", "1", "2"],
            ["1", "999", "all", "Mian St", "1", "3"],
            ["1", "999", "all", "Mani St", "1", "4"],
            ["1", "999", "all", "Oak St", "1", "5"],
        ]);
        let parsed = parse_address("5 Main St").unwrap();

        let found = find_closest_candidates(&parsed, &data);
        let names: Vec<_> = found.iter().map(|r| r.street_name.as_str()).collect();
        assert_eq!(names, vec!["mian street", "mani street"]);
        assert_eq!(found[0].city_council, "2");
    }

    #[test]
    fn ignores_records_that_exclude_the_number() {
        let data = dataset(&[["1", "99", "odd", "Jefferon St", "1", "2"]]);
        let parsed = parse_address("50 Jefferson St").unwrap();
        assert!(find_closest_candidates(&parsed, &data).is_empty());
    }

    #[test]
    fn empty_key_yields_nothing() {
        let data = dataset(&[["1", "999", "all", "Main St", "1", "2"]]);
        let parsed = parse_address("5 #2").unwrap();
        assert!(find_closest_candidates(&parsed, &data).is_empty());
    }

    #[test]
    fn searches_across_chained_datasets() {
        let primary = dataset(&[["1", "999", "all", "Burnet Ave", "1", "2"]]);
        let backup = dataset(&[["1", "999", "all", "Salna St", "1", "4"]]);
        let parsed = parse_address("10 Salina St").unwrap();

        let found = find_closest_candidates(&parsed, primary.iter().chain(&backup));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].city_council, "4");
    }
}
