//! Reference-table construction.
//!
//! Turns raw tabular rows (embedded arrays or a delimited file) into
//! normalized [`StreetRecord`]s. Street names are normalized here with the
//! same pipeline applied to user input, so matching is plain string
//! equality.

use council_lookup_street_models::{DatasetFormat, RawRow, StreetRecord};

use crate::DatasetError;
use crate::normalize::{base_street_name, normalize_tokens};

/// Range type given to address-level records.
pub const ALL_RANGE_TYPE: &str = "all";

/// Minimum cell count of a ranged-format row.
const RANGED_COLUMN_COUNT: usize = 6;

/// Header of the street-name column in delimited files.
const STREET_NAME_HEADER: &str = "Street Name";
const NUM_FROM_HEADERS: &[&str] = &["Num From"];
const NUM_TO_HEADERS: &[&str] = &["Num To"];
const RANGE_TYPE_HEADERS: &[&str] = &["RangeType", "Range Type"];
const WARD_HEADERS: &[&str] = &["Ward"];
const CITY_COUNCIL_HEADERS: &[&str] = &["CityCouncilCode", "City Council"];

/// Guesses the layout of an untagged table from its first row.
///
/// A first row with six or more cells means the whole table is ranged;
/// anything else (including an empty table) is address-level. Mixed
/// tables are not detected.
#[must_use]
pub fn detect_format<S: AsRef<str>>(rows: &[Vec<S>]) -> DatasetFormat {
    match rows.first() {
        Some(first) if first.len() >= RANGED_COLUMN_COUNT => DatasetFormat::Ranged,
        _ => DatasetFormat::AddressLevel,
    }
}

/// Lenient integer parse: optional surrounding whitespace, an optional
/// sign, then leading decimal digits. Trailing garbage is ignored.
///
/// Returns `None` when there are no leading digits or the value does not
/// fit in an `i64`.
#[must_use]
pub fn parse_leading_int(cell: &str) -> Option<i64> {
    let s = cell.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let value = rest[..digits_len].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

/// Normalizes a single raw row.
#[must_use]
pub fn build_record(row: &RawRow) -> StreetRecord {
    match row {
        RawRow::AddressLevel {
            street_number,
            street_name,
            city_council,
            ward,
        } => {
            let (street_name, street_base) = normalize_name(street_name);
            StreetRecord {
                num_from: None,
                num_to: None,
                range_type: ALL_RANGE_TYPE.to_string(),
                street_name,
                street_base,
                ward: ward.clone(),
                city_council: city_council.clone(),
                street_number: Some(street_number.trim().to_string()),
            }
        }
        RawRow::Ranged {
            num_from,
            num_to,
            range_type,
            street_name,
            ward,
            city_council,
        } => {
            let (street_name, street_base) = normalize_name(street_name);
            StreetRecord {
                num_from: parse_leading_int(num_from),
                num_to: parse_leading_int(num_to),
                range_type: range_type.clone(),
                street_name,
                street_base,
                ward: ward.clone(),
                city_council: city_council.clone(),
                street_number: None,
            }
        }
    }
}

/// Normalizes every row, preserving order.
#[must_use]
pub fn build_dataset(rows: &[RawRow]) -> Vec<StreetRecord> {
    rows.iter().map(build_record).collect()
}

/// Builds a dataset from positional string cells in the given layout.
#[must_use]
pub fn build_dataset_from_cells<S: AsRef<str>>(
    rows: &[Vec<S>],
    format: DatasetFormat,
) -> Vec<StreetRecord> {
    rows.iter()
        .map(|cells| build_record(&RawRow::from_cells(cells, format)))
        .collect()
}

/// Builds a ranged dataset from a delimited file with a header row.
///
/// Columns are located by header name, so column order does not matter
/// and extra columns are ignored. Rows whose normalized street name is
/// empty are dropped.
///
/// # Errors
///
/// * [`DatasetError::Csv`] if the file is not valid CSV
/// * [`DatasetError::MissingColumn`] if there is no `Street Name` header
pub fn build_dataset_from_csv(bytes: &[u8]) -> Result<Vec<StreetRecord>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();

    let column = |names: &[&str]| {
        names
            .iter()
            .find_map(|name| headers.iter().position(|h| h == name))
    };

    let street_name_col = column(&[STREET_NAME_HEADER])
        .ok_or_else(|| DatasetError::MissingColumn(STREET_NAME_HEADER.to_string()))?;
    let num_from_col = column(NUM_FROM_HEADERS);
    let num_to_col = column(NUM_TO_HEADERS);
    let range_type_col = column(RANGE_TYPE_HEADERS);
    let ward_col = column(WARD_HEADERS);
    let city_council_col = column(CITY_COUNCIL_HEADERS);

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = result?;
        let cell = |col: Option<usize>| {
            col.and_then(|i| record.get(i))
                .unwrap_or_default()
                .to_owned()
        };

        let row = RawRow::Ranged {
            num_from: cell(num_from_col),
            num_to: cell(num_to_col),
            range_type: cell(range_type_col),
            street_name: cell(Some(street_name_col)),
            ward: cell(ward_col),
            city_council: cell(city_council_col),
        };

        let built = build_record(&row);
        if built.street_name.is_empty() {
            skipped += 1;
            continue;
        }
        records.push(built);
    }

    if skipped > 0 {
        log::debug!("Skipped {skipped} CSV rows with no street name");
    }
    log::info!("Parsed {} street records from CSV", records.len());

    Ok(records)
}

fn normalize_name(raw: &str) -> (String, String) {
    let tokens = normalize_tokens(raw);
    let base = base_street_name(&tokens);
    (tokens.join(" "), base)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn detects_format_from_first_row_width() {
        let ranged = vec![cells(&["1", "99", "odd", "Main St", "1", "2"])];
        let address = vec![cells(&["12", "Main St", "2", "1"])];
        assert_eq!(detect_format(&ranged), DatasetFormat::Ranged);
        assert_eq!(detect_format(&address), DatasetFormat::AddressLevel);
        assert_eq!(detect_format::<String>(&[]), DatasetFormat::AddressLevel);
    }

    #[test]
    fn lenient_int_parse() {
        assert_eq!(parse_leading_int("100"), Some(100));
        assert_eq!(parse_leading_int("  42 "), Some(42));
        assert_eq!(parse_leading_int("12abc"), Some(12));
        assert_eq!(parse_leading_int("-7"), Some(-7));
        assert_eq!(parse_leading_int("+3"), Some(3));
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("99999999999999999999999"), None);
    }

    #[test]
    fn builds_address_level_records() {
        let rows = vec![cells(&[" 201 ", "E Jefferson St", "04", "3"])];
        let records = build_dataset_from_cells(&rows, DatasetFormat::AddressLevel);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.street_name, "east jefferson street");
        assert_eq!(record.street_base, "east jefferson");
        assert_eq!(record.street_number.as_deref(), Some("201"));
        assert_eq!(record.range_type, "all");
        assert_eq!(record.city_council, "04");
        assert_eq!(record.ward, "3");
        assert_eq!(record.num_from, None);
    }

    #[test]
    fn builds_ranged_records_with_bad_numbers() {
        let rows = vec![cells(&["1", "n/a", "odd", "S Salina St", "3", "4"])];
        let records = build_dataset_from_cells(&rows, DatasetFormat::Ranged);

        let record = &records[0];
        assert_eq!(record.num_from, Some(1));
        assert_eq!(record.num_to, None);
        assert_eq!(record.range_type, "odd");
        assert_eq!(record.street_name, "south salina street");
        assert_eq!(record.ward, "3");
        assert_eq!(record.city_council, "4");
        assert_eq!(record.street_number, None);
    }

    #[test]
    fn short_rows_default_to_empty() {
        let rows = vec![cells(&["10", "20"])];
        let records = build_dataset_from_cells(&rows, DatasetFormat::Ranged);
        assert_eq!(records[0].street_name, "");
        assert_eq!(records[0].ward, "");
        assert_eq!(records[0].city_council, "");
    }

    #[test]
    fn building_is_idempotent() {
        let rows = vec![
            RawRow::from_cells(&["1", "999", "all", "James St", "1", "2"], DatasetFormat::Ranged),
            RawRow::from_cells(&["5", "Court St", "1", "7"], DatasetFormat::AddressLevel),
        ];
        assert_eq!(build_dataset(&rows), build_dataset(&rows));
    }

    #[test]
    fn builds_from_csv_by_header_name() {
        let csv = "\
Ward,Street Name,Num To,Num From,Range Type,City Council,Extra
3,\"S Salina St\",999,1,odd,04,x
5,\"Erie Blvd, E\",200,100,even,02,y
1,,10,1,all,01,z
";
        let records = build_dataset_from_csv(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].street_name, "south salina street");
        assert_eq!(records[0].num_from, Some(1));
        assert_eq!(records[0].num_to, Some(999));
        assert_eq!(records[0].range_type, "odd");
        assert_eq!(records[0].city_council, "04");
        assert_eq!(records[1].street_name, "erie boulevard east");
        assert_eq!(records[1].ward, "5");
    }

    #[test]
    fn csv_handles_quotes_and_embedded_newlines() {
        let csv = "Street Name,Num From,Num To,RangeType,Ward,CityCouncilCode\n\
\"Tipperary \"\"Hill\"\"\nRd\",1,50,all,2,01\n";
        let records = build_dataset_from_csv(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].street_name, "tipperary \"hill\" road");
        assert_eq!(records[0].street_base, "tipperary \"hill\"");
    }

    #[test]
    fn csv_without_street_name_header_fails() {
        let csv = "Num From,Num To\n1,2\n";
        let err = build_dataset_from_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn(ref c) if c == "Street Name"));
    }

    #[test]
    fn csv_with_only_header_is_empty() {
        let csv = "Street Name,Num From\n";
        assert!(build_dataset_from_csv(csv.as_bytes()).unwrap().is_empty());
    }
}
