//! Strict `YYYYMMDDTHHMMSS` timestamp parsing for `DCREATED` / `LAST-MODIFIED`.

use chrono::NaiveDateTime;

use crate::error::{Result, VntError};

/// chrono pattern matching the vNote basic ISO 8601 form.
const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Parse a vNote timestamp such as `20230615T143000`.
///
/// The value must be exactly eight digits, a literal `T`, and six digits;
/// chrono then rejects out-of-range dates and times. `field` names the
/// property in the error.
pub fn parse_timestamp(field: &'static str, value: &str) -> Result<NaiveDateTime> {
    let malformed = || VntError::MalformedTimestamp {
        field,
        value: value.to_string(),
    };

    if !has_fixed_shape(value.as_bytes()) {
        return Err(malformed());
    }

    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|_| malformed())
}

/// Check the `DDDDDDDDTDDDDDD` shape so chrono's lenient widths never apply.
fn has_fixed_shape(bytes: &[u8]) -> bool {
    bytes.len() == 15
        && bytes[8] == b'T'
        && bytes[..8].iter().all(u8::is_ascii_digit)
        && bytes[9..].iter().all(u8::is_ascii_digit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_valid_timestamp() {
        let dt = parse_timestamp("DCREATED", "20230615T143000").unwrap();
        let expected = NaiveDate::from_ymd_opt(2023, 6, 15)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        assert_eq!(dt, expected);
    }

    #[test]
    fn test_parse_iso_date_is_malformed() {
        let err = parse_timestamp("LAST-MODIFIED", "2023-06-15").unwrap_err();
        match err {
            VntError::MalformedTimestamp { field, value } => {
                assert_eq!(field, "LAST-MODIFIED");
                assert_eq!(value, "2023-06-15");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_short_fields_rejected() {
        assert!(parse_timestamp("DCREATED", "2023615T143000").is_err());
        assert!(parse_timestamp("DCREATED", "20230615T1430").is_err());
        assert!(parse_timestamp("DCREATED", "20230615 143000").is_err());
    }

    #[test]
    fn test_parse_out_of_range_rejected() {
        assert!(parse_timestamp("DCREATED", "20231315T143000").is_err());
        assert!(parse_timestamp("DCREATED", "20230615T256000").is_err());
    }

    #[test]
    fn test_parse_utc_suffix_rejected() {
        assert!(parse_timestamp("DCREATED", "20230615T143000Z").is_err());
    }
}
