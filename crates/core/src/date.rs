//! Conversion of nginx `$time_local`-style timestamps into the canonical
//! `YYYY-MM-DD HH:MM:SS` form stored in the `date` dimension.
//!
//! The value is reformatted only; no timezone is attached or converted.

use chrono::{NaiveDateTime, Timelike};

use crate::error::DateParseError;

/// Format of timestamps in the v1 database, e.g. `10-Oct-2023:13:55:36`.
pub const SOURCE_DATE_FORMAT: &str = "%d-%b-%Y:%H:%M:%S";

/// Format of timestamps in the v2 `date` dimension, e.g. `2023-10-10 13:55:36`.
pub const TARGET_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reformat a v1 timestamp into the v2 canonical form.
pub fn normalize_date(raw: &str) -> Result<String, DateParseError> {
    let err = |reason: &str| DateParseError {
        input: raw.to_string(),
        reason: reason.to_string(),
    };

    // chrono's %b also accepts full month names and %Y takes 1 to 4 digits;
    // v1 only ever wrote `dd-Mon-yyyy:HH:MM:SS`.
    let (date_part, time) = raw.split_once(':').ok_or_else(|| err("missing ':' delimiter"))?;
    let mut date_fields = date_part.split('-');
    let (Some(_), Some(month), Some(year), None) = (
        date_fields.next(),
        date_fields.next(),
        date_fields.next(),
        date_fields.next(),
    ) else {
        return Err(err("date must be day-month-year separated by '-'"));
    };
    if month.len() != 3 {
        return Err(err("month must be a three-letter abbreviation"));
    }
    if !is_digits(year, 4) {
        return Err(err("year must be four digits"));
    }
    if !time.split(':').all(|field| is_digits(field, 2)) {
        return Err(err("time fields must be two digits"));
    }

    let parsed = NaiveDateTime::parse_from_str(raw, SOURCE_DATE_FORMAT)
        .map_err(|e| err(&e.to_string()))?;
    // Leap seconds parse as `:60`.
    if parsed.nanosecond() >= 1_000_000_000 {
        return Err(err("second must be in 00..59"));
    }

    Ok(parsed.format(TARGET_DATE_FORMAT).to_string())
}

fn is_digits(field: &str, width: usize) -> bool {
    field.len() == width && field.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reformats_nginx_timestamp() {
        assert_eq!(
            normalize_date("10-Oct-2023:13:55:36").unwrap(),
            "2023-10-10 13:55:36"
        );
    }

    #[test]
    fn pads_single_digit_fields() {
        assert_eq!(
            normalize_date("01-Jan-2024:00:05:09").unwrap(),
            "2024-01-01 00:05:09"
        );
    }

    #[test]
    fn leap_day_accepted() {
        assert_eq!(
            normalize_date("29-Feb-2024:12:00:00").unwrap(),
            "2024-02-29 12:00:00"
        );
    }

    #[test]
    fn wrong_delimiter_rejected() {
        assert!(normalize_date("10/Oct/2023:13:55:36").is_err());
    }

    #[test]
    fn unknown_month_rejected() {
        assert!(normalize_date("10-Foo-2023:13:55:36").is_err());
    }

    #[test]
    fn full_month_name_rejected() {
        assert!(normalize_date("10-October-2023:13:55:36").is_err());
    }

    #[test]
    fn non_numeric_day_rejected() {
        assert!(normalize_date("xx-Oct-2023:13:55:36").is_err());
    }

    #[test]
    fn impossible_date_rejected() {
        assert!(normalize_date("31-Feb-2023:13:55:36").is_err());
        assert!(normalize_date("29-Feb-2023:13:55:36").is_err());
    }

    #[test]
    fn impossible_time_rejected() {
        assert!(normalize_date("10-Oct-2023:25:00:00").is_err());
        assert!(normalize_date("10-Oct-2023:13:61:00").is_err());
    }

    #[test]
    fn two_digit_year_rejected() {
        let err = normalize_date("10-Oct-23:13:55:36").unwrap_err();
        assert!(err.reason.contains("year"), "{}", err.reason);
    }

    #[test]
    fn leap_second_rejected() {
        assert!(normalize_date("10-Oct-2023:13:55:60").is_err());
        assert_eq!(
            normalize_date("10-Oct-2023:13:55:59").unwrap(),
            "2023-10-10 13:55:59"
        );
    }

    #[test]
    fn short_time_field_rejected() {
        assert!(normalize_date("10-Oct-2023:1:55:36").is_err());
        assert!(normalize_date("10-Oct-2023:13:55").is_err());
    }

    #[test]
    fn trailing_timezone_rejected() {
        assert!(normalize_date("10-Oct-2023:13:55:36 +0000").is_err());
    }

    #[test]
    fn empty_input_rejected() {
        let err = normalize_date("").unwrap_err();
        assert_eq!(err.input, "");
    }

    #[test]
    fn error_carries_input() {
        let err = normalize_date("not a date").unwrap_err();
        assert_eq!(err.input, "not a date");
        assert!(err.to_string().contains("not a date"));
    }
}
