//! Date checks for the `custom` hooks of the draft validators.
//!
//! Presence and numeric bounds are declared with `#[validate(...)]` on the
//! draft fields; only `YYYY-MM-DD` parsing lives here.

use chrono::NaiveDate;
use validator::ValidationError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

pub fn validate_date(value: &str) -> Result<(), ValidationError> {
    parse_date(value).map(|_| ())
}

/// Blank is accepted; anything else must parse as a date.
pub fn validate_optional_date(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    validate_date(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_parse_in_iso_form() {
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(validate_date("29/02/2024").unwrap_err().code, "date");
        assert!(validate_date("").is_err());
    }

    #[test]
    fn optional_dates_accept_blank() {
        assert!(validate_optional_date("").is_ok());
        assert!(validate_optional_date("  ").is_ok());
        assert!(validate_optional_date("2024-13-01").is_err());
    }
}
