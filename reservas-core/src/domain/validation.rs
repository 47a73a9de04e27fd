//! Input validation shared by the directory and the ledger

use chrono::NaiveDate;

use super::result::{Error, Result};

/// Date format accepted at the boundary
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// True when `date` is today or later (calendar-day granularity)
pub fn validate_date(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::missing_field("date"));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| Error::invalid_date(format!("{} (expected YYYY-MM-DD)", trimmed)))
}

/// Trim a required field, failing when nothing is left
pub fn require_field(name: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::missing_field(name));
    }
    Ok(trimmed.to_string())
}

/// Reject a date before `today`
pub fn ensure_not_past(date: NaiveDate, today: NaiveDate) -> Result<()> {
    if validate_date(date, today) {
        Ok(())
    } else {
        Err(Error::invalid_date(format!("{} is before {}", date, today)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_date_boundaries() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert!(!validate_date(today.pred_opt().unwrap(), today));
        assert!(validate_date(today, today));
        assert!(validate_date(today.succ_opt().unwrap(), today));
        assert!(validate_date(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(), today));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(" 2026-10-19 ").unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
        );
        assert!(matches!(parse_date("19/10/2026"), Err(Error::InvalidDate(_))));
        assert!(matches!(parse_date("2026-02-30"), Err(Error::InvalidDate(_))));
        assert!(matches!(parse_date("  "), Err(Error::MissingField(_))));
    }

    #[test]
    fn test_require_field() {
        assert_eq!(require_field("name", "  Ana ").unwrap(), "Ana");
        match require_field("service", "   ") {
            Err(Error::MissingField(field)) => assert_eq!(field, "service"),
            other => panic!("expected MissingField, got {:?}", other),
        }
    }
}
