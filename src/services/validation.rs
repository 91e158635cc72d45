use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

use super::ServiceError;

/// Mirrors the `LIKE '%_@__%.__%'` check on customer emails: something, an
/// `@`, at least two characters, a `.`, then at least two characters.
#[must_use]
pub fn email_matches_pattern(email: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(?s)^.+@.{2,}\..{2,}$").expect("Invalid regex"));

    re.is_match(email)
}

pub fn validate_email(email: &str) -> Result<(), ServiceError> {
    if !email_matches_pattern(email) {
        return Err(ServiceError::validation(format!(
            "Invalid email address: '{email}'"
        )));
    }
    Ok(())
}

pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), ServiceError> {
    if start >= end {
        return Err(ServiceError::validation(format!(
            "Start date {start} must be before end date {end}"
        )));
    }
    Ok(())
}

pub fn validate_required<'a>(field: &str, value: &'a str) -> Result<&'a str, ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::validation(format!("{field} cannot be empty")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        assert!(email_matches_pattern("test@example.com"));
        assert!(email_matches_pattern("a@bc.de"));
        assert!(email_matches_pattern("first.last@sub.example.org"));

        assert!(!email_matches_pattern("@example.com"));
        assert!(!email_matches_pattern("a@b.com"));
        assert!(!email_matches_pattern("a@bc.d"));
        assert!(!email_matches_pattern("no-at-sign.com"));
        assert!(!email_matches_pattern(""));
        assert!(!email_matches_pattern("a@bcde"));
        assert!(email_matches_pattern("a@b.c.de"));
    }

    #[test]
    fn test_date_range() {
        let jan1 = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let jan2 = NaiveDate::from_ymd_opt(2021, 1, 2).unwrap();

        assert!(validate_date_range(jan1, jan2).is_ok());
        assert!(validate_date_range(jan1, jan1).is_err());
        assert!(validate_date_range(jan2, jan1).is_err());
    }

    #[test]
    fn test_required() {
        assert_eq!(validate_required("username", "bob").unwrap(), "bob");
        assert!(matches!(
            validate_required("username", "  "),
            Err(ServiceError::Validation(_))
        ));
    }
}
