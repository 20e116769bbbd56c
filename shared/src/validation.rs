//! Input validation functions
//!
//! Field-level validators used by the backend services before anything
//! is written to the document store.

use chrono::NaiveDate;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    let email_regex = regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    if !email_regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate a display label (reminder label, medication name)
pub fn validate_label(label: &str) -> Result<(), String> {
    if label.trim().is_empty() {
        return Err("Label cannot be empty".to_string());
    }
    if label.len() > 120 {
        return Err("Label must be at most 120 characters".to_string());
    }
    Ok(())
}

/// Validate a dosage description (e.g. "500mg")
pub fn validate_dosage(dosage: &str) -> Result<(), String> {
    if dosage.trim().is_empty() {
        return Err("Dosage cannot be empty".to_string());
    }
    if dosage.len() > 60 {
        return Err("Dosage must be at most 60 characters".to_string());
    }
    Ok(())
}

/// Validate free-text notes / descriptions / observations
pub fn validate_free_text(text: &str) -> Result<(), String> {
    if text.len() > 2000 {
        return Err("Text must be at most 2000 characters".to_string());
    }
    Ok(())
}

/// Validate an observation body (required, unlike notes)
pub fn validate_observation(text: &str) -> Result<(), String> {
    if text.trim().is_empty() {
        return Err("Observation cannot be empty".to_string());
    }
    validate_free_text(text)
}

/// Validate that an optional end date does not precede the start date
pub fn validate_date_range(start: NaiveDate, end: Option<NaiveDate>) -> Result<(), String> {
    if let Some(end) = end {
        if end < start {
            return Err("End date cannot be earlier than start date".to_string());
        }
    }
    Ok(())
}

/// Validate the trailing window used for adherence statistics
pub fn validate_stats_window_days(days: u32) -> Result<(), String> {
    if days == 0 {
        return Err("Statistics window must be at least 1 day".to_string());
    }
    if days > 366 {
        return Err("Statistics window must be at most 366 days".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("user@example.com", true)]
    #[case("a@b.co", true)]
    #[case("", false)]
    #[case("not-an-email", false)]
    #[case("missing@tld", false)]
    #[case("spaces in@example.com", false)]
    fn email_validation(#[case] email: &str, #[case] valid: bool) {
        assert_eq!(validate_email(email).is_ok(), valid);
    }

    #[test]
    fn password_length_bounds() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long-enough-password").is_ok());
        assert!(validate_password(&"x".repeat(129)).is_err());
    }

    #[test]
    fn label_rejects_blank_and_oversized() {
        assert!(validate_label("Morning dose").is_ok());
        assert!(validate_label("   ").is_err());
        assert!(validate_label(&"x".repeat(121)).is_err());
    }

    #[test]
    fn dosage_rejects_blank() {
        assert!(validate_dosage("500mg").is_ok());
        assert!(validate_dosage("").is_err());
    }

    #[test]
    fn observation_requires_content() {
        assert!(validate_observation("Felt dizzy after lunch").is_ok());
        assert!(validate_observation("  ").is_err());
    }

    #[test]
    fn date_range_ordering() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let before = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let after = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();

        assert!(validate_date_range(start, None).is_ok());
        assert!(validate_date_range(start, Some(after)).is_ok());
        assert!(validate_date_range(start, Some(start)).is_ok());
        assert!(validate_date_range(start, Some(before)).is_err());
    }

    #[test]
    fn stats_window_bounds() {
        assert!(validate_stats_window_days(0).is_err());
        assert!(validate_stats_window_days(30).is_ok());
        assert!(validate_stats_window_days(367).is_err());
    }
}
