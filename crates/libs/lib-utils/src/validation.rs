//! # Validation Utilities
//!
//! Input validation helpers. Each returns the user-facing message on failure.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate email format (basic check).
pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err("Invalid email format".to_string()),
    }
}

/// Validate minimum length in characters.
pub fn validate_min_length(value: &str, min: usize, field_name: &str) -> Result<(), String> {
    if value.chars().count() < min {
        Err(format!("{} must be at least {} characters", field_name, min))
    } else {
        Ok(())
    }
}

/// Validate that a number is strictly positive.
pub fn validate_positive(value: f64, field_name: &str) -> Result<(), String> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(format!("{} must be greater than zero", field_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("user+tag@example.co.ke").is_ok());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("@x.com").is_err());
        assert!(validate_email("a@localhost").is_err());
    }

    #[test]
    fn test_validate_min_length_counts_chars() {
        assert!(validate_min_length("pässwörd", 8, "Password").is_ok());
        assert_eq!(
            validate_min_length("short", 8, "Password").unwrap_err(),
            "Password must be at least 8 characters"
        );
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(1500.0, "Price").is_ok());
        assert!(validate_positive(0.0, "Price").is_err());
        assert!(validate_positive(f64::NAN, "Price").is_err());
    }
}
