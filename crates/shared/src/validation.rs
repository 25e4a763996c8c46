//! Common validation utilities.

use validator::ValidationError;

/// Maximum length of a pledge comment.
pub const MAX_COMMENT_LENGTH: usize = 500;

/// Validates that a pledge amount is a finite, non-negative number.
pub fn validate_amount(amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("amount_range");
        err.message = Some("Amount must be a finite non-negative number".into());
        Err(err)
    }
}

/// Validates that a comment does not exceed the maximum length.
pub fn validate_comment(comment: &str) -> Result<(), ValidationError> {
    if comment.chars().count() <= MAX_COMMENT_LENGTH {
        Ok(())
    } else {
        let mut err = ValidationError::new("comment_length");
        err.message = Some("Comment must be at most 500 characters".into());
        Err(err)
    }
}

/// Validates a branding color in `#rrggbb` hex notation.
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());

    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("hex_color");
        err.message = Some("Color must be in #rrggbb format".into());
        Err(err)
    }
}

/// Validates a public campaign slug: lowercase alphanumeric and dashes,
/// 3 to 64 characters.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let valid = (3..=64).contains(&slug.len())
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !slug.starts_with('-')
        && !slug.ends_with('-');

    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("slug_format");
        err.message =
            Some("Slug must be 3-64 lowercase alphanumeric characters or dashes".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_amount_accepts_valid() {
        assert!(validate_amount(0.0).is_ok());
        assert!(validate_amount(250.0).is_ok());
        assert!(validate_amount(99999.99).is_ok());
    }

    #[test]
    fn test_validate_amount_rejects_negative() {
        assert!(validate_amount(-1.0).is_err());
        assert!(validate_amount(-0.01).is_err());
    }

    #[test]
    fn test_validate_amount_rejects_non_finite() {
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
        assert!(validate_amount(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_validate_comment_boundary() {
        assert!(validate_comment(&"a".repeat(500)).is_ok());
        assert!(validate_comment(&"a".repeat(501)).is_err());
        assert!(validate_comment("").is_ok());
    }

    #[test]
    fn test_validate_comment_counts_chars_not_bytes() {
        // 500 multi-byte characters are within the limit
        assert!(validate_comment(&"é".repeat(500)).is_ok());
    }

    #[test]
    fn test_validate_hex_color() {
        assert!(validate_hex_color("#1a2b3c").is_ok());
        assert!(validate_hex_color("#FFFFFF").is_ok());
        assert!(validate_hex_color("1a2b3c").is_err());
        assert!(validate_hex_color("#1a2b3").is_err());
        assert!(validate_hex_color("#1a2b3g").is_err());
        assert!(validate_hex_color("").is_err());
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("spring-campaign-2026").is_ok());
        assert!(validate_slug("abc").is_ok());
        assert!(validate_slug("ab").is_err());
        assert!(validate_slug("Upper-Case").is_err());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("trailing-").is_err());
        assert!(validate_slug("spaces not allowed").is_err());
    }
}
