//! Field rules shared by the entity drafts.

use rust_decimal::Decimal;
use thiserror::Error;

/// A draft failed the same checks the dashboard forms apply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{0} must be a hex color such as #1a2b3c")]
    NotHexColor(&'static str),

    #[error("{0} must not be negative")]
    Negative(&'static str),
}

pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field));
    }
    Ok(())
}

/// At least four characters with a leading `#`, like `#fff`.
pub(crate) fn require_hex_color(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.len() < 4 || !value.starts_with('#') {
        return Err(ValidationError::NotHexColor(field));
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::Negative(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_rule() {
        assert!(require_hex_color("value", "#fff").is_ok());
        assert!(require_hex_color("value", "#1a2b3c").is_ok());
        assert_eq!(require_hex_color("value", "fff0"), Err(ValidationError::NotHexColor("value")));
        assert_eq!(require_hex_color("value", "#ff"), Err(ValidationError::NotHexColor("value")));
    }

    #[test]
    fn test_blank_is_empty() {
        assert_eq!(require("label", "   "), Err(ValidationError::Empty("label")));
    }

    #[test]
    fn test_negative_price_rejected() {
        assert!(require_non_negative("price", Decimal::ZERO).is_ok());
        assert!(require_non_negative("price", Decimal::new(-1, 2)).is_err());
    }
}
