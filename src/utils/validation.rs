//! Validation helpers
//!
//! Shared checks for the `NUMERIC(8, 2)` quantities and for the loosely
//! typed values drivers submit from the handheld client.

use std::borrow::Cow;

use rust_decimal::Decimal;
use serde_json::Value;
use validator::ValidationError;

/// Total digits allowed in a stored quantity
pub const MAX_DIGITS: u32 = 8;
/// Decimal places allowed in a stored quantity
pub const DECIMAL_PLACES: u32 = 2;

/// Build a `ValidationError` carrying a human readable message
pub fn field_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

/// Check that a decimal fits in `NUMERIC(8, 2)`
pub fn validate_quantity(value: &Decimal) -> Result<(), ValidationError> {
    let normalized = value.normalize();
    if normalized.scale() > DECIMAL_PLACES {
        return Err(field_error(
            "max_decimal_places",
            format!("Ensure that there are no more than {} decimal places.", DECIMAL_PLACES),
        ));
    }

    let whole_digits = MAX_DIGITS - DECIMAL_PLACES;
    let limit = Decimal::from(10_i64.pow(whole_digits));
    if normalized.abs().trunc() >= limit {
        return Err(field_error(
            "max_whole_digits",
            format!(
                "Ensure that there are no more than {} digits before the decimal point.",
                whole_digits
            ),
        ));
    }
    Ok(())
}

/// Parse a JSON value as a decimal: numbers and numeric strings are accepted
pub fn parse_decimal(value: &Value) -> Result<Decimal, ValidationError> {
    let invalid = || field_error("invalid", "A valid number is required.".to_string());
    let parsed = match value {
        Value::Number(n) => n.to_string().parse::<Decimal>().map_err(|_| invalid())?,
        Value::String(s) => s.trim().parse::<Decimal>().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };
    validate_quantity(&parsed)?;
    Ok(parsed)
}

/// Parse a JSON value as a non-negative integer
pub fn parse_non_negative_int(value: &Value) -> Result<i32, ValidationError> {
    let invalid = || field_error("invalid", "A valid integer is required.".to_string());
    let parsed = match value {
        Value::Number(n) => n.as_i64().ok_or_else(invalid)?,
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };
    if parsed < 0 {
        return Err(field_error(
            "min_value",
            "Ensure this value is greater than or equal to 0.".to_string(),
        ));
    }
    i32::try_from(parsed).map_err(|_| {
        field_error("max_value", format!("Ensure this value is less than or equal to {}.", i32::MAX))
    })
}

/// Parse a JSON value as a string of bounded length
pub fn parse_bounded_string(value: &Value, max: usize) -> Result<String, ValidationError> {
    let s = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return Err(field_error("invalid", "Not a valid string.".to_string())),
    };
    if s.chars().count() > max {
        return Err(field_error(
            "max_length",
            format!("Ensure this field has no more than {} characters.", max),
        ));
    }
    Ok(s)
}

/// Reject blank strings
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(field_error("blank", "This field may not be blank.".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn quantities_respect_numeric_8_2() {
        assert!(validate_quantity(&Decimal::from_str("999999.99").unwrap()).is_ok());
        assert!(validate_quantity(&Decimal::from_str("12.50").unwrap()).is_ok());
        assert!(validate_quantity(&Decimal::from_str("1000000").unwrap()).is_err());
        assert!(validate_quantity(&Decimal::from_str("1.234").unwrap()).is_err());
    }

    #[test]
    fn trailing_zeros_do_not_count_as_decimal_places() {
        assert!(validate_quantity(&Decimal::from_str("3.5000").unwrap()).is_ok());
    }

    #[test]
    fn decimals_parse_from_numbers_and_strings() {
        assert_eq!(parse_decimal(&json!("45.25")).unwrap(), Decimal::from_str("45.25").unwrap());
        assert_eq!(parse_decimal(&json!(20)).unwrap(), Decimal::from(20));
        assert_eq!(parse_decimal(&json!(12.5)).unwrap(), Decimal::from_str("12.5").unwrap());
        assert_eq!(parse_decimal(&json!("abc")).unwrap_err().code, "invalid");
        assert_eq!(parse_decimal(&json!(true)).unwrap_err().code, "invalid");
    }

    #[test]
    fn integers_must_be_non_negative() {
        assert_eq!(parse_non_negative_int(&json!(3)).unwrap(), 3);
        assert_eq!(parse_non_negative_int(&json!("4")).unwrap(), 4);
        assert_eq!(parse_non_negative_int(&json!(-1)).unwrap_err().code, "min_value");
        assert_eq!(parse_non_negative_int(&json!(1.5)).unwrap_err().code, "invalid");
    }

    #[test]
    fn strings_are_length_bounded() {
        assert_eq!(parse_bounded_string(&json!("D-1001"), 50).unwrap(), "D-1001");
        assert_eq!(parse_bounded_string(&json!("x".repeat(51)), 50).unwrap_err().code, "max_length");
    }

    #[test]
    fn blank_strings_are_rejected() {
        assert!(validate_not_blank("  ").is_err());
        assert!(validate_not_blank("Cardiff South").is_ok());
    }
}
