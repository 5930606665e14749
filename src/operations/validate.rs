use crate::error::{Error, Result};
use crate::models::expense::at_amount_scale;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

// Letters, digits, whitespace, hyphens, apostrophes and periods
static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w\s\-\.']+$").expect("name pattern compiles"));

// .99, 0.99, 99, 99.9, 99.99
static AMOUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)?(\.\d{1,2})?$").expect("amount pattern compiles"));

pub fn is_valid_name(name: &str) -> bool {
    // a line break would split the record in the log
    NAME_PATTERN.is_match(name) && !name.contains(['\n', '\r'])
}

pub fn is_valid_amount(amount_str: &str) -> bool {
    AMOUNT_PATTERN.is_match(amount_str)
}

/// Returns the name as it will be stored: trimmed, since the log trims fields on read.
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() || !is_valid_name(trimmed) {
        return Err(Error::InvalidName(name.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Parses an amount typed by the user into a two-decimal value.
///
/// The pattern also matches the empty string, which is still rejected here.
pub fn parse_amount(amount_str: &str) -> Result<Decimal> {
    if amount_str.is_empty() || !is_valid_amount(amount_str) {
        return Err(Error::InvalidAmount(amount_str.to_string()));
    }
    let normalized = if amount_str.starts_with('.') {
        format!("0{}", amount_str)
    } else {
        amount_str.to_string()
    };
    Decimal::from_str(&normalized)
        .ok()
        .and_then(at_amount_scale)
        .ok_or_else(|| Error::InvalidAmount(amount_str.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_valid_names() {
        assert!(is_valid_name("Coffee"));
        assert!(is_valid_name("Joe's Diner"));
        assert!(is_valid_name("St. Mary-Ann"));
        assert!(is_valid_name("Café 2"));
    }

    #[test]
    fn test_invalid_names() {
        assert!(!is_valid_name("@@@"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("Milk, Eggs"));
        assert!(!is_valid_name("two\nlines"));
    }

    #[test]
    fn test_amount_pattern() {
        for ok in [".99", "0.99", "99", "99.9", "99.99", "12.3"] {
            assert!(is_valid_amount(ok), "{} should be valid", ok);
        }
        for bad in ["12.345", "1,000", "-5", "abc", "1.", "."] {
            assert!(!is_valid_amount(bad), "{} should be invalid", bad);
        }
    }

    #[test]
    fn test_parse_amount_displays_two_decimals() {
        assert_eq!(parse_amount("12.3").unwrap().to_string(), "12.30");
        assert_eq!(parse_amount(".99").unwrap().to_string(), "0.99");
        assert_eq!(parse_amount("99").unwrap().to_string(), "99.00");
        assert_eq!(parse_amount("4.50").unwrap(), dec!(4.5));
    }

    #[test]
    fn test_parse_amount_rejects_empty_and_three_decimals() {
        assert!(matches!(parse_amount(""), Err(Error::InvalidAmount(_))));
        assert!(matches!(parse_amount("12.345"), Err(Error::InvalidAmount(_))));
    }

    #[test]
    fn test_parse_amount_rejects_values_without_room_for_cents() {
        assert!(matches!(
            parse_amount("9999999999999999999999999999"),
            Err(Error::InvalidAmount(_))
        ));
        assert!(matches!(
            parse_amount("50000000000000000000000000000"),
            Err(Error::InvalidAmount(_))
        ));
        assert_eq!(
            parse_amount("99999999999999999999999999").unwrap().to_string(),
            "99999999999999999999999999.00"
        );
    }

    #[test]
    fn test_validate_name_trims_surrounding_whitespace() {
        assert_eq!(validate_name(" Tea ").unwrap(), "Tea");
        assert!(matches!(validate_name("   "), Err(Error::InvalidName(_))));
    }

    #[test]
    fn test_validate_name_error_message() {
        let err = validate_name("@@@").unwrap_err();
        assert_eq!(err.to_string(), "Invalid name format");
    }
}
