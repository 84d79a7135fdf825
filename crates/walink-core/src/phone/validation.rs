use std::fmt;

use serde::{Deserialize, Serialize};

const MOBILE_PREFIX: &str = "9665";
const MOBILE_LEN: usize = 12;

/// Why a normalized number is not a Saudi mobile number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidNumber {
    WrongPrefix,
    TooShort,
    TooLong,
    NonDigit,
}

impl fmt::Display for InvalidNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::WrongPrefix => "does not start with 9665",
            Self::TooShort => "too short",
            Self::TooLong => "too long",
            Self::NonDigit => "contains a non-digit",
        };
        f.write_str(reason)
    }
}

/// Accepts exactly `9665` followed by eight ASCII digits.
pub fn validate(normalized: &str) -> Result<(), InvalidNumber> {
    if !normalized.starts_with(MOBILE_PREFIX) {
        return Err(InvalidNumber::WrongPrefix);
    }
    if !normalized.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidNumber::NonDigit);
    }
    match normalized.len() {
        MOBILE_LEN => Ok(()),
        n if n < MOBILE_LEN => Err(InvalidNumber::TooShort),
        _ => Err(InvalidNumber::TooLong),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_mobile_numbers() {
        assert!(validate("966512345678").is_ok());
        assert!(validate("966559948149").is_ok());
        assert!(validate("966599999999").is_ok());
    }

    #[test]
    fn length_off_by_one_rejected() {
        assert_eq!(validate("96651234567"), Err(InvalidNumber::TooShort));
        assert_eq!(validate("9665123456789"), Err(InvalidNumber::TooLong));
    }

    #[test]
    fn wrong_prefix_rejected() {
        assert_eq!(validate("966112345678"), Err(InvalidNumber::WrongPrefix));
        assert_eq!(validate("971512345678"), Err(InvalidNumber::WrongPrefix));
        assert_eq!(validate(""), Err(InvalidNumber::WrongPrefix));
    }

    #[test]
    fn non_digits_rejected() {
        assert_eq!(validate("9665123456a8"), Err(InvalidNumber::NonDigit));
        assert_eq!(validate("9665 2345678"), Err(InvalidNumber::NonDigit));
    }

    #[test]
    fn short_normalized_input_reports_too_short() {
        assert_eq!(validate("9665123"), Err(InvalidNumber::TooShort));
    }
}
