//! Validated form values.
//!
//! Every value here is checked once at the edge (when a form or JSON body is
//! accepted) so the backend is never called with input that is obviously
//! malformed.

use serde::{Serialize, Serializer};

use crate::error::{ValidationError, ValidationResult};

/// Mobile account number (the wallet's public handle).
///
/// Accepts an optional leading `+` followed by 10 to 15 digits. Spaces and
/// dashes used as visual separators are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValidationError::Missing("phone"));
        }

        let (plus, rest) = match raw.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        let digits: String = rest.chars().filter(|c| *c != ' ' && *c != '-').collect();
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::invalid("phone", "must contain only digits"));
        }
        if !(10..=15).contains(&digits.len()) {
            return Err(ValidationError::invalid("phone", "must be 10 to 15 digits"));
        }

        Ok(Self(if plus { format!("+{digits}") } else { digits }))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Numeric wallet PIN.
///
/// `Debug` is redacted; the PIN is only ever exposed through `Serialize` when
/// building the backend request body.
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(String);

impl Pin {
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        if raw.is_empty() {
            return Err(ValidationError::Missing("pin"));
        }
        if !(4..=6).contains(&raw.len()) || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::invalid("pin", "must be 4 to 6 digits"));
        }
        Ok(Self(raw.to_string()))
    }
}

impl core::fmt::Debug for Pin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Pin(****)")
    }
}

impl Serialize for Pin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Positive transfer amount in whole currency units.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    pub fn new(value: u64) -> ValidationResult<Self> {
        if value == 0 {
            return Err(ValidationError::invalid("amount", "must be greater than zero"));
        }
        Ok(Self(value))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Non-empty, trimmed free-text field (names, references, notes).
pub fn required_text(field: &'static str, raw: &str) -> ValidationResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn phone_number_normalizes_separators() {
        let phone = PhoneNumber::parse(" +880 1712-345678 ").unwrap();
        assert_eq!(phone.as_str(), "+8801712345678");
    }

    #[test]
    fn phone_number_rejects_letters_and_bad_lengths() {
        assert_eq!(PhoneNumber::parse(""), Err(ValidationError::Missing("phone")));
        assert!(PhoneNumber::parse("01712abc678").is_err());
        assert!(PhoneNumber::parse("12345").is_err());
        assert!(PhoneNumber::parse("1234567890123456").is_err());
    }

    #[test]
    fn pin_is_redacted_in_debug_but_serialized_for_backend() {
        let pin = Pin::parse("12345").unwrap();
        assert_eq!(format!("{pin:?}"), "Pin(****)");
        assert_eq!(serde_json::to_string(&pin).unwrap(), "\"12345\"");
    }

    #[test]
    fn pin_rejects_non_digits_and_wrong_length() {
        assert!(Pin::parse("12a4").is_err());
        assert!(Pin::parse("123").is_err());
        assert!(Pin::parse("1234567").is_err());
    }

    #[test]
    fn amount_must_be_positive() {
        assert!(Amount::new(0).is_err());
        assert_eq!(Amount::new(50).unwrap().get(), 50);
    }

    #[test]
    fn required_text_trims() {
        assert_eq!(required_text("name", "  Dhaka Power  ").unwrap(), "Dhaka Power");
        assert_eq!(required_text("name", "   "), Err(ValidationError::Missing("name")));
    }

    proptest! {
        /// Any 10-15 digit string is a valid phone number and survives unchanged.
        #[test]
        fn digit_strings_in_range_are_valid_phones(digits in "[0-9]{10,15}") {
            let phone = PhoneNumber::parse(&digits).unwrap();
            prop_assert_eq!(phone.as_str(), digits.as_str());
        }
    }
}
