//! PhoneNumber value object.

use super::errors::ValidationError;
use crate::format::{format_phone, strip_digits};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A type-safe wrapper for Brazilian phone numbers.
///
/// Holds the raw digits: a 2-digit area code followed by an 8 or 9 digit
/// number. No algorithmic validation is done beyond the digit count.
///
/// # Example
///
/// ```
/// use collaborator_form::domain::PhoneNumber;
///
/// let phone = PhoneNumber::new("(11) 9 8765-4321").unwrap();
/// assert_eq!(phone.as_str(), "11987654321");
/// assert_eq!(phone.as_number(), 11987654321);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new PhoneNumber, validating the format.
    ///
    /// # Validation Rules
    ///
    /// - Can contain: digits, spaces, hyphens, parentheses, plus sign, periods
    /// - Must hold 10 or 11 digits once formatting is removed
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` if the phone format is invalid.
    pub fn new(phone: impl AsRef<str>) -> Result<Self, ValidationError> {
        let phone = phone.as_ref();

        if !Self::is_valid(phone) {
            return Err(ValidationError::InvalidPhone(phone.to_string()));
        }

        Ok(Self(strip_digits(phone)))
    }

    /// Create a PhoneNumber from its numeric wire form.
    pub fn from_number(number: u64) -> Result<Self, ValidationError> {
        Self::new(number.to_string())
    }

    /// Validate phone format.
    fn is_valid(phone: &str) -> bool {
        let allowed = phone.chars().all(|c| {
            c.is_ascii_digit()
                || c == ' '
                || c == '-'
                || c == '('
                || c == ')'
                || c == '+'
                || c == '.'
        });

        let digit_count = phone.chars().filter(|c| c.is_ascii_digit()).count();
        allowed && (10..=11).contains(&digit_count)
    }

    /// Get the raw digits as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the phone as the number the remote API expects.
    pub fn as_number(&self) -> u64 {
        self.0.parse().unwrap_or_default()
    }

    /// Get the phone in its `(AA) D DDDD-DDDD` display form.
    pub fn formatted(&self) -> String {
        format_phone(&self.0)
    }
}

// Serde support - serialize as the numeric wire form
impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.as_number())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(u64),
    Text(String),
}

// Serde support - accept either a number or a (possibly masked) string
impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match NumberOrText::deserialize(deserializer)? {
            NumberOrText::Number(n) => PhoneNumber::from_number(n),
            NumberOrText::Text(s) => PhoneNumber::new(s),
        }
        .map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted())
    }
}
