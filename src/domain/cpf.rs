//! CPF value object and check-digit validation.

use super::errors::ValidationError;
use crate::format::{format_cpf, strip_digits};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Number of digits in a normalized CPF.
pub const CPF_LEN: usize = 11;

/// Compute the two check digits for the first nine digits of a CPF.
///
/// Each digit is `sum * 10 mod 11` of a weighted sum, collapsing 10 to 0.
/// The first uses weights 10 down to 2 over the nine base digits; the second
/// uses weights 11 down to 2 over the base digits followed by the first
/// check digit.
pub fn check_digits(base: &[u8; 9]) -> (u8, u8) {
    let first = reduce(weighted_sum(base, 10));

    let mut extended = [0u8; 10];
    extended[..9].copy_from_slice(base);
    extended[9] = first;
    let second = reduce(weighted_sum(&extended, 11));

    (first, second)
}

fn weighted_sum(digits: &[u8], top_weight: u32) -> u32 {
    digits
        .iter()
        .zip((2..=top_weight).rev())
        .map(|(&d, w)| u32::from(d) * w)
        .sum()
}

fn reduce(sum: u32) -> u8 {
    let r = (sum * 10) % 11;
    if r < 10 {
        r as u8
    } else {
        0
    }
}

/// Validate a CPF given in any textual form.
///
/// Non-digit characters are ignored, so both `"529.982.247-25"` and
/// `"52998224725"` are accepted. Returns false for anything that is not
/// exactly 11 digits, for repeated-digit sequences like `"111.111.111-11"`,
/// and for mismatched check digits. Never panics.
///
/// ```
/// use collaborator_form::domain::is_valid_cpf;
///
/// assert!(is_valid_cpf("529.982.247-25"));
/// assert!(!is_valid_cpf("52998224726"));
/// assert!(!is_valid_cpf(""));
/// ```
pub fn is_valid_cpf(raw: &str) -> bool {
    let digits: Vec<u8> = raw
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| d as u8)
        .collect();

    if digits.len() != CPF_LEN {
        return false;
    }

    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    let mut base = [0u8; 9];
    base.copy_from_slice(&digits[..9]);
    let (first, second) = check_digits(&base);

    digits[9] == first && digits[10] == second
}

/// A validated CPF, stored as its 11 raw digits.
///
/// The remote API transports CPFs as JSON numbers, which drops leading
/// zeros; [`Cpf::from_number`] pads them back.
///
/// # Example
///
/// ```
/// use collaborator_form::domain::Cpf;
///
/// let cpf = Cpf::new("529.982.247-25").unwrap();
/// assert_eq!(cpf.as_str(), "52998224725");
/// assert_eq!(cpf.formatted(), "529.982.247-25");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cpf(String);

impl Cpf {
    /// Create a new Cpf from masked or raw input.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidCpf` if the check digits do not hold.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let raw = raw.as_ref();
        if !is_valid_cpf(raw) {
            return Err(ValidationError::InvalidCpf(raw.to_string()));
        }
        Ok(Self(strip_digits(raw)))
    }

    /// Create a Cpf from its numeric wire form, restoring leading zeros.
    pub fn from_number(number: u64) -> Result<Self, ValidationError> {
        Self::new(format!("{:011}", number))
    }

    /// Get the raw digits as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the CPF as the number the remote API expects.
    pub fn as_number(&self) -> u64 {
        // Eleven ASCII digits always fit in a u64.
        self.0.parse().unwrap_or_default()
    }

    /// Get the CPF in its `DDD.DDD.DDD-DD` display form.
    pub fn formatted(&self) -> String {
        format_cpf(&self.0)
    }
}

// Serde support - serialize as the numeric wire form
impl Serialize for Cpf {
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
impl<'de> Deserialize<'de> for Cpf {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match NumberOrText::deserialize(deserializer)? {
            NumberOrText::Number(n) => Cpf::from_number(n),
            NumberOrText::Text(s) => Cpf::new(s),
        }
        .map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted())
    }
}
