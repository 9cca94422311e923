use serde::{Deserialize, Serialize};

/// Display pattern for CPF; `D` marks a digit slot.
pub const CPF_PATTERN: &str = "DDD.DDD.DDD-DD";

/// Display pattern for mobile phones; `D` marks a digit slot.
pub const PHONE_PATTERN: &str = "(DD) D DDDD-DDDD";

const CPF_DIGITS: usize = 11;
const PHONE_DIGITS: usize = 11;

/// Remove every character that is not an ASCII digit.
pub fn strip_digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn digits_up_to(input: &str, max: usize) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).take(max).collect()
}

/// Lay the digits of `input` into `DDD.DDD.DDD-DD`.
///
/// Separators only appear once a digit follows them, so partially typed
/// input gets a partial mask. Digits past the eleventh are dropped.
///
/// ```
/// use collaborator_form::format::format_cpf;
///
/// assert_eq!(format_cpf("529"), "529");
/// assert_eq!(format_cpf("5299"), "529.9");
/// assert_eq!(format_cpf("52998224725"), "529.982.247-25");
/// ```
pub fn format_cpf(input: &str) -> String {
    let d = digits_up_to(input, CPF_DIGITS);

    match d.len() {
        0..=3 => d,
        4..=6 => format!("{}.{}", &d[..3], &d[3..]),
        7..=9 => format!("{}.{}.{}", &d[..3], &d[3..6], &d[6..]),
        _ => format!("{}.{}.{}-{}", &d[..3], &d[3..6], &d[6..9], &d[9..]),
    }
}

/// Lay the digits of `input` into `(DD) D DDDD-DDDD`.
///
/// The area code is parenthesized as soon as both of its digits are present.
/// Ten-digit landlines are laid out with the same mobile pattern.
///
/// ```
/// use collaborator_form::format::format_phone;
///
/// assert_eq!(format_phone("1"), "(1");
/// assert_eq!(format_phone("11"), "(11)");
/// assert_eq!(format_phone("11987654321"), "(11) 9 8765-4321");
/// ```
pub fn format_phone(input: &str) -> String {
    let d = digits_up_to(input, PHONE_DIGITS);

    match d.len() {
        0 => d,
        1 => format!("({}", d),
        2 => format!("({})", d),
        3 => format!("({}) {}", &d[..2], &d[2..]),
        4..=7 => format!("({}) {} {}", &d[..2], &d[2..3], &d[3..]),
        _ => format!("({}) {} {}-{}", &d[..2], &d[2..3], &d[3..7], &d[7..]),
    }
}

/// The masks a form field can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldMask {
    Cpf,
    Phone,
}

impl FieldMask {
    /// Format arbitrary input for display.
    pub fn apply(self, input: &str) -> String {
        match self {
            FieldMask::Cpf => format_cpf(input),
            FieldMask::Phone => format_phone(input),
        }
    }

    /// Strip a masked value back to raw digits.
    pub fn strip(self, input: &str) -> String {
        strip_digits(input)
    }

    /// The display pattern, `D` marking digit slots.
    pub fn pattern(self) -> &'static str {
        match self {
            FieldMask::Cpf => CPF_PATTERN,
            FieldMask::Phone => PHONE_PATTERN,
        }
    }

    /// Placeholder text shown in an empty field.
    pub fn placeholder(self) -> String {
        self.pattern().replace('D', "0")
    }
}
