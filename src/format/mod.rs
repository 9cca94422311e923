//! Display masks for structured text fields.
//!
//! Masks are pure functions over digit strings: `format_*` lays the digits
//! into a display pattern, `strip_digits` recovers the raw digits. Cursor
//! handling is left to whatever renders the field.

mod mask;

pub use mask::{format_cpf, format_phone, strip_digits, FieldMask, CPF_PATTERN, PHONE_PATTERN};
