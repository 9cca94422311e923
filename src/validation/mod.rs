//! Form schema validation.
//!
//! The schema is an explicit table of pure per-field validators
//! ([`COLLABORATOR_RULES`]) composed by a generic runner ([`run_rules`]).
//! Every field is always evaluated, so a form can show all of its errors at
//! once.

mod field;
mod schema;

pub use field::FormField;
pub use schema::{
    into_new_collaborator, run_rules, validate_address, validate_cpf, validate_email,
    validate_field, validate_form, validate_name, validate_phone, FieldOutcome, FieldRule,
    FieldValidator, ValidationReport, ADDRESS_TOO_SHORT, COLLABORATOR_RULES, CPF_INCOMPLETE,
    CPF_INVALID, INVALID_FORMAT, NAME_TOO_LONG, NAME_TOO_SHORT, PHONE_INCOMPLETE,
    REQUIRED_LABEL,
};
