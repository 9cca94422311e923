//! Per-field validation rules and the runner that composes them.

use super::field::FormField;
use crate::domain::{is_valid_cpf, Cpf, EmailAddress, PhoneNumber};
use crate::format::strip_digits;
use crate::models::{FormValues, NewCollaborator};
use std::collections::BTreeMap;

pub const REQUIRED_LABEL: &str = "Campo Obrigatório";
pub const INVALID_FORMAT: &str = "Campo Inválido";
pub const NAME_TOO_SHORT: &str = "O campo nome precisa conter pelo menos 3 caracteres.";
pub const NAME_TOO_LONG: &str = "O campo nome pode conter no máximo 60 caracteres.";
pub const CPF_INCOMPLETE: &str = "Preencha o CPF corretamente.";
pub const CPF_INVALID: &str = "CPF Inválido";
pub const PHONE_INCOMPLETE: &str = "Preencha o telefone corretamente.";
pub const ADDRESS_TOO_SHORT: &str = "Endereço muito curto";

const NAME_MIN: usize = 3;
const NAME_MAX: usize = 60;
const ADDRESS_MIN: usize = 10;
const CPF_DIGITS: usize = 11;
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 10..=11;

/// Result of checking one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    Valid,
    Invalid(String),
}

impl FieldOutcome {
    fn invalid(reason: &str) -> Self {
        FieldOutcome::Invalid(reason.to_string())
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, FieldOutcome::Valid)
    }

    /// The message to display, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            FieldOutcome::Valid => None,
            FieldOutcome::Invalid(reason) => Some(reason),
        }
    }
}

/// Outcome for every field of one validation run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    fields: BTreeMap<FormField, FieldOutcome>,
}

impl ValidationReport {
    /// True when every checked field passed.
    pub fn is_valid(&self) -> bool {
        self.fields.values().all(FieldOutcome::is_valid)
    }

    pub fn outcome(&self, field: FormField) -> Option<&FieldOutcome> {
        self.fields.get(&field)
    }

    pub fn error(&self, field: FormField) -> Option<&str> {
        self.fields.get(&field).and_then(FieldOutcome::reason)
    }

    /// Failing fields with their messages, in display order.
    pub fn errors(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.fields
            .iter()
            .filter_map(|(field, outcome)| outcome.reason().map(|r| (*field, r)))
    }

    pub fn set(&mut self, field: FormField, outcome: FieldOutcome) {
        self.fields.insert(field, outcome);
    }

    pub fn clear(&mut self, field: FormField) {
        self.fields.remove(&field);
    }
}

/// A pure check over one field's raw text.
pub type FieldValidator = fn(&str) -> FieldOutcome;

/// Binds a validator to the field it checks.
#[derive(Clone, Copy)]
pub struct FieldRule {
    pub field: FormField,
    pub validate: FieldValidator,
}

/// The collaborator form schema.
pub const COLLABORATOR_RULES: [FieldRule; 5] = [
    FieldRule {
        field: FormField::Name,
        validate: validate_name,
    },
    FieldRule {
        field: FormField::Email,
        validate: validate_email,
    },
    FieldRule {
        field: FormField::Cpf,
        validate: validate_cpf,
    },
    FieldRule {
        field: FormField::Phone,
        validate: validate_phone,
    },
    FieldRule {
        field: FormField::Address,
        validate: validate_address,
    },
];

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// Surrounding whitespace never counts toward a length limit
fn char_len(value: &str) -> usize {
    value.trim().chars().count()
}

pub fn validate_name(value: &str) -> FieldOutcome {
    if is_blank(value) {
        return FieldOutcome::invalid(REQUIRED_LABEL);
    }
    match char_len(value) {
        n if n < NAME_MIN => FieldOutcome::invalid(NAME_TOO_SHORT),
        n if n > NAME_MAX => FieldOutcome::invalid(NAME_TOO_LONG),
        _ => FieldOutcome::Valid,
    }
}

pub fn validate_email(value: &str) -> FieldOutcome {
    if is_blank(value) {
        return FieldOutcome::invalid(REQUIRED_LABEL);
    }
    if !EmailAddress::is_valid(value.trim()) {
        return FieldOutcome::invalid(INVALID_FORMAT);
    }
    FieldOutcome::Valid
}

pub fn validate_cpf(value: &str) -> FieldOutcome {
    let digits = strip_digits(value);
    if digits.is_empty() {
        return FieldOutcome::invalid(REQUIRED_LABEL);
    }
    if digits.len() != CPF_DIGITS {
        return FieldOutcome::invalid(CPF_INCOMPLETE);
    }
    if !is_valid_cpf(&digits) {
        return FieldOutcome::invalid(CPF_INVALID);
    }
    FieldOutcome::Valid
}

pub fn validate_phone(value: &str) -> FieldOutcome {
    let digits = strip_digits(value).len();
    if digits == 0 {
        return FieldOutcome::invalid(REQUIRED_LABEL);
    }
    if !PHONE_DIGITS.contains(&digits) {
        return FieldOutcome::invalid(PHONE_INCOMPLETE);
    }
    FieldOutcome::Valid
}

pub fn validate_address(value: &str) -> FieldOutcome {
    if is_blank(value) {
        return FieldOutcome::invalid(REQUIRED_LABEL);
    }
    if char_len(value) < ADDRESS_MIN {
        return FieldOutcome::invalid(ADDRESS_TOO_SHORT);
    }
    FieldOutcome::Valid
}

/// Run every rule against the values, collecting all outcomes.
///
/// Rules never short-circuit each other so each field can show its own
/// error at the same time.
pub fn run_rules<'a, F>(rules: &[FieldRule], value_of: F) -> ValidationReport
where
    F: Fn(FormField) -> &'a str,
{
    let mut report = ValidationReport::default();
    for rule in rules {
        report.set(rule.field, (rule.validate)(value_of(rule.field)));
    }
    report
}

/// Validate a single field, as done on blur or change.
pub fn validate_field(field: FormField, value: &str) -> FieldOutcome {
    COLLABORATOR_RULES
        .iter()
        .find(|rule| rule.field == field)
        .map(|rule| (rule.validate)(value))
        .unwrap_or(FieldOutcome::Valid)
}

/// Validate the whole form.
pub fn validate_form(values: &FormValues) -> ValidationReport {
    run_rules(&COLLABORATOR_RULES, |field| field.value_in(values))
}

/// Validate the form and build the record to submit.
///
/// # Errors
///
/// Returns the full report when any field fails.
pub fn into_new_collaborator(values: &FormValues) -> Result<NewCollaborator, ValidationReport> {
    let mut report = validate_form(values);
    if !report.is_valid() {
        return Err(report);
    }

    let email = EmailAddress::new(values.email.trim());
    let phone = PhoneNumber::new(strip_digits(&values.phone));
    let cpf = Cpf::new(&values.cpf);

    match (email, phone, cpf) {
        (Ok(email), Ok(phone), Ok(cpf)) => Ok(NewCollaborator {
            name: values.name.trim().to_string(),
            email,
            phone,
            address: values.address.trim().to_string(),
            cpf,
        }),
        (email, phone, cpf) => {
            // Only reachable if a rule and its value object disagree.
            if email.is_err() {
                report.set(FormField::Email, FieldOutcome::invalid(INVALID_FORMAT));
            }
            if phone.is_err() {
                report.set(FormField::Phone, FieldOutcome::invalid(INVALID_FORMAT));
            }
            if cpf.is_err() {
                report.set(FormField::Cpf, FieldOutcome::invalid(CPF_INVALID));
            }
            Err(report)
        }
    }
}
