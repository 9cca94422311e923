//! Form fields and their presentation metadata.

use crate::format::FieldMask;
use crate::models::FormValues;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five collaborator form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Cpf,
    Email,
    Phone,
    Address,
}

impl FormField {
    /// Every field, in display order.
    pub const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Cpf,
        FormField::Email,
        FormField::Phone,
        FormField::Address,
    ];

    /// Field key as used in records and tool parameters.
    pub fn key(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Cpf => "cpf",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Address => "address",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Nome Completo",
            FormField::Cpf => "CPF",
            FormField::Email => "E-mail",
            FormField::Phone => "Telefone",
            FormField::Address => "Endereço",
        }
    }

    pub fn placeholder(self) -> String {
        match self {
            FormField::Name => "Nome".to_string(),
            FormField::Email => "exemplo@exemplo.com".to_string(),
            FormField::Address => "Endereço".to_string(),
            FormField::Cpf | FormField::Phone => self
                .mask()
                .map(FieldMask::placeholder)
                .unwrap_or_default(),
        }
    }

    /// Input cap enforced by the text box, independent of validation.
    pub fn input_max_len(self) -> Option<usize> {
        match self {
            FormField::Name => Some(80),
            FormField::Email => Some(128),
            _ => None,
        }
    }

    /// Display mask applied while typing.
    pub fn mask(self) -> Option<FieldMask> {
        match self {
            FormField::Cpf => Some(FieldMask::Cpf),
            FormField::Phone => Some(FieldMask::Phone),
            _ => None,
        }
    }

    /// Read this field out of the form state.
    pub fn value_in(self, values: &FormValues) -> &str {
        match self {
            FormField::Name => &values.name,
            FormField::Cpf => &values.cpf,
            FormField::Email => &values.email,
            FormField::Phone => &values.phone,
            FormField::Address => &values.address,
        }
    }

    /// Mutable access to this field in the form state.
    pub fn value_in_mut(self, values: &mut FormValues) -> &mut String {
        match self {
            FormField::Name => &mut values.name,
            FormField::Cpf => &mut values.cpf,
            FormField::Email => &mut values.email,
            FormField::Phone => &mut values.phone,
            FormField::Address => &mut values.address,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
