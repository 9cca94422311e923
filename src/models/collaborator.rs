//! Collaborator record shapes exchanged with the remote API.

use crate::domain::{CollaboratorId, Cpf, EmailAddress, PhoneNumber};
use crate::format::{format_cpf, format_phone};
use serde::{Deserialize, Serialize};

/// A collaborator as returned by the remote API.
///
/// Numeric fields are kept as the API sends them so a legacy record with a
/// malformed CPF can still be displayed read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    /// Record identifier (absent in some create responses)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CollaboratorId>,

    /// Full name
    #[serde(rename = "nome")]
    pub name: String,

    /// Email address
    pub email: String,

    /// CPF as a number (leading zeros lost in transit)
    pub cpf: u64,

    /// Phone as a number
    #[serde(rename = "fone")]
    pub phone: u64,

    /// Postal address
    pub address: String,
}

impl Collaborator {
    /// CPF in display form, with leading zeros restored.
    pub fn cpf_display(&self) -> String {
        format_cpf(&format!("{:011}", self.cpf))
    }

    /// Phone in display form.
    pub fn phone_display(&self) -> String {
        if self.phone == 0 {
            return String::new();
        }
        format_phone(&self.phone.to_string())
    }
}

/// A validated record ready to be sent to `create`.
///
/// Serializes to the API's shape: `{nome, email, fone, address, cpf}` with
/// `fone` and `cpf` as plain numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCollaborator {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: EmailAddress,
    #[serde(rename = "fone")]
    pub phone: PhoneNumber,
    pub address: String,
    pub cpf: Cpf,
}

impl NewCollaborator {
    /// The record the API is expected to echo back, without an id.
    pub fn to_collaborator(&self) -> Collaborator {
        Collaborator {
            id: None,
            name: self.name.clone(),
            email: self.email.as_str().to_string(),
            cpf: self.cpf.as_number(),
            phone: self.phone.as_number(),
            address: self.address.clone(),
        }
    }
}

/// Raw form state: the five fields exactly as typed (masked for CPF/phone).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub phone: String,
    pub address: String,
}

impl FormValues {
    /// Populate the form from a fetched record, masked for display.
    pub fn from_collaborator(collaborator: &Collaborator) -> Self {
        Self {
            name: collaborator.name.clone(),
            email: collaborator.email.clone(),
            cpf: collaborator.cpf_display(),
            phone: collaborator.phone_display(),
            address: collaborator.address.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_new() -> NewCollaborator {
        NewCollaborator {
            name: "Ana Silva".to_string(),
            email: EmailAddress::new("ana@ex.com").unwrap(),
            phone: PhoneNumber::new("11987654321").unwrap(),
            address: "Rua Teste 123".to_string(),
            cpf: Cpf::new("529.982.247-25").unwrap(),
        }
    }

    #[test]
    fn test_new_collaborator_wire_shape() {
        let json = serde_json::to_value(sample_new()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "nome": "Ana Silva",
                "email": "ana@ex.com",
                "fone": 11987654321u64,
                "address": "Rua Teste 123",
                "cpf": 52998224725u64,
            })
        );
    }

    #[test]
    fn test_collaborator_deserialize() {
        let collaborator: Collaborator = serde_json::from_str(
            r#"{"id": 3, "nome": "Ana Silva", "email": "ana@ex.com",
                "cpf": 1234567890, "fone": 11987654321, "address": "Rua Teste 123"}"#,
        )
        .unwrap();

        assert_eq!(collaborator.id.map(|id| id.get()), Some(3));
        assert_eq!(collaborator.name, "Ana Silva");
        assert_eq!(collaborator.cpf_display(), "012.345.678-90");
        assert_eq!(collaborator.phone_display(), "(11) 9 8765-4321");
    }

    #[test]
    fn test_form_values_from_collaborator() {
        let values = FormValues::from_collaborator(&sample_new().to_collaborator());
        assert_eq!(values.cpf, "529.982.247-25");
        assert_eq!(values.phone, "(11) 9 8765-4321");
        assert_eq!(values.address, "Rua Teste 123");
    }
}
