//! Domain value objects and types.
//!
//! Type-safe wrappers for the structured fields of a collaborator record.
//! Each value object validates at construction time, so a `Cpf` or an
//! `EmailAddress` that exists is known to be well formed.

pub mod collaborator_id;
pub mod cpf;
pub mod email;
pub mod errors;
pub mod phone;

pub use collaborator_id::CollaboratorId;
pub use cpf::{check_digits, is_valid_cpf, Cpf};
pub use email::EmailAddress;
pub use errors::ValidationError;
pub use phone::PhoneNumber;
