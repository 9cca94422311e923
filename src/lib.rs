//! Collaborator Form - validation, masking and form core for collaborator
//! (employee) records, with an MCP server on top.
//!
//! The form creates and views records holding a name, email, phone, CPF
//! (Brazilian taxpayer id) and address. Records live on a remote HTTP API.
//!
//! # Architecture
//!
//! - **domain**: Value objects (`Cpf`, `PhoneNumber`, `EmailAddress`, `CollaboratorId`)
//!   and the CPF check-digit algorithm
//! - **format**: CPF and phone display masks
//! - **validation**: Per-field rule table and the form validation runner
//! - **models**: Wire shapes for the collaborator API and raw form state
//! - **form**: The form container (state machine, submit guard, teardown)
//! - **client**: HTTP client for the collaborator API
//! - **repositories**: Record access behind a trait
//! - **metrics**: Form outcome and HTTP counters
//! - **config**: Configuration from environment variables
//! - **server**: MCP protocol server

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod form;
pub mod format;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod server;
pub mod validation;

pub use client::CollaboratorClient;
pub use config::Config;
pub use domain::{is_valid_cpf, Cpf, EmailAddress, PhoneNumber};
pub use error::{ApiError, ConfigError, FormError};
pub use form::{CollaboratorPage, FormRoute, FormState};
pub use format::{format_cpf, format_phone, strip_digits};
pub use metrics::{FormEvent, Metrics, MetricsSummary};
pub use models::{Collaborator, FormValues, NewCollaborator};
pub use server::CollaboratorMcpServer;
pub use validation::{validate_form, FieldOutcome, FormField, ValidationReport};
