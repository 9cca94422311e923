//! Data models for collaborator records.
//!
//! Wire shapes for the remote collaborator API and the raw form state the
//! page edits before submission.

pub mod collaborator;

pub use collaborator::{Collaborator, FormValues, NewCollaborator};
