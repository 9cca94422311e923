//! Page routing and the form container's state.

use crate::domain::{CollaboratorId, ValidationError};
use crate::models::Collaborator;

/// Which record, if any, the page was opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRoute {
    /// Blank form for creating a collaborator
    New,
    /// Read-only view of an existing collaborator
    View(CollaboratorId),
}

impl FormRoute {
    /// Interpret the `id` and `mode` route parameters.
    ///
    /// Only `mode == "view"` selects view mode, and then the id must parse.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidId` for a view route without a usable id.
    pub fn from_params(id: Option<&str>, mode: Option<&str>) -> Result<Self, ValidationError> {
        if mode != Some("view") {
            return Ok(FormRoute::New);
        }
        id.unwrap_or_default().parse().map(FormRoute::View)
    }
}

/// Lifecycle of the form container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    /// Empty, editable, submit allowed
    New,
    /// Fetching a record by id
    Loading,
    /// Populated and read-only
    View(Collaborator),
    /// Fetch failed; carries the page-level message
    Error(String),
}

impl FormState {
    pub fn is_editable(&self) -> bool {
        matches!(self, FormState::New)
    }

    pub fn name(&self) -> &'static str {
        match self {
            FormState::New => "new",
            FormState::Loading => "loading",
            FormState::View(_) => "view",
            FormState::Error(_) => "error",
        }
    }
}
