//! Form container for collaborator records.
//!
//! [`CollaboratorPage`] owns the in-memory form state and drives the two
//! remote operations, fetch-by-id for view mode and create on submit. The
//! record API, notifications and navigation are reached through traits so
//! the page stays independent of any UI toolkit.

mod page;
mod route;
mod sinks;

pub use page::{CollaboratorPage, CANCEL_LABEL, SUBMITTING_LABEL, SUBMIT_LABEL};
pub use route::{FormRoute, FormState};
pub use sinks::{Navigator, Notifier, Route, TracingNavigator, TracingNotifier, CREATED_MESSAGE};
