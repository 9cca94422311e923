use crate::domain::CollaboratorId;
use crate::error::ApiResult;
use crate::models::{Collaborator, NewCollaborator};
use async_trait::async_trait;

/// Repository for collaborator records.
///
/// Abstracts the remote record API so the form can run against the HTTP
/// client or an in-memory implementation. Records are create-and-read only.
#[async_trait]
pub trait CollaboratorRepository: Send + Sync {
    /// Retrieve a single collaborator by id.
    async fn get(&self, id: CollaboratorId) -> ApiResult<Collaborator>;

    /// Create a new collaborator.
    async fn create(&self, record: &NewCollaborator) -> ApiResult<Collaborator>;
}
