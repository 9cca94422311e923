use crate::client::AsyncCollaboratorClient;
use crate::domain::CollaboratorId;
use crate::error::ApiResult;
use crate::models::{Collaborator, NewCollaborator};
use crate::repositories::traits::CollaboratorRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Collaborator repository backed by the remote API client.
///
/// This repository delegates all operations to the AsyncCollaboratorClient,
/// keeping the form independent of the HTTP layer.
pub struct ApiCollaboratorRepository {
    client: Arc<dyn AsyncCollaboratorClient>,
}

impl ApiCollaboratorRepository {
    /// Create a new ApiCollaboratorRepository with the given client.
    pub fn new(client: Arc<dyn AsyncCollaboratorClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CollaboratorRepository for ApiCollaboratorRepository {
    async fn get(&self, id: CollaboratorId) -> ApiResult<Collaborator> {
        self.client.get_collaborator(id).await
    }

    async fn create(&self, record: &NewCollaborator) -> ApiResult<Collaborator> {
        self.client.create_collaborator(record).await
    }
}
