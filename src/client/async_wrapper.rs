//! Async wrapper around synchronous CollaboratorClient.
//!
//! This module provides an async interface to the synchronous CollaboratorClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::CollaboratorClient;
use crate::domain::CollaboratorId;
use crate::error::{ApiError, ApiResult};
use crate::models::{Collaborator, NewCollaborator};
use async_trait::async_trait;
use std::sync::Arc;

/// Async collaborator API operations.
#[async_trait]
pub trait AsyncCollaboratorClient: Send + Sync {
    async fn get_collaborator(&self, id: CollaboratorId) -> ApiResult<Collaborator>;
    async fn create_collaborator(&self, record: &NewCollaborator) -> ApiResult<Collaborator>;
}

/// Async wrapper around synchronous CollaboratorClient.
///
/// Uses `tokio::task::spawn_blocking` to run synchronous HTTP
/// operations on a dedicated thread pool, preventing blocking
/// the async runtime.
#[derive(Clone)]
pub struct AsyncCollaboratorClientImpl {
    client: Arc<CollaboratorClient>,
}

impl AsyncCollaboratorClientImpl {
    pub fn new(client: CollaboratorClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Access the wrapped client, e.g. for its metrics.
    pub fn inner(&self) -> &CollaboratorClient {
        &self.client
    }
}

#[async_trait]
impl AsyncCollaboratorClient for AsyncCollaboratorClientImpl {
    async fn get_collaborator(&self, id: CollaboratorId) -> ApiResult<Collaborator> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.get_collaborator(id))
            .await
            .map_err(|e| ApiError::HttpError(format!("Task join error: {}", e)))?
    }

    async fn create_collaborator(&self, record: &NewCollaborator) -> ApiResult<Collaborator> {
        let client = self.client.clone();
        let record = record.clone();

        tokio::task::spawn_blocking(move || client.create_collaborator(&record))
            .await
            .map_err(|e| ApiError::HttpError(format!("Task join error: {}", e)))?
    }
}
