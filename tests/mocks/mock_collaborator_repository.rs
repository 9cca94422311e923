use async_trait::async_trait;
use collaborator_form::domain::CollaboratorId;
use collaborator_form::error::{ApiError, ApiResult};
use collaborator_form::models::{Collaborator, NewCollaborator};
use collaborator_form::repositories::CollaboratorRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Mock collaborator repository for testing.
///
/// In-memory implementation of CollaboratorRepository that records every
/// create request and can hold calls open or fail them on demand.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockCollaboratorRepository {
    collaborators: Arc<Mutex<HashMap<u64, Collaborator>>>,
    created: Arc<Mutex<Vec<NewCollaborator>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    next_id: Arc<Mutex<u64>>,
    create_failure: Arc<Mutex<Option<String>>>,
    get_failure: Arc<Mutex<bool>>,
    gate: Arc<Mutex<Option<Arc<Notify>>>>,
}

#[allow(dead_code)]
impl MockCollaboratorRepository {
    /// Create a new empty MockCollaboratorRepository.
    pub fn new() -> Self {
        Self {
            collaborators: Arc::new(Mutex::new(HashMap::new())),
            created: Arc::new(Mutex::new(Vec::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(Mutex::new(1)),
            create_failure: Arc::new(Mutex::new(None)),
            get_failure: Arc::new(Mutex::new(false)),
            gate: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a stored collaborator; it must carry an id.
    pub fn add_collaborator(&self, collaborator: Collaborator) {
        let id = collaborator.id.expect("stored collaborators need an id").get();
        self.collaborators.lock().unwrap().insert(id, collaborator);
    }

    /// Every record passed to `create`, in call order.
    pub fn created(&self) -> Vec<NewCollaborator> {
        self.created.lock().unwrap().clone()
    }

    /// Make every `create` fail with a validation error carrying `message`.
    pub fn fail_creates_with(&self, message: &str) {
        *self.create_failure.lock().unwrap() = Some(message.to_string());
    }

    /// Make every `get` fail with a server error.
    pub fn fail_gets(&self) {
        *self.get_failure.lock().unwrap() = true;
    }

    /// Hold calls open until the returned handle is notified.
    pub fn hold_calls(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(notify.clone());
        notify
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    async fn wait_for_gate(&self) {
        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

impl Default for MockCollaboratorRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CollaboratorRepository for MockCollaboratorRepository {
    async fn get(&self, id: CollaboratorId) -> ApiResult<Collaborator> {
        self.track_call("get");
        self.wait_for_gate().await;

        if *self.get_failure.lock().unwrap() {
            return Err(ApiError::ApiError {
                status: 500,
                message: "Internal Server Error".to_string(),
            });
        }

        let collaborators = self.collaborators.lock().unwrap();
        collaborators
            .get(&id.get())
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Collaborator {} not found", id)))
    }

    async fn create(&self, record: &NewCollaborator) -> ApiResult<Collaborator> {
        self.track_call("create");
        self.created.lock().unwrap().push(record.clone());
        self.wait_for_gate().await;

        if let Some(message) = self.create_failure.lock().unwrap().clone() {
            return Err(ApiError::Validation { message });
        }

        let mut next_id = self.next_id.lock().unwrap();
        let mut collaborator = record.to_collaborator();
        collaborator.id = Some(CollaboratorId::new(*next_id).unwrap());
        *next_id += 1;

        self.collaborators
            .lock()
            .unwrap()
            .insert(collaborator.id.unwrap().get(), collaborator.clone());
        Ok(collaborator)
    }
}
