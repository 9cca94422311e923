//! HTTP client for the remote collaborator API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client handles error mapping and the
//! response envelopes the API may use.

mod async_wrapper;
pub use async_wrapper::{AsyncCollaboratorClient, AsyncCollaboratorClientImpl};

use crate::config::Config;
use crate::domain::CollaboratorId;
use crate::error::{ApiError, ApiResult};
use crate::metrics::Metrics;
use crate::models::{Collaborator, NewCollaborator};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// Path of the collaborator collection on the API.
pub const COLLABORATORS_PATH: &str = "/funcionarios";

/// Some deployments wrap single records as `{"data": {...}}`.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// Error body shape: `{"message": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP client for the collaborator API.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct CollaboratorClient {
    /// Base URL for the API
    base_url: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl CollaboratorClient {
    /// Create a new CollaboratorClient from configuration.
    pub fn new(config: &Config) -> Self {
        Self::build(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout),
        )
    }

    /// Create a CollaboratorClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        Self::build(base_url, Duration::from_secs(10))
    }

    fn build(base_url: String, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            base_url,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Report into an existing counter set instead of a private one.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Execute a GET request.
    fn get(&self, path: &str) -> ApiResult<ureq::Response> {
        let url = self.build_url(path);

        tracing::debug!("GET {}", url);

        let result = self.metrics.observe_http(|| {
            self.agent
                .get(&url)
                .set("Accept", "application/json")
                .call()
                .map_err(Self::map_error)
        });

        if let Err(e) = &result {
            tracing::warn!("GET {} - Error: {:?}", url, e);
        }

        result
    }

    /// Execute a POST request with a JSON body.
    fn post(&self, path: &str, body: &serde_json::Value) -> ApiResult<ureq::Response> {
        let url = self.build_url(path);

        tracing::debug!("POST {}", url);
        tracing::debug!(
            "Request body: {}",
            serde_json::to_string_pretty(body).unwrap_or_else(|_| "<invalid json>".to_string())
        );

        let result = self.metrics.observe_http(|| {
            self.agent
                .post(&url)
                .set("Content-Type", "application/json")
                .set("Accept", "application/json")
                .send_json(body)
                .map_err(Self::map_error)
        });

        match &result {
            Ok(response) => {
                tracing::debug!("POST {} - Success (status: {})", url, response.status())
            }
            Err(e) => tracing::error!("POST {} - Error: {:?}", url, e),
        }

        result
    }

    /// Pull the `message` out of an error body, falling back to the raw text.
    fn extract_message(body: &str) -> String {
        serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.message)
            .unwrap_or_else(|_| body.trim().to_string())
    }

    /// Map a ureq error to an ApiError.
    fn map_error(error: ureq::Error) -> ApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let body = response.into_string().unwrap_or_default();
                let message = Self::extract_message(&body);

                match code {
                    404 => ApiError::NotFound(message),
                    400 | 422 => ApiError::Validation { message },
                    _ => ApiError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    ApiError::HttpError("Connection failed".to_string())
                } else if Self::is_timeout(&transport) {
                    ApiError::Timeout
                } else {
                    ApiError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Whether a transport failure was the request deadline expiring.
    fn is_timeout(transport: &ureq::Transport) -> bool {
        transport.kind() == ureq::ErrorKind::Io
            && std::error::Error::source(transport)
                .and_then(|source| source.downcast_ref::<io::Error>())
                .map_or(false, |e| Self::is_timeout_kind(e.kind()))
    }

    fn is_timeout_kind(kind: io::ErrorKind) -> bool {
        matches!(kind, io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
    }

    /// Parse a record that may or may not be wrapped in a `data` envelope.
    fn parse_record<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
        match serde_json::from_str::<T>(body) {
            Ok(record) => Ok(record),
            Err(direct) => serde_json::from_str::<DataEnvelope<T>>(body)
                .map(|envelope| envelope.data)
                .map_err(|_| ApiError::JsonError(direct)),
        }
    }

    /// Fetch a single collaborator by id.
    pub fn get_collaborator(&self, id: CollaboratorId) -> ApiResult<Collaborator> {
        let path = format!("{}/{}", COLLABORATORS_PATH, id);
        let response = self.get(&path)?;
        let body = response
            .into_string()
            .map_err(|e| ApiError::HttpError(e.to_string()))?;

        Self::parse_record(&body)
    }

    /// Create a new collaborator.
    ///
    /// An empty or unrecognized success body is not an error: the record
    /// was accepted, so the submitted data is echoed back without an id.
    pub fn create_collaborator(&self, record: &NewCollaborator) -> ApiResult<Collaborator> {
        let body = serde_json::to_value(record).map_err(ApiError::JsonError)?;

        let response = self.post(COLLABORATORS_PATH, &body)?;
        let response_body = response
            .into_string()
            .map_err(|e| ApiError::HttpError(e.to_string()))?;

        if response_body.trim().is_empty() {
            return Ok(record.to_collaborator());
        }

        match Self::parse_record::<Collaborator>(&response_body) {
            Ok(created) => Ok(created),
            Err(e) => {
                tracing::warn!("Unrecognized create response, echoing request: {}", e);
                Ok(record.to_collaborator())
            }
        }
    }
}
