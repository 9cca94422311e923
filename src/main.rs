//! Collaborator Form - Main entry point
//!
//! Runs the collaborator MCP server over stdio, backed by the remote
//! collaborator API.

use anyhow::Result;
use collaborator_form::client::{AsyncCollaboratorClient, AsyncCollaboratorClientImpl};
use collaborator_form::form::{Navigator, Notifier, TracingNavigator, TracingNotifier};
use collaborator_form::repositories::{ApiCollaboratorRepository, CollaboratorRepository};
use collaborator_form::{CollaboratorClient, CollaboratorMcpServer, Config, Metrics};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration before logging so LOG_LEVEL can apply
    let config = Config::from_env();

    let default_level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());

    // Logging goes to stderr; stdout carries MCP traffic
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting collaborator form server with API URL: {}",
        config.api_base_url
    );

    // Client and pages report into one counter set
    let metrics = Metrics::new();
    let sync_client = CollaboratorClient::new(&config).with_metrics(metrics.clone());
    let client = Arc::new(AsyncCollaboratorClientImpl::new(sync_client))
        as Arc<dyn AsyncCollaboratorClient>;

    let repository =
        Arc::new(ApiCollaboratorRepository::new(client)) as Arc<dyn CollaboratorRepository>;

    let server = CollaboratorMcpServer::new(
        repository,
        Arc::new(TracingNotifier) as Arc<dyn Notifier>,
        Arc::new(TracingNavigator) as Arc<dyn Navigator>,
    )
    .with_metrics(metrics.clone());

    info!("Starting MCP server with stdio transport");
    collaborator_form::server::run_server(server).await?;

    info!("Shutdown: {}", metrics.summary());

    Ok(())
}
