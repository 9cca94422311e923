//! MCP tool handlers for the collaborator form.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.
//! Every record operation runs through its own [`CollaboratorPage`], exactly as a
//! form instance would.

use crate::domain::is_valid_cpf;
use crate::error::FormError;
use crate::form::{CollaboratorPage, FormState, Navigator, Notifier};
use crate::format::{strip_digits, FieldMask};
use crate::metrics::Metrics;
use crate::models::FormValues;
use crate::repositories::CollaboratorRepository;
use crate::validation::{validate_form, FormField, ValidationReport};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server exposing collaborator validation, masking and records.
#[derive(Clone)]
pub struct CollaboratorMcpServer {
    repository: Arc<dyn CollaboratorRepository>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    metrics: Metrics,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for CollaboratorMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "collaborator-form".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Collaborator (employee) records - validates CPF and form fields, applies CPF/phone display masks, and creates or views records on the collaborator API.".into()),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CpfParams {
    cpf: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct FormatFieldParams {
    /// Either "cpf" or "phone"
    field: String,
    value: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CollaboratorFieldsParams {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    cpf: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    address: String,
}

impl From<CollaboratorFieldsParams> for FormValues {
    fn from(params: CollaboratorFieldsParams) -> Self {
        FormValues {
            name: params.name,
            email: params.email,
            cpf: params.cpf,
            phone: params.phone,
            address: params.address,
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CollaboratorIdParams {
    id: String,
}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn invalid_params(message: impl Into<String>, data: Option<serde_json::Value>) -> McpError {
    McpError {
        code: ErrorCode::INVALID_PARAMS,
        message: Cow::from(message.into()),
        data,
    }
}

fn report_json(report: &ValidationReport) -> serde_json::Value {
    let errors: serde_json::Map<String, serde_json::Value> = report
        .errors()
        .map(|(field, message)| (field.key().to_string(), message.into()))
        .collect();

    serde_json::json!({
        "valid": report.is_valid(),
        "errors": errors,
    })
}

fn form_error_to_mcp(e: FormError) -> McpError {
    match e {
        FormError::Invalid(report) => {
            invalid_params("Collaborator failed validation", Some(report_json(&report)))
        }
        FormError::Route(e) => invalid_params(e.to_string(), None),
        FormError::Submit(api) => to_mcp_error(api.user_message()),
        other => to_mcp_error(other),
    }
}

fn exceeds_input_cap(field: FormField, values: &FormValues) -> bool {
    field
        .input_max_len()
        .map_or(false, |max| field.value_in(values).chars().count() > max)
}

fn json_result(value: &serde_json::Value) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(value).map_err(to_mcp_error)?,
    )]))
}

// Tool router implementation
#[tool_router]
impl CollaboratorMcpServer {
    /// Create a new collaborator MCP server.
    pub fn new(
        repository: Arc<dyn CollaboratorRepository>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            repository,
            notifier,
            navigator,
            metrics: Metrics::new(),
            tool_router: Self::tool_router(),
        }
    }

    /// Count page outcomes into a shared counter set.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn page(&self) -> CollaboratorPage {
        CollaboratorPage::new(
            self.repository.clone(),
            self.notifier.clone(),
            self.navigator.clone(),
        )
        .with_metrics(self.metrics.clone())
    }

    /// Check a CPF's check digits.
    #[tool(
        description = "Validate a Brazilian CPF (masked or raw digits) using its check-digit algorithm. Returns whether it is valid and its masked form."
    )]
    async fn validate_cpf(&self, params: Parameters<CpfParams>) -> Result<CallToolResult, McpError> {
        let params = params.0;

        json_result(&serde_json::json!({
            "cpf": params.cpf,
            "valid": is_valid_cpf(&params.cpf),
            "digits": strip_digits(&params.cpf),
            "formatted": FieldMask::Cpf.apply(&params.cpf),
        }))
    }

    /// Apply a CPF or phone display mask.
    #[tool(
        description = "Format a CPF (DDD.DDD.DDD-DD) or phone ((DD) D DDDD-DDDD) for display. Partial input gets a partial mask. Field must be \"cpf\" or \"phone\"."
    )]
    async fn format_field(
        &self,
        params: Parameters<FormatFieldParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let mask = match params.field.trim().to_lowercase().as_str() {
            "cpf" => FieldMask::Cpf,
            "phone" | "fone" => FieldMask::Phone,
            other => {
                return Err(invalid_params(
                    format!("Unknown field {:?}; expected \"cpf\" or \"phone\"", other),
                    None,
                ))
            }
        };

        json_result(&serde_json::json!({
            "field": params.field,
            "formatted": mask.apply(&params.value),
            "digits": mask.strip(&params.value),
        }))
    }

    /// Run the full form schema without submitting.
    #[tool(
        description = "Validate collaborator form fields (name, email, cpf, phone, address) and return every field's error message at once."
    )]
    async fn validate_collaborator(
        &self,
        params: Parameters<CollaboratorFieldsParams>,
    ) -> Result<CallToolResult, McpError> {
        let values: FormValues = params.0.into();
        let report = validate_form(&values);

        json_result(&report_json(&report))
    }

    /// Fetch a collaborator for read-only display.
    #[tool(description = "Retrieve a collaborator by numeric id, with CPF and phone masked for display")]
    async fn get_collaborator(
        &self,
        params: Parameters<CollaboratorIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let page = self.page();

        page.open_params(Some(&params.id), Some("view"))
            .await
            .map_err(form_error_to_mcp)?;

        let record = match page.state() {
            FormState::View(record) => record,
            other => return Err(to_mcp_error(format!("Unexpected form state: {}", other.name()))),
        };

        json_result(&serde_json::json!({
            "record": record,
            "display": page.values(),
        }))
    }

    /// Validate and create a collaborator.
    #[tool(
        description = "Create a collaborator. Fields are validated first; CPF and phone are sent to the API as plain numbers."
    )]
    async fn create_collaborator(
        &self,
        params: Parameters<CollaboratorFieldsParams>,
    ) -> Result<CallToolResult, McpError> {
        let values: FormValues = params.0.into();
        let page = self.page();

        tracing::info!("MCP Handler: create_collaborator called");

        // Masks and input caps trim keystrokes; tool input must arrive intact
        let report = validate_form(&values);
        if !report.is_valid() {
            return Err(form_error_to_mcp(FormError::Invalid(report)));
        }
        if let Some(field) = FormField::ALL.into_iter().find(|f| exceeds_input_cap(*f, &values)) {
            return Err(invalid_params(
                format!("Field {} exceeds its input limit", field.key()),
                None,
            ));
        }

        for field in FormField::ALL {
            page.set_field(field, field.value_in(&values))
                .map_err(form_error_to_mcp)?;
        }

        let created = page.submit().await.map_err(|e| {
            tracing::error!("Failed to create collaborator: {:?}", e);
            form_error_to_mcp(e)
        })?;

        tracing::info!("Collaborator created: id={:?}", created.id);
        json_result(&serde_json::json!({
            "record": created,
            "cpf": created.cpf_display(),
            "phone": created.phone_display(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CollaboratorId;
    use crate::error::{ApiError, ApiResult};
    use crate::form::{TracingNavigator, TracingNotifier};
    use crate::metrics::FormEvent;
    use crate::models::{Collaborator, NewCollaborator};
    use async_trait::async_trait;

    struct EchoRepository;

    #[async_trait]
    impl CollaboratorRepository for EchoRepository {
        async fn get(&self, id: CollaboratorId) -> ApiResult<Collaborator> {
            if id.get() != 7 {
                return Err(ApiError::NotFound(id.to_string()));
            }
            Ok(Collaborator {
                id: Some(id),
                name: "Bruno Costa".to_string(),
                email: "bruno@ex.com".to_string(),
                cpf: 52998224725,
                phone: 11987654321,
                address: "Rua Teste 123".to_string(),
            })
        }

        async fn create(&self, record: &NewCollaborator) -> ApiResult<Collaborator> {
            Ok(record.to_collaborator())
        }
    }

    fn server() -> CollaboratorMcpServer {
        CollaboratorMcpServer::new(
            Arc::new(EchoRepository),
            Arc::new(TracingNotifier),
            Arc::new(TracingNavigator),
        )
    }

    fn fields(cpf: &str) -> CollaboratorFieldsParams {
        CollaboratorFieldsParams {
            name: "Ana Silva".to_string(),
            email: "ana@ex.com".to_string(),
            cpf: cpf.to_string(),
            phone: "11987654321".to_string(),
            address: "Rua Teste 123".to_string(),
        }
    }

    #[test]
    fn test_report_json() {
        let mut values: FormValues = fields("529.982.247-26").into();
        values.address.clear();
        let json = report_json(&validate_form(&values));

        assert_eq!(json["valid"], false);
        assert_eq!(json["errors"]["cpf"], "CPF Inválido");
        assert_eq!(json["errors"]["address"], "Campo Obrigatório");
        assert!(json["errors"].get("name").is_none());
    }

    #[tokio::test]
    async fn test_format_field_rejects_unknown_field() {
        let err = server()
            .format_field(Parameters(FormatFieldParams {
                field: "email".to_string(),
                value: "x".to_string(),
            }))
            .await
            .unwrap_err();
        assert_eq!(err.code.0, ErrorCode::INVALID_PARAMS.0);
    }

    #[tokio::test]
    async fn test_simple_tools_succeed() {
        let server = server();
        assert!(server
            .validate_cpf(Parameters(CpfParams {
                cpf: "529.982.247-25".to_string()
            }))
            .await
            .is_ok());
        assert!(server
            .format_field(Parameters(FormatFieldParams {
                field: "Fone".to_string(),
                value: "11987654321".to_string(),
            }))
            .await
            .is_ok());
        assert!(server
            .validate_collaborator(Parameters(fields("")))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_create_collaborator_reports_invalid_fields() {
        let err = server()
            .create_collaborator(Parameters(fields("529.982.247-26")))
            .await
            .unwrap_err();

        assert_eq!(err.code.0, ErrorCode::INVALID_PARAMS.0);
        let data = err.data.expect("validation errors are attached");
        assert_eq!(data["errors"]["cpf"], "CPF Inválido");
    }

    #[tokio::test]
    async fn test_create_collaborator_succeeds() {
        let server = server();
        assert!(server
            .create_collaborator(Parameters(fields("529.982.247-25")))
            .await
            .is_ok());
        assert_eq!(server.metrics().count(FormEvent::Created), 1);
    }

    #[tokio::test]
    async fn test_create_collaborator_rejects_extra_digits() {
        let server = server();
        let mut params = fields("529.982.247-2599");
        params.phone = "1198765432177".to_string();

        let err = server
            .create_collaborator(Parameters(params))
            .await
            .unwrap_err();

        assert_eq!(err.code.0, ErrorCode::INVALID_PARAMS.0);
        let data = err.data.expect("validation errors are attached");
        assert_eq!(data["errors"]["cpf"], "Preencha o CPF corretamente.");
        assert_eq!(data["errors"]["phone"], "Preencha o telefone corretamente.");
        assert_eq!(server.metrics().count(FormEvent::Created), 0);
    }

    #[tokio::test]
    async fn test_create_collaborator_rejects_input_over_cap() {
        let server = server();
        let mut params = fields("529.982.247-25");
        params.email = format!("{}@ex.com", "a".repeat(130));

        let err = server
            .create_collaborator(Parameters(params))
            .await
            .unwrap_err();

        assert_eq!(err.code.0, ErrorCode::INVALID_PARAMS.0);
        assert!(err.message.contains("email"));
        assert_eq!(server.metrics().count(FormEvent::Created), 0);
    }

    #[tokio::test]
    async fn test_get_collaborator_errors() {
        let server = server();

        let bad_id = server
            .get_collaborator(Parameters(CollaboratorIdParams {
                id: "abc".to_string(),
            }))
            .await
            .unwrap_err();
        assert_eq!(bad_id.code.0, ErrorCode::INVALID_PARAMS.0);

        let missing = server
            .get_collaborator(Parameters(CollaboratorIdParams {
                id: "8".to_string(),
            }))
            .await
            .unwrap_err();
        assert_eq!(missing.code.0, ErrorCode::INTERNAL_ERROR.0);

        assert!(server
            .get_collaborator(Parameters(CollaboratorIdParams {
                id: "7".to_string(),
            }))
            .await
            .is_ok());
    }
}
