//! HTTP Handlers

use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};

use agent_core::{AgentError, CallerContext, ToolCall, ToolResult, ToolSchema};

use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";
pub const AGENT_ID_HEADER: &str = "x-agent-id";

type ApiError = (StatusCode, Json<ErrorResponse>);

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: String,
    pub tools: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Tool input: the tool's arguments plus an optional call id
#[derive(Debug, Deserialize)]
pub struct InvokeRequest {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(flatten)]
    pub arguments: HashMap<String, serde_json::Value>,
}

fn error_response(status: StatusCode, error: impl Into<String>, code: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

fn status_for(err: &AgentError) -> StatusCode {
    match err {
        AgentError::ToolNotFound(_) => StatusCode::NOT_FOUND,
        AgentError::ToolValidation(_) => StatusCode::BAD_REQUEST,
        AgentError::InsufficientData { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        AgentError::Provider(_) => StatusCode::BAD_GATEWAY,
        AgentError::ProviderUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        AgentError::Auth(_) => StatusCode::UNAUTHORIZED,
        AgentError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn api_error(err: &AgentError) -> ApiError {
    error_response(status_for(err), err.user_message(), err.code())
}

// ============================================================================
// Middleware
// ============================================================================

/// Reject callers without the platform key (when one is configured).
///
/// Runs as a route layer, ahead of every extractor, so an unauthenticated
/// call never reaches body parsing.
pub async fn require_platform_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.platform_api_key.as_deref() else {
        return Ok(next.run(request).await);
    };

    let rejection = match request.headers().get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) {
        Some(key) if key == expected => None,
        Some(_) => Some("invalid platform API key"),
        None => Some("missing platform API key"),
    };

    match rejection {
        None => Ok(next.run(request).await),
        Some(reason) => {
            tracing::warn!(path = %request.uri().path(), reason, "Rejected platform call");
            Err(api_error(&AgentError::Auth(reason.into())))
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.provider_name.to_string(),
        tools: state.tools.len(),
    })
}

/// Published tool definitions, including per-call prices
pub async fn list_tools(State(state): State<AppState>) -> Json<Vec<ToolSchema>> {
    Json(state.tools.schemas())
}

/// Invoke one tool
pub async fn invoke_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<InvokeRequest>, JsonRejection>,
) -> Result<Json<ToolResult>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::warn!(tool = %name, "Unreadable tool input: {}", rejection.body_text());
        api_error(&AgentError::ToolValidation(rejection.body_text()))
    })?;

    let caller = headers
        .get(AGENT_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(CallerContext::agent)
        .unwrap_or_default();

    let call = ToolCall {
        name,
        arguments: payload.arguments,
        id: Some(payload.id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string())),
        caller,
    };

    let result = state.tools.execute(&call).await.map_err(|e| {
        let status = status_for(&e);
        if status.is_server_error() {
            tracing::error!(tool = %call.name, agent = call.caller.agent_label(), "Tool error: {}", e);
        } else {
            tracing::warn!(tool = %call.name, agent = call.caller.agent_label(), "Tool call rejected: {}", e);
        }
        api_error(&e)
    })?;

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&AgentError::ToolNotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(
            status_for(&AgentError::InsufficientData { needed: 10, available: 2 }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(status_for(&AgentError::Provider("x".into())), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status_for(&AgentError::Config("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(status_for(&AgentError::Auth("x".into())), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_invoke_request_collects_arguments() {
        let req: InvokeRequest =
            serde_json::from_str(r#"{"location": "Austin", "id": "abc"}"#).unwrap();
        assert_eq!(req.id.as_deref(), Some("abc"));
        assert_eq!(req.arguments.get("location").and_then(|v| v.as_str()), Some("Austin"));
        assert!(!req.arguments.contains_key("id"));
    }
}
