//! Axum router for the action endpoint.
//! Routes: `GET|POST <path>` (info / dispatch), `GET /health`, `GET /health/ready`.
//! Every other verb on `<path>`, `HEAD` included, gets `405`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::debug;

use krushi_mcp::{ActionRegistry, DispatchError};
use krushi_protocol::{
    messages, ActionError, ActionRequest, ActionResult, HEALTH_PATH, MCP_PATH, READY_PATH,
    SERVER_NAME,
};

use crate::auth;

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// The action registry.
    pub registry: Arc<ActionRegistry>,
    /// Optional Bearer token (None = no authentication required).
    pub token: Option<String>,
}

impl AppState {
    /// Creates state for `registry` with authentication disabled.
    pub fn new(registry: Arc<ActionRegistry>) -> Self {
        Self {
            registry,
            token: None,
        }
    }

    /// Sets the Bearer token callers must present. An empty token leaves
    /// authentication disabled.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }
}

/// Builds the router with the endpoint at [`MCP_PATH`].
pub fn build_router(state: AppState) -> Router {
    build_router_at(MCP_PATH, state)
}

/// Builds the router with the endpoint at `path`.
///
/// Verbs other than `GET` and `POST` on `path` get `405`.
///
/// # Panics
///
/// Panics if `path` fails [`krushi_protocol::check_endpoint_path`].
/// [`HttpServer`](crate::HttpServer) checks the path before calling this.
pub fn build_router_at(path: &str, state: AppState) -> Router {
    Router::new()
        .route(
            path,
            get(handle_info)
                .post(handle_dispatch)
                .head(method_not_allowed),
        )
        .route(HEALTH_PATH, get(handle_health))
        .route(READY_PATH, get(handle_ready))
        .with_state(state)
}

/// `get` would otherwise answer `HEAD` too.
async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "GET,POST")],
    )
}

async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok", "service": SERVER_NAME}))
}

/// Readiness check with the action count and dispatch counters.
async fn handle_ready(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ready",
        "service": SERVER_NAME,
        "actions": state.registry.len(),
        "dispatch": state.registry.metrics().snapshot(),
    }))
}

async fn handle_info(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(state.registry.server_info()).into_response()
}

async fn handle_dispatch(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }

    let Some(request) = parse_request(&body) else {
        return error_response(StatusCode::BAD_REQUEST, ActionError::new(messages::INVALID_BODY));
    };
    let Some(action) = request.action_name() else {
        return error_response(
            StatusCode::BAD_REQUEST,
            ActionError::new(messages::ACTION_REQUIRED),
        );
    };

    match state.registry.invoke(action, request.payload()).await {
        Ok(result) => {
            debug!(action, "dispatch ok");
            Json(ActionResult { result }).into_response()
        }
        Err(DispatchError::UnknownAction { name }) => {
            debug!(action = %name, "unknown action");
            error_response(
                StatusCode::BAD_REQUEST,
                ActionError::new(messages::unknown_action(&name)),
            )
        }
        Err(err) => {
            let details = err.details();
            debug!(action, error = %err, "responding with internal error");
            let mut body = ActionError::new(messages::INTERNAL_ERROR);
            if let Some(details) = details {
                body = body.with_details(details);
            }
            error_response(StatusCode::INTERNAL_SERVER_ERROR, body)
        }
    }
}

/// Parses the body as a JSON object carrying the request envelope.
fn parse_request(body: &str) -> Option<ActionRequest> {
    match serde_json::from_str::<Value>(body) {
        Ok(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
        _ => None,
    }
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), Response> {
    match state.token.as_deref() {
        Some(token) => auth::validate_bearer(headers, token).map_err(|status| {
            error_response(status, ActionError::new(messages::UNAUTHORIZED))
        }),
        None => Ok(()),
    }
}

fn error_response(status: StatusCode, body: ActionError) -> Response {
    (status, Json(body)).into_response()
}
