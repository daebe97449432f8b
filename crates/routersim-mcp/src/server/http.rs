// ── HTTP transport ──
//
// REST-style routes mirroring the three request kinds, plus `/mcp` for
// single JSON-RPC requests. Adapter errors map to 400 with a `detail`
// message; engine rejections are ordinary 200 tool results.

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use super::rpc;
use crate::error::AdapterError;
use crate::{PromptDef, PromptResult, ResourceDef, RouterService, ToolDef};

impl IntoResponse for AdapterError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            error!(error = %self, "internal adapter error");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

/// Build the application router.
pub fn router(service: RouterService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/tools", get(list_tools))
        .route("/tools/:name", post(call_tool))
        .route("/resources", get(list_resources))
        .route("/resources/:name", get(read_resource))
        .route("/prompts", get(list_prompts))
        .route("/prompts/:name", post(get_prompt))
        .route("/mcp", post(mcp))
        .layer(CorsLayer::permissive())
        .with_state(service)
}

/// Bind and serve until Ctrl-C.
pub async fn serve_http(service: RouterService, addr: SocketAddr) -> Result<(), AdapterError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "HTTP server listening");
    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for Ctrl-C");
    }
}

// ── Handlers ────────────────────────────────────────────────────────

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_tools(State(service): State<RouterService>) -> Json<Vec<ToolDef>> {
    Json(service.list_tools())
}

async fn call_tool(
    State(service): State<RouterService>,
    Path(name): Path<String>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, AdapterError> {
    let arguments = body.map_or(Value::Null, |Json(v)| v);
    service.call_tool(&name, arguments).map(Json)
}

async fn list_resources(State(service): State<RouterService>) -> Json<Vec<ResourceDef>> {
    Json(service.list_resources())
}

async fn read_resource(
    State(service): State<RouterService>,
    Path(name): Path<String>,
) -> Result<Json<Value>, AdapterError> {
    service
        .read_resource(&name)
        .map(|content| Json(content.into_json()))
}

async fn list_prompts(State(service): State<RouterService>) -> Json<Vec<PromptDef>> {
    Json(service.list_prompts())
}

async fn get_prompt(
    State(service): State<RouterService>,
    Path(name): Path<String>,
    body: Option<Json<HashMap<String, String>>>,
) -> Result<Json<PromptResult>, AdapterError> {
    let arguments = body.map(|Json(args)| args).unwrap_or_default();
    let prompt = service.get_prompt(&name, &arguments)?;
    Ok(Json(prompt))
}

/// Malformed bodies get a JSON-RPC parse error, same as stdio.
async fn mcp(State(service): State<RouterService>, body: String) -> Response {
    match rpc::handle_message(&service, body.trim()) {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
