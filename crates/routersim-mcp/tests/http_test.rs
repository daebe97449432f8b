#![allow(clippy::unwrap_used)]

// HTTP routes exercised in-process through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use routersim_core::{EngineConfig, RouterEngine};
use routersim_mcp::RouterService;
use routersim_mcp::server::http::router;
use serde_json::{Value, json};
use tower::ServiceExt;

fn service() -> RouterService {
    RouterService::new(Arc::new(
        RouterEngine::new(EngineConfig::seeded(21)).unwrap(),
    ))
}

async fn send(service: &RouterService, req: Request<Body>) -> (StatusCode, Value) {
    let resp = router(service.clone()).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = send(&service(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn lists_catalogs() {
    let service = service();
    let (_, tools) = send(&service, get("/tools")).await;
    assert_eq!(tools.as_array().unwrap().len(), 11);
    let (_, resources) = send(&service, get("/resources")).await;
    assert_eq!(resources.as_array().unwrap().len(), 5);
    let (_, prompts) = send(&service, get("/prompts")).await;
    assert_eq!(prompts.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn tool_call_mutates_shared_engine() {
    let service = service();
    let (status, body) = send(
        &service,
        post_json("/tools/change_channel", &json!({ "channel": 11 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["new_channel"], 11);

    let (_, config) = send(&service, get("/resources/config")).await;
    assert_eq!(config["channel"], 11);
}

#[tokio::test]
async fn tool_without_body_uses_empty_arguments() {
    let service = service();
    let req = Request::builder()
        .method("POST")
        .uri("/tools/run_speed_test")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&service, req).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["download_mbps"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn engine_rejection_is_a_200_error_payload() {
    let (status, body) = send(
        &service(),
        post_json("/tools/set_frequency_band", &json!({ "band": "60GHz" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "error");
    assert_eq!(body["kind"], "validation");
}

#[tokio::test]
async fn unknown_names_are_400() {
    let service = service();
    let (status, body) = send(&service, post_json("/tools/self_destruct", &json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("self_destruct"));

    let (status, _) = send(&service, get("/resources/passwords")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&service, post_json("/prompts/haiku", &json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn logs_resource_is_a_json_string() {
    let (_, body) = send(&service(), get("/resources/logs")).await;
    let text = body.as_str().unwrap();
    assert_eq!(text.lines().count(), 5);
}

#[tokio::test]
async fn prompt_accepts_arguments() {
    let (status, body) = send(
        &service(),
        post_json(
            "/prompts/troubleshoot_connection",
            &json!({ "issue_type": "intermittent" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["description"],
        "Troubleshooting guide for intermittent"
    );
    assert_eq!(body["messages"][0]["content"]["type"], "text");
}

#[tokio::test]
async fn mcp_endpoint_speaks_json_rpc() {
    let service = service();
    let (status, body) = send(
        &service,
        post_json(
            "/mcp",
            &json!({
                "jsonrpc": "2.0",
                "id": "a",
                "method": "resources/read",
                "params": { "uri": "router://devices" }
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "a");
    let content = &body["result"]["contents"][0];
    assert_eq!(content["mimeType"], "application/json");
    let devices: Value = serde_json::from_str(content["text"].as_str().unwrap()).unwrap();
    assert_eq!(devices["total_devices"], 3);

    let (status, body) = send(
        &service,
        post_json("/mcp", &json!({ "jsonrpc": "2.0", "method": "notifications/initialized" })),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn mcp_endpoint_frames_malformed_json_as_parse_error() {
    let req = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"jsonrpc\": \"2.0\", \"id\""))
        .unwrap();
    let (status, body) = send(&service(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"]["code"], -32700);
    assert_eq!(body["id"], Value::Null);
}

#[tokio::test]
async fn reboot_requires_confirmation_over_http() {
    let service = service();
    let (_, body) = send(&service, post_json("/tools/reboot_router", &json!({}))).await;
    assert_eq!(body["status"], "cancelled");
    let (_, body) = send(
        &service,
        post_json("/tools/reboot_router", &json!({ "confirm": true })),
    )
    .await;
    assert_eq!(body["status"], "success");
    assert_eq!(service.engine().system_info().reboot_count, 1);
}
