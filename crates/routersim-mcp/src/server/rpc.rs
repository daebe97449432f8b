// ── JSON-RPC 2.0 dispatch ──
//
// Transport-independent: stdio feeds it one line at a time, HTTP one
// request body at a time. Requests without an `id` member are
// notifications and produce no response; `"id": null` still gets one.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::error::{AdapterError, rpc_code};
use crate::{RouterService, SERVER_NAME};

/// MCP protocol revision this server speaks.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    /// `None` only when the member is absent.
    #[serde(default, deserialize_with = "present_id")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

fn present_id<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    pub fn ok(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn err(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }

    fn from_adapter_error(id: Value, err: &AdapterError) -> Self {
        Self::err(id, err.rpc_code(), err.to_string())
    }
}

/// Parse one raw message and handle it. Returns `None` for notifications.
pub fn handle_message(service: &RouterService, raw: &str) -> Option<JsonRpcResponse> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            return Some(JsonRpcResponse::err(
                Value::Null,
                rpc_code::PARSE_ERROR,
                format!("Parse error: {e}"),
            ));
        }
    };
    handle_value(service, value)
}

/// Handle an already-parsed message.
pub fn handle_value(service: &RouterService, value: Value) -> Option<JsonRpcResponse> {
    let id_hint = value.get("id").cloned().unwrap_or(Value::Null);
    match serde_json::from_value::<JsonRpcRequest>(value) {
        Ok(request) => handle_request(service, request),
        Err(e) => Some(JsonRpcResponse::err(
            id_hint,
            rpc_code::INVALID_REQUEST,
            format!("Invalid request: {e}"),
        )),
    }
}

pub fn handle_request(service: &RouterService, req: JsonRpcRequest) -> Option<JsonRpcResponse> {
    debug!(method = %req.method, "rpc request");
    let Some(id) = req.id else {
        debug!(method = %req.method, "notification, no response");
        return None;
    };

    let outcome = match req.method.as_str() {
        "initialize" => Ok(initialize()),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(json!({ "tools": service.list_tools() })),
        "tools/call" => tools_call(service, req.params),
        "resources/list" => Ok(json!({ "resources": service.list_resources() })),
        "resources/read" => resources_read(service, &req.params),
        "prompts/list" => Ok(json!({ "prompts": service.list_prompts() })),
        "prompts/get" => prompts_get(service, &req.params),
        other => {
            return Some(JsonRpcResponse::err(
                id,
                rpc_code::METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
            ));
        }
    };

    Some(match outcome {
        Ok(result) => JsonRpcResponse::ok(id, result),
        Err(e) => {
            warn!(method = %req.method, error = %e, "rpc request failed");
            JsonRpcResponse::from_adapter_error(id, &e)
        }
    })
}

fn initialize() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": false },
            "resources": { "subscribe": false, "listChanged": false },
            "prompts": { "listChanged": false },
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        }
    })
}

fn required_str<'a>(params: &'a Value, key: &str) -> Result<&'a str, AdapterError> {
    params
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| AdapterError::InvalidArguments(format!("missing '{key}' parameter")))
}

fn tools_call(service: &RouterService, params: Value) -> Result<Value, AdapterError> {
    let name = required_str(&params, "name")?.to_string();
    let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);
    let payload = service.call_tool(&name, arguments)?;
    let is_error = payload.get("status").and_then(Value::as_str) == Some("error");
    Ok(json!({
        "content": [{
            "type": "text",
            "text": serde_json::to_string_pretty(&payload)?,
        }],
        "isError": is_error,
    }))
}

fn resources_read(service: &RouterService, params: &Value) -> Result<Value, AdapterError> {
    let uri = required_str(params, "uri")?;
    let content = service.read_resource(uri)?;
    Ok(json!({
        "contents": [{
            "uri": content.kind.uri(),
            "mimeType": content.kind.mime_type(),
            "text": content.text(),
        }]
    }))
}

fn prompts_get(service: &RouterService, params: &Value) -> Result<Value, AdapterError> {
    let name = required_str(params, "name")?;
    let arguments: HashMap<String, String> = match params.get("arguments") {
        None | Some(Value::Null) => HashMap::new(),
        Some(args) => serde_json::from_value(args.clone())
            .map_err(|e| AdapterError::InvalidArguments(format!("prompt arguments: {e}")))?,
    };
    let prompt = service.get_prompt(name, &arguments)?;
    Ok(serde_json::to_value(prompt)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use routersim_core::{EngineConfig, RouterEngine};
    use std::sync::Arc;

    fn service() -> RouterService {
        RouterService::new(Arc::new(
            RouterEngine::new(EngineConfig::seeded(4)).unwrap(),
        ))
    }

    fn call(service: &RouterService, raw: &str) -> Value {
        let resp = handle_message(service, raw).unwrap();
        serde_json::to_value(resp).unwrap()
    }

    #[test]
    fn parse_error_has_null_id() {
        let resp = call(&service(), "{not json");
        assert_eq!(resp["error"]["code"], -32700);
        assert_eq!(resp["id"], Value::Null);
    }

    #[test]
    fn unknown_method() {
        let resp = call(&service(), r#"{"jsonrpc":"2.0","id":3,"method":"tools/destroy"}"#);
        assert_eq!(resp["error"]["code"], -32601);
        assert_eq!(resp["id"], 3);
    }

    #[test]
    fn notifications_get_no_response() {
        let service = service();
        assert!(
            handle_message(
                &service,
                r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#
            )
            .is_none()
        );
    }

    #[test]
    fn null_id_is_a_request_not_a_notification() {
        let resp = call(&service(), r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#);
        assert_eq!(resp["id"], Value::Null);
        assert_eq!(resp["result"], json!({}));
    }

    #[test]
    fn initialize_advertises_all_capabilities() {
        let resp = call(
            &service(),
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
        );
        let caps = &resp["result"]["capabilities"];
        assert!(caps.get("tools").is_some());
        assert!(caps.get("resources").is_some());
        assert!(caps.get("prompts").is_some());
        assert_eq!(resp["result"]["serverInfo"]["name"], "routersim");
    }

    #[test]
    fn tools_call_missing_name_is_invalid_params() {
        let resp = call(
            &service(),
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{}}"#,
        );
        assert_eq!(resp["error"]["code"], -32602);
    }

    #[test]
    fn engine_error_is_a_tool_result_not_an_rpc_error() {
        let resp = call(
            &service(),
            r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"disconnect_device","arguments":{"mac_address":"00:00:00:00:00:00"}}}"#,
        );
        assert!(resp.get("error").is_none());
        assert_eq!(resp["result"]["isError"], true);
        let text = resp["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("not_found"));
    }

    #[test]
    fn prompts_get_rejects_non_string_arguments() {
        let resp = call(
            &service(),
            r#"{"jsonrpc":"2.0","id":6,"method":"prompts/get","params":{"name":"security_audit","arguments":{"x":1}}}"#,
        );
        assert_eq!(resp["error"]["code"], -32602);
    }
}
