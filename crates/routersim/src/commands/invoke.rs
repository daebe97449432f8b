//! One-shot tool calls, resource reads and prompt renders.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use routersim_mcp::resources::ResourceBody;

use super::Session;
use crate::cli::{CallArgs, OutputFormat, PromptArgs, ReadArgs};
use crate::error::CliError;
use crate::output;

// ── call ────────────────────────────────────────────────────────────

/// Parse `--args` into a JSON value. Absent means no arguments.
fn parse_arguments(raw: Option<&str>) -> Result<Value, CliError> {
    match raw {
        None => Ok(Value::Null),
        Some(text) => serde_json::from_str(text).map_err(|e| CliError::Validation {
            field: "--args".into(),
            reason: format!("not valid JSON: {e}"),
        }),
    }
}

/// A structured failure payload, if the tool reported one.
fn failure(tool: &str, payload: &Value) -> Option<CliError> {
    if payload.get("status").and_then(Value::as_str) != Some("error") {
        return None;
    }
    let text = |key: &str| {
        payload
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    Some(CliError::ToolFailed {
        tool: tool.to_string(),
        kind: text("kind"),
        message: text("message"),
    })
}

pub fn call(args: CallArgs, session: &Session) -> Result<(), CliError> {
    let arguments = parse_arguments(args.args.as_deref())?;
    debug!(tool = %args.tool, "calling tool");
    let payload = session.service.call_tool(&args.tool, arguments)?;
    let failed = failure(&args.tool, &payload);

    // Scripts still get the error payload on stdout in structured formats.
    let structured = !matches!(session.format, OutputFormat::Table | OutputFormat::Plain);
    if failed.is_none() || structured {
        let out = output::render_single(
            session.format,
            &payload,
            |p| output::json_detail(p, session.color),
            |p| {
                p.get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            },
        )?;
        session.print(&out);
    }

    failed.map_or(Ok(()), Err)
}

// ── read ────────────────────────────────────────────────────────────

pub fn read(args: &ReadArgs, session: &Session) -> Result<(), CliError> {
    let content = session.service.read_resource(&args.uri)?;
    let out = match session.format {
        OutputFormat::Table => match &content.body {
            ResourceBody::Json(value) => output::json_detail(value, session.color),
            ResourceBody::Text(text) => text.clone(),
        },
        OutputFormat::Plain => content.text(),
        format => {
            let value = content.into_json();
            output::render_single(format, &value, |_| String::new(), |_| String::new())?
        }
    };
    session.print(&out);
    Ok(())
}

// ── prompt ──────────────────────────────────────────────────────────

pub fn prompt(args: PromptArgs, session: &Session) -> Result<(), CliError> {
    let arguments: HashMap<String, String> = args.args.into_iter().collect();
    let rendered = session.service.get_prompt(&args.name, &arguments)?;
    let out = output::render_single(
        session.format,
        &rendered,
        |r| r.text().to_string(),
        |r| r.text().to_string(),
    )?;
    session.print(&out);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_arguments_are_null() {
        assert_eq!(parse_arguments(None).unwrap(), Value::Null);
        assert_eq!(
            parse_arguments(Some(r#"{"channel": 11}"#)).unwrap(),
            json!({ "channel": 11 })
        );
    }

    #[test]
    fn malformed_arguments_are_a_usage_error() {
        let err = parse_arguments(Some("{channel")).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "--args"));
    }

    #[test]
    fn error_payload_becomes_tool_failure() {
        let payload = json!({
            "status": "error",
            "kind": "not_found",
            "message": "Device not found: aa:bb:cc:dd:ee:99"
        });
        match failure("disconnect_device", &payload) {
            Some(CliError::ToolFailed { kind, message, .. }) => {
                assert_eq!(kind, "not_found");
                assert!(message.contains("aa:bb:cc:dd:ee:99"));
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(failure("get_status", &json!({ "status": "online" })).is_none());
        assert!(failure("reboot_router", &json!({ "status": "cancelled" })).is_none());
    }
}
