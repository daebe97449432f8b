// ── stdio transport ──
//
// Newline-delimited JSON-RPC 2.0: one request per input line, one
// response per output line. Logs go to stderr, never stdout.

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use super::rpc::{self, JsonRpcResponse};
use crate::RouterService;
use crate::error::{AdapterError, rpc_code};

/// Serve on the process's stdin/stdout until EOF.
pub async fn serve_stdio(service: RouterService) -> Result<(), AdapterError> {
    info!("JSON-RPC server started on stdio");
    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();
    serve_lines(&service, reader, writer).await?;
    info!("stdin closed, shutting down");
    Ok(())
}

/// Serve any line-oriented reader/writer pair until the reader hits EOF.
pub async fn serve_lines<R, W>(
    service: &RouterService,
    mut reader: R,
    mut writer: W,
) -> Result<(), AdapterError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                rpc::handle_message(service, trimmed)
            }
            Err(e) => {
                warn!(error = %e, "dropping non UTF-8 input line");
                Some(JsonRpcResponse::err(
                    Value::Null,
                    rpc_code::PARSE_ERROR,
                    format!("Parse error: {e}"),
                ))
            }
        };

        if let Some(response) = response {
            let json = serde_json::to_string(&response)?;
            writer.write_all(json.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use routersim_core::{EngineConfig, RouterEngine};
    use std::sync::Arc;

    #[tokio::test]
    async fn one_response_line_per_request() {
        let service = RouterService::new(Arc::new(
            RouterEngine::new(EngineConfig::seeded(2)).unwrap(),
        ));
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","#,
            r#""params":{"name":"change_ssid","arguments":{"new_ssid":"Piped"}}}"#,
            "\n",
            "garbage\n",
        );
        let mut output = Vec::new();
        serve_lines(&service, input.as_bytes(), &mut output)
            .await
            .unwrap();

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[1]["result"]["isError"], false);
        assert_eq!(lines[2]["error"]["code"], -32700);
        assert_eq!(service.engine().get_status().ssid, "Piped");
    }

    #[tokio::test]
    async fn invalid_utf8_line_does_not_stop_the_loop() {
        let service = RouterService::new(Arc::new(
            RouterEngine::new(EngineConfig::seeded(3)).unwrap(),
        ));
        let mut input = b"\xff\xfe\n".to_vec();
        input.extend_from_slice(br#"{"jsonrpc":"2.0","id":7,"method":"ping"}"#);
        input.push(b'\n');

        let mut output = Vec::new();
        serve_lines(&service, input.as_slice(), &mut output)
            .await
            .unwrap();

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["error"]["code"], -32700);
        assert_eq!(lines[0]["id"], Value::Null);
        assert_eq!(lines[1]["id"], 7);
        assert!(lines[1].get("error").is_none());
    }
}
