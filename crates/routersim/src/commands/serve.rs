//! `serve` handler: hands the shared service to a transport.

use tracing::info;

use routersim_config::{Config, Transport};
use routersim_mcp::server::{http, stdio};

use super::Session;
use crate::cli::ServeArgs;
use crate::error::CliError;

pub async fn handle(args: ServeArgs, session: &Session, cfg: &Config) -> Result<(), CliError> {
    let transport = args.transport.map_or(cfg.server.transport, Transport::from);
    let service = session.service.clone();

    match transport {
        Transport::Stdio => stdio::serve_stdio(service).await?,
        Transport::Http => {
            let host = args.host.unwrap_or_else(|| cfg.server.host.clone());
            let port = args.port.unwrap_or(cfg.server.port);
            let addr = tokio::net::lookup_host((host.as_str(), port))
                .await?
                .next()
                .ok_or_else(|| CliError::Validation {
                    field: "host".into(),
                    reason: format!("'{host}' did not resolve to an address"),
                })?;
            info!(%addr, "starting HTTP transport");
            http::serve_http(service, addr).await?;
        }
    }
    Ok(())
}
