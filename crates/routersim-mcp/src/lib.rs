//! Protocol adapter for the routersim engine.
//!
//! Maps three request kinds onto a shared [`RouterEngine`]:
//!
//! - **Tools** ([`tools`]): one per engine operation, with JSON Schemas.
//!   Engine rejections come back as `"status": "error"` payloads, never
//!   as transport failures.
//! - **Resources** ([`resources`]): read-only `router://` views.
//! - **Prompts** ([`prompts`]): troubleshooting and audit guides rendered
//!   from live state.
//!
//! Two transports sit on top of [`RouterService`]: newline-delimited
//! JSON-RPC 2.0 over stdio ([`server::stdio`]) and an `axum` HTTP router
//! ([`server::http`]).

pub mod error;
pub mod prompts;
pub mod resources;
pub mod server;
pub mod tools;

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use routersim_core::RouterEngine;

pub use error::AdapterError;
pub use prompts::{PromptDef, PromptResult};
pub use resources::{ResourceContent, ResourceDef, ResourceKind};
pub use tools::ToolDef;

/// Name reported to protocol clients.
pub const SERVER_NAME: &str = "routersim";

/// Cheaply cloneable handle the transports share.
#[derive(Debug, Clone)]
pub struct RouterService {
    engine: Arc<RouterEngine>,
}

impl RouterService {
    pub fn new(engine: Arc<RouterEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &RouterEngine {
        &self.engine
    }

    pub fn list_tools(&self) -> Vec<ToolDef> {
        tools::catalog()
    }

    pub fn call_tool(&self, name: &str, arguments: Value) -> Result<Value, AdapterError> {
        tools::call_tool(&self.engine, name, arguments)
    }

    pub fn list_resources(&self) -> Vec<ResourceDef> {
        resources::catalog()
    }

    pub fn read_resource(&self, uri: &str) -> Result<ResourceContent, AdapterError> {
        resources::read_resource(&self.engine, uri)
    }

    pub fn list_prompts(&self) -> Vec<PromptDef> {
        prompts::catalog()
    }

    pub fn get_prompt(
        &self,
        name: &str,
        arguments: &HashMap<String, String>,
    ) -> Result<PromptResult, AdapterError> {
        prompts::get_prompt(&self.engine, name, arguments)
    }
}
