//! Listing handlers for tools, resources and prompts.

use tabled::Tabled;

use routersim_mcp::{PromptDef, ResourceDef, ToolDef};

use super::Session;
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ToolRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Arguments")]
    arguments: String,
    #[tabled(rename = "Description")]
    description: &'static str,
}

impl From<&ToolDef> for ToolRow {
    fn from(t: &ToolDef) -> Self {
        let arguments = t
            .input_schema
            .get("properties")
            .and_then(serde_json::Value::as_object)
            .map(|props| props.keys().cloned().collect::<Vec<_>>().join(", "))
            .unwrap_or_default();
        Self {
            name: t.name,
            arguments,
            description: t.description,
        }
    }
}

#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "URI")]
    uri: String,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "MIME")]
    mime: &'static str,
}

impl From<&ResourceDef> for ResourceRow {
    fn from(r: &ResourceDef) -> Self {
        Self {
            uri: r.uri.clone(),
            name: r.name,
            mime: r.mime_type,
        }
    }
}

#[derive(Tabled)]
struct PromptRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Arguments")]
    arguments: String,
    #[tabled(rename = "Description")]
    description: &'static str,
}

impl From<&PromptDef> for PromptRow {
    fn from(p: &PromptDef) -> Self {
        Self {
            name: p.name,
            arguments: p
                .arguments
                .iter()
                .map(|a| if a.required { a.name.to_string() } else { format!("[{}]", a.name) })
                .collect::<Vec<_>>()
                .join(", "),
            description: p.description,
        }
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub fn tools(session: &Session) -> Result<(), CliError> {
    let tools = session.service.list_tools();
    let out = output::render_list(
        session.format,
        &tools,
        |t| ToolRow::from(t),
        |t| t.name.to_string(),
    )?;
    session.print(&out);
    Ok(())
}

pub fn resources(session: &Session) -> Result<(), CliError> {
    let resources = session.service.list_resources();
    let out = output::render_list(session.format, &resources, |r| ResourceRow::from(r), |r| {
        r.uri.clone()
    })?;
    session.print(&out);
    Ok(())
}

pub fn prompts(session: &Session) -> Result<(), CliError> {
    let prompts = session.service.list_prompts();
    let out = output::render_list(session.format, &prompts, |p| PromptRow::from(p), |p| {
        p.name.to_string()
    })?;
    session.print(&out);
    Ok(())
}
