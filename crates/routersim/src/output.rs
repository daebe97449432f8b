//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde_json::Value;
use tabled::{Table, Tabled, builder::Builder, settings::Style};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Color a tool status word: green for success, red for errors, yellow otherwise.
pub fn paint_status(status: &str, color: bool) -> String {
    if !color {
        return status.to_string();
    }
    match status {
        "success" | "online" => status.green().to_string(),
        "error" => status.red().bold().to_string(),
        _ => status.yellow().to_string(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(data.iter().map(&id_fn).collect::<Vec<_>>().join("\n")),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses `detail_fn`, since single-item views don't use
/// the `Tabled` derive.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize + ?Sized,
{
    match format {
        OutputFormat::Table => Ok(detail_fn(data)),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(id_fn(data)),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Dynamic JSON detail ──────────────────────────────────────────────

/// Key/value detail view of a JSON object. Arrays of objects become a
/// nested table; other nested values are shown as compact JSON.
pub fn json_detail(value: &Value, color: bool) -> String {
    let Value::Object(map) = value else {
        return scalar(value);
    };
    let width = map.keys().map(String::len).max().unwrap_or(0) + 1;
    let mut lines = Vec::with_capacity(map.len());
    let mut tables = Vec::new();

    for (key, val) in map {
        match val {
            Value::Array(items) if items.iter().all(Value::is_object) && !items.is_empty() => {
                tables.push(format!("{key}:\n{}", json_table(items)));
            }
            Value::String(s) if key == "status" => {
                lines.push(format!("{:<width$} {}", format!("{key}:"), paint_status(s, color)));
            }
            other => lines.push(format!("{:<width$} {}", format!("{key}:"), scalar(other))),
        }
    }

    lines.extend(tables);
    lines.join("\n")
}

/// Build a table from uniform JSON objects, columns taken from the first.
fn json_table(items: &[Value]) -> String {
    let columns: Vec<String> = items
        .first()
        .and_then(Value::as_object)
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default();

    let mut builder = Builder::default();
    builder.push_record(columns.iter().cloned());
    for item in items {
        builder.push_record(
            columns
                .iter()
                .map(|c| item.get(c).map_or_else(String::new, scalar)),
        );
    }
    builder.build().with(Style::rounded()).to_string()
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => "-".into(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let out = if compact {
        serde_json::to_string(data)?
    } else {
        serde_json::to_string_pretty(data)?
    };
    Ok(out)
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    Ok(serde_yaml::to_string(data)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detail_lists_scalars_and_tables_arrays() {
        let value = json!({
            "status": "success",
            "networks_found": 2,
            "networks": [
                { "ssid": "A", "channel": 1 },
                { "ssid": "B", "channel": 36 }
            ]
        });
        let out = json_detail(&value, false);
        assert!(out.contains("status:"));
        assert!(out.contains("success"));
        assert!(out.contains("networks_found: 2"));
        assert!(out.contains("ssid"));
        assert!(out.contains("36"));
    }

    #[test]
    fn null_renders_as_dash() {
        let out = json_detail(&json!({ "field": null }), false);
        assert!(out.contains("field: -"));
    }

    #[test]
    fn status_is_uncolored_without_color() {
        assert_eq!(paint_status("error", false), "error");
        assert_ne!(paint_status("error", true), "error");
    }

    #[test]
    fn single_plain_uses_id() {
        let out = render_single(OutputFormat::Plain, &json!({"a": 1}), |_| "detail".into(), |_| {
            "id".into()
        })
        .unwrap();
        assert_eq!(out, "id");
    }

    #[test]
    fn compact_json_is_one_line() {
        let out = render_single(
            OutputFormat::JsonCompact,
            &json!({"a": [1, 2]}),
            |_| String::new(),
            |_| String::new(),
        )
        .unwrap();
        assert_eq!(out, r#"{"a":[1,2]}"#);
    }
}
