//! CLI error types with miette diagnostics.
//!
//! Maps config, adapter and engine failures into user-facing errors with
//! actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use routersim_config::ConfigError;
use routersim_core::CoreError;
use routersim_mcp::AdapterError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Lookups ──────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(routersim::not_found),
        help("Run: routersim {list_command} to see what is available")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Input ────────────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(routersim::validation))]
    Validation { field: String, reason: String },

    #[error("Tool '{tool}' failed: {message}")]
    #[diagnostic(
        code(routersim::tool_failed),
        help("The router rejected the request ({kind}); its state is unchanged.")
    )]
    ToolFailed {
        tool: String,
        kind: String,
        message: String,
    },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(routersim::config_exists),
        help("Pass --force to overwrite it, or edit it in place.")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(
        code(routersim::config),
        help(
            "Check the config file (routersim config path) and any ROUTERSIM_* \
             environment variables."
        )
    )]
    Config(Box<ConfigError>),

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(routersim::json))]
    Json(#[from] serde_json::Error),

    #[error("YAML rendering failed: {0}")]
    #[diagnostic(code(routersim::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Engine(core) => core.into(),
            other => Self::Config(Box::new(other)),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { field, message } => Self::Validation {
                field,
                reason: message,
            },
            CoreError::NotFound { entity, identifier } => Self::NotFound {
                resource_type: entity,
                identifier,
                list_command: "read router://devices".into(),
            },
        }
    }
}

impl From<AdapterError> for CliError {
    fn from(err: AdapterError) -> Self {
        match err {
            AdapterError::UnknownTool(name) => Self::NotFound {
                resource_type: "Tool".into(),
                identifier: name,
                list_command: "tools".into(),
            },
            AdapterError::UnknownResource(uri) => Self::NotFound {
                resource_type: "Resource".into(),
                identifier: uri,
                list_command: "resources".into(),
            },
            AdapterError::UnknownPrompt(name) => Self::NotFound {
                resource_type: "Prompt".into(),
                identifier: name,
                list_command: "prompts".into(),
            },
            AdapterError::InvalidArguments(reason) => Self::Validation {
                field: "arguments".into(),
                reason,
            },
            AdapterError::Io(e) => Self::Io(e),
            AdapterError::Json(e) => Self::Json(e),
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            Self::ToolFailed { kind, .. } => match kind.as_str() {
                "not_found" => exit_code::NOT_FOUND,
                "validation" => exit_code::USAGE,
                _ => exit_code::GENERAL,
            },
            Self::ConfigExists { .. } => exit_code::CONFLICT,
            Self::Config(_) | Self::Io(_) | Self::Json(_) | Self::Yaml(_) => exit_code::GENERAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_keep_their_category() {
        let err: CliError = CoreError::not_found("Device", "aa:bb:cc:dd:ee:99").into();
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        assert!(err.to_string().contains("aa:bb:cc:dd:ee:99"));

        let err: CliError = CoreError::validation("password", "too short").into();
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }

    #[test]
    fn config_engine_rejection_unwraps_to_validation() {
        let err: CliError = ConfigError::Engine(CoreError::validation("ssid", "empty")).into();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "ssid"));
    }

    #[test]
    fn unknown_names_point_at_the_listing() {
        let err: CliError = AdapterError::UnknownTool("make_coffee".into()).into();
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        match err {
            CliError::NotFound { list_command, .. } => assert_eq!(list_command, "tools"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn tool_failures_map_by_kind() {
        let failed = |kind: &str| CliError::ToolFailed {
            tool: "t".into(),
            kind: kind.into(),
            message: "m".into(),
        };
        assert_eq!(failed("not_found").exit_code(), exit_code::NOT_FOUND);
        assert_eq!(failed("validation").exit_code(), exit_code::USAGE);
        assert_eq!(failed("other").exit_code(), exit_code::GENERAL);
    }
}
