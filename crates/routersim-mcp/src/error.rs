// ── Adapter error types ──
//
// Failures of the protocol layer itself: a name that matches nothing, or
// arguments that are not even the right shape. Engine rejections are not
// adapter errors; they are rendered as structured tool results.

use thiserror::Error;

/// JSON-RPC 2.0 error codes.
pub mod rpc_code {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Unknown resource URI: {0}")]
    UnknownResource(String),

    #[error("Unknown prompt: {0}")]
    UnknownPrompt(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AdapterError {
    /// The JSON-RPC error code this failure is reported with.
    pub fn rpc_code(&self) -> i32 {
        match self {
            Self::UnknownTool(_)
            | Self::UnknownResource(_)
            | Self::UnknownPrompt(_)
            | Self::InvalidArguments(_) => rpc_code::INVALID_PARAMS,
            Self::Io(_) | Self::Json(_) => rpc_code::INTERNAL_ERROR,
        }
    }

    /// Whether the caller sent something wrong, as opposed to a server fault.
    pub fn is_client_error(&self) -> bool {
        self.rpc_code() == rpc_code::INVALID_PARAMS
    }
}
