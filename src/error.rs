//! Error types for the memory server.
//!
//! Covers everything that can go wrong before or around a store operation.
//! Store results themselves (not found, empty key) are [`crate::Outcome`]s,
//! not errors.

/// Memory server errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum McpError {
    /// Unknown tool requested.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// Missing required argument.
    #[error("missing required argument: {0}")]
    MissingArg(String),

    /// Invalid argument value.
    #[error("invalid argument '{name}': {reason}")]
    InvalidArg {
        /// Argument name
        name: String,
        /// Reason why it's invalid
        reason: String,
    },

    /// JSON-RPC protocol error.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for McpError {
    fn from(err: std::io::Error) -> Self {
        McpError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for McpError {
    fn from(err: serde_json::Error) -> Self {
        McpError::Protocol(format!("JSON error: {}", err))
    }
}

/// JSON-RPC error codes.
pub mod rpc_codes {
    /// Parse error - Invalid JSON was received.
    pub const PARSE_ERROR: i32 = -32700;
    /// Invalid Request - The JSON sent is not a valid Request object.
    pub const INVALID_REQUEST: i32 = -32600;
    /// Method not found - The method does not exist / is not available.
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid params - Invalid method parameter(s).
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal error - Internal JSON-RPC error.
    pub const INTERNAL_ERROR: i32 = -32603;
}

impl McpError {
    /// Convert to JSON-RPC error code.
    ///
    /// An unknown tool is a bad `name` parameter of `tools/call`, so it maps to
    /// invalid-params rather than method-not-found.
    pub fn rpc_code(&self) -> i32 {
        match self {
            McpError::UnknownTool(_) | McpError::MissingArg(_) | McpError::InvalidArg { .. } => {
                rpc_codes::INVALID_PARAMS
            }
            McpError::Protocol(_) => rpc_codes::INVALID_REQUEST,
            McpError::Io(_) => rpc_codes::INTERNAL_ERROR,
        }
    }

    /// Whether the error was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        self.rpc_code() != rpc_codes::INTERNAL_ERROR
    }
}

/// Result type for memory server operations.
pub type Result<T> = std::result::Result<T, McpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_codes() {
        assert_eq!(
            McpError::UnknownTool("x".to_string()).rpc_code(),
            rpc_codes::INVALID_PARAMS
        );
        assert_eq!(
            McpError::MissingArg("key".to_string()).rpc_code(),
            rpc_codes::INVALID_PARAMS
        );
        assert_eq!(
            McpError::Protocol("bad".to_string()).rpc_code(),
            rpc_codes::INVALID_REQUEST
        );
        assert_eq!(
            McpError::Io("boom".to_string()).rpc_code(),
            rpc_codes::INTERNAL_ERROR
        );
    }

    #[test]
    fn test_client_error() {
        assert!(McpError::MissingArg("key".to_string()).is_client_error());
        assert!(!McpError::Io("closed".to_string()).is_client_error());
    }

    #[test]
    fn test_display() {
        let err = McpError::MissingArg("value".to_string());
        assert_eq!(err.to_string(), "missing required argument: value");
    }
}
