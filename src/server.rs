//! MCP server implementation.
//!
//! Handles JSON-RPC 2.0 over line-delimited stdio according to the MCP
//! protocol specification.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::dispatch::{Dispatcher, Outcome, OutcomeKind};
use crate::error::{rpc_codes, McpError, Result};
use crate::tools::ToolRegistry;

/// MCP protocol version we support.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server information.
const SERVER_NAME: &str = "simple-memory";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// JSON-RPC 2.0 request.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version, must be "2.0"
    pub jsonrpc: String,
    /// Request id; absent for notifications
    pub id: Option<JsonValue>,
    /// Method name
    pub method: String,
    /// Method parameters
    #[serde(default)]
    pub params: Option<JsonValue>,
}

impl JsonRpcRequest {
    /// Whether this is a notification that must not be answered.
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
            && (self.method == "initialized" || self.method.starts_with("notifications/"))
    }
}

/// JSON-RPC 2.0 response.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    /// Always "2.0"
    pub jsonrpc: String,
    /// Id of the request being answered
    pub id: Option<JsonValue>,
    /// Result on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    /// Error on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    /// Error code, see [`rpc_codes`]
    pub code: i32,
    /// Error message
    pub message: String,
    /// Optional extra data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<JsonValue>, result: JsonValue) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<JsonValue>, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data: None,
            }),
        }
    }

    /// Create an error response from an McpError.
    pub fn from_error(id: Option<JsonValue>, err: McpError) -> Self {
        Self::error(id, err.rpc_code(), err.to_string())
    }

    /// Create a response from a dispatched operation outcome.
    ///
    /// Success and not-found outcomes are tool results carrying the message as
    /// text content. Invalid and error outcomes become JSON-RPC errors.
    pub fn from_outcome(id: Option<JsonValue>, outcome: Outcome) -> Self {
        match outcome.kind {
            OutcomeKind::Success | OutcomeKind::NotFound => Self::success(
                id,
                serde_json::json!({
                    "content": [{
                        "type": "text",
                        "text": outcome.message
                    }]
                }),
            ),
            OutcomeKind::Invalid => Self::error(id, rpc_codes::INVALID_PARAMS, outcome.message),
            OutcomeKind::Error => Self::error(id, rpc_codes::INTERNAL_ERROR, outcome.message),
        }
    }
}

/// MCP server.
pub struct McpServer {
    dispatcher: Dispatcher,
    registry: ToolRegistry,
}

impl McpServer {
    /// Create a new MCP server over the given dispatcher.
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            registry: ToolRegistry::new(),
        }
    }

    /// Run the server, reading from stdin and writing to stdout.
    pub async fn run(&self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve requests from `reader` until EOF, writing responses to `writer`.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = String::new();

        loop {
            line.clear();
            let bytes_read = reader.read_line(&mut line).await?;

            if bytes_read == 0 {
                // EOF - client disconnected
                tracing::debug!("stdin closed, stopping MCP server");
                break;
            }

            let Some(response) = self.handle_line(&line) else {
                continue;
            };

            let response_json = serde_json::to_string(&response)?;
            writer.write_all(response_json.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }

        Ok(())
    }

    /// Handle one raw input line.
    ///
    /// Returns `None` for blank lines and notifications.
    pub fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let value = match serde_json::from_str::<JsonValue>(line) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "unparseable request line");
                return Some(JsonRpcResponse::error(
                    None,
                    rpc_codes::PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };

        // Valid JSON that is not a request object keeps whatever id it carried.
        let id = value.get("id").cloned().filter(|id| !id.is_null());
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request),
            Err(e) => {
                tracing::warn!(error = %e, "malformed request object");
                Some(JsonRpcResponse::error(
                    id,
                    rpc_codes::INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                ))
            }
        }
    }

    /// Handle a single JSON-RPC request.
    pub fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        tracing::debug!(method = %request.method, id = ?request.id, "request");

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id,
                rpc_codes::INVALID_REQUEST,
                "Invalid JSON-RPC version".to_string(),
            ));
        }

        if request.is_notification() {
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "initialized" => JsonRpcResponse::success(request.id, JsonValue::Null),
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request),
            "ping" => JsonRpcResponse::success(request.id, serde_json::json!({})),
            _ => JsonRpcResponse::error(
                request.id,
                rpc_codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        };
        Some(response)
    }

    fn handle_initialize(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::success(
            request.id,
            serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": SERVER_VERSION
                }
            }),
        )
    }

    fn handle_tools_list(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let tools: Vec<JsonValue> = self
            .registry
            .tools()
            .iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect();

        JsonRpcResponse::success(request.id, serde_json::json!({ "tools": tools }))
    }

    fn handle_tools_call(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let params = match &request.params {
            Some(JsonValue::Object(obj)) => obj,
            _ => {
                return JsonRpcResponse::error(
                    request.id,
                    rpc_codes::INVALID_PARAMS,
                    "Missing params object".to_string(),
                )
            }
        };

        let name = match params.get("name").and_then(|v| v.as_str()) {
            Some(n) => n.to_string(),
            None => {
                return JsonRpcResponse::error(
                    request.id,
                    rpc_codes::INVALID_PARAMS,
                    "Missing 'name' in params".to_string(),
                )
            }
        };

        let arguments = match params.get("arguments") {
            Some(JsonValue::Object(obj)) => obj.clone(),
            Some(JsonValue::Null) | None => Map::new(),
            _ => {
                return JsonRpcResponse::from_error(
                    request.id,
                    McpError::InvalidArg {
                        name: "arguments".to_string(),
                        reason: "must be an object".to_string(),
                    },
                )
            }
        };

        match self.registry.dispatch(&self.dispatcher, &name, arguments) {
            Ok(outcome) => JsonRpcResponse::from_outcome(request.id, outcome),
            Err(err) => {
                tracing::debug!(tool = %name, error = %err, "tool call rejected");
                JsonRpcResponse::from_error(request.id, err)
            }
        }
    }
}
