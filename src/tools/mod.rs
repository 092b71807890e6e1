//! Tool registry.
//!
//! Provides the static MCP tool metadata and turns tool calls into typed
//! [`Operation`]s.

pub mod memory;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::dispatch::{Dispatcher, Operation, Outcome};
use crate::error::Result;

/// A tool definition for the MCP tools/list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDef {
    /// Tool name (e.g., "store_memory")
    pub name: String,
    /// Tool description
    pub description: String,
    /// JSON Schema for the input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: JsonValue,
}

impl ToolDef {
    /// Create a new tool definition.
    pub fn new(name: &str, description: &str, input_schema: JsonValue) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// Registry of all available tools.
pub struct ToolRegistry {
    tools: Vec<ToolDef>,
}

impl ToolRegistry {
    /// Create a new registry with all tools registered.
    pub fn new() -> Self {
        Self {
            tools: memory::tools(),
        }
    }

    /// Get all tool definitions.
    pub fn tools(&self) -> &[ToolDef] {
        &self.tools
    }

    /// Translate a tool call into a typed operation.
    pub fn operation(&self, name: &str, args: Map<String, JsonValue>) -> Result<Operation> {
        memory::operation(name, args)
    }

    /// Dispatch a tool call against the store.
    pub fn dispatch(
        &self,
        dispatcher: &Dispatcher,
        name: &str,
        args: Map<String, JsonValue>,
    ) -> Result<Outcome> {
        let op = self.operation(name, args)?;
        Ok(dispatcher.dispatch(op))
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper macro for creating JSON Schema for tool input parameters.
///
/// Each property is written as `"name": type => "description"`.
#[macro_export]
macro_rules! schema {
    // Object with required properties
    (object {
        required: { $($req_name:literal : $req_type:tt => $req_desc:literal),* $(,)? }
    }) => {{
        let mut required: Vec<&str> = Vec::new();
        $(required.push($req_name);)*

        let mut props = serde_json::Map::new();
        $(props.insert($req_name.to_string(), schema!(@prop $req_type, $req_desc));)*

        serde_json::json!({
            "type": "object",
            "properties": props,
            "required": required
        })
    }};

    // Empty object (no parameters)
    (object {}) => {{
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }};

    (@prop $ty:tt, $desc:literal) => {{
        let mut prop = schema!(@type $ty);
        prop["description"] = serde_json::Value::String($desc.to_string());
        prop
    }};

    // Type mappings
    (@type string) => { serde_json::json!({"type": "string"}) };
}
