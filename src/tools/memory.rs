//! Memory tools.
//!
//! Tools: store_memory, get_memory, list_memory, delete_memory, clear_memory

use serde_json::{Map, Value as JsonValue};

use crate::convert::{get_string_arg, get_string_args};
use crate::dispatch::Operation;
use crate::error::{McpError, Result};
use crate::schema;
use crate::tools::ToolDef;

/// Get all memory tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "store_memory",
            "Store a value in memory with a given key",
            schema!(object {
                required: {
                    "key": string => "The key to store the value under",
                    "value": string => "The value to store"
                }
            }),
        ),
        ToolDef::new(
            "get_memory",
            "Retrieve a value from memory by key",
            schema!(object {
                required: { "key": string => "The key to retrieve the value for" }
            }),
        ),
        ToolDef::new(
            "list_memory",
            "List all keys stored in memory",
            schema!(object {}),
        ),
        ToolDef::new(
            "delete_memory",
            "Delete a value from memory by key",
            schema!(object {
                required: { "key": string => "The key to delete from memory" }
            }),
        ),
        ToolDef::new(
            "clear_memory",
            "Clear all values from memory",
            schema!(object {}),
        ),
    ]
}

/// Build the operation for a memory tool call.
///
/// Checks that required arguments are present. Their contents, including an
/// empty key, are left for the dispatcher to judge.
pub fn operation(name: &str, args: Map<String, JsonValue>) -> Result<Operation> {
    match name {
        "store_memory" => {
            let [key, value] = get_string_args(&args, ["key", "value"])?;
            Ok(Operation::Store { key, value })
        }

        "get_memory" => {
            let key = get_string_arg(&args, "key")?;
            Ok(Operation::Get { key })
        }

        "list_memory" => Ok(Operation::List),

        "delete_memory" => {
            let key = get_string_arg(&args, "key")?;
            Ok(Operation::Delete { key })
        }

        "clear_memory" => Ok(Operation::Clear),

        _ => Err(McpError::UnknownTool(name.to_string())),
    }
}
