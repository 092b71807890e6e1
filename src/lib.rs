//! # simple-memory
//!
//! In-memory key/value store served over two transports.
//!
//! This crate keeps a single process-wide map of string keys to string values
//! and exposes five operations on it (store, get, list, delete, clear) through:
//!
//! - **REST**: an axum router under `/api/memory`, see [`api`].
//! - **MCP**: JSON-RPC 2.0 over line-delimited stdin/stdout, see [`McpServer`].
//!
//! Both transports share one [`Dispatcher`], so they render identical
//! messages and observe the same data. Nothing is persisted.
//!
//! ## Usage
//!
//! Configure the binary as an MCP server in an AI tool:
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "memory": {
//!       "command": "/path/to/simple-memory",
//!       "args": ["--stdio"]
//!     }
//!   }
//! }
//! ```
//!
//! ## Library Usage
//!
//! ```
//! use std::sync::Arc;
//! use simple_memory::{Dispatcher, MemoryStore, Operation};
//!
//! let dispatcher = Dispatcher::new(Arc::new(MemoryStore::new()));
//! let outcome = dispatcher.dispatch(Operation::Store {
//!     key: "a".to_string(),
//!     value: "1".to_string(),
//! });
//! assert_eq!(outcome.message, "Stored value '1' under key 'a'");
//! ```

#![warn(missing_docs)]

pub mod api;
mod convert;
mod dispatch;
mod error;
mod server;
mod store;
mod tools;

pub use convert::json_to_text;
pub use dispatch::{Dispatcher, Operation, Outcome, OutcomeKind, EMPTY_KEY_MESSAGE};
pub use error::{rpc_codes, McpError, Result};
pub use server::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpServer};
pub use store::MemoryStore;
pub use tools::{ToolDef, ToolRegistry};
