//! # agent-core
//!
//! Tool framework shared by the agent host and domain tool crates.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Agent Platform                         │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │  ToolCall   │──│    Tools    │──│   ToolResult        │  │
//! │  │ (+ caller)  │  │   Registry  │  │ (text / data / ui)  │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Domain crates implement the `Tool` trait; the host registers them in a
//! `ToolRegistry` and dispatches validated calls.

pub mod tool;
pub mod error;

pub use error::{AgentError, Result};
pub use tool::{
    CallerContext, ParameterSchema, Tool, ToolCall, ToolPrice, ToolRegistry, ToolResult,
    ToolSchema, UiDirective,
};
