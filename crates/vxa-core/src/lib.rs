//! vxa-core: Core types and traits for v2ex-analyst
//!
//! This crate provides the foundational types and traits shared by the
//! forum client, tools, agents, and provider layers.

pub mod error;
pub mod message;
pub mod provider;
pub mod tool;

pub use error::Error;
pub use message::{Message, Role, StreamChunk, ToolCall, Usage};
pub use provider::{
    CompletionRequest, CompletionResponse, FinishReason, Provider, StreamResult,
};
pub use tool::{PropertySchema, Tool, ToolDefinition, ToolOutput, ToolParameters, ToolRegistry};

pub type Result<T> = std::result::Result<T, Error>;
