//! Agent system for answering football questions with tool calling.
//!
//! Provides an LLM agent that plans which statistics tools to call,
//! executes them against the football data client and phrases the answer.

mod runner;
mod tools;

pub use runner::{Agent, AgentResponse, QueryResolver, ToolCallRecord};
pub use tools::{parse_tool_call, tool_definitions, ToolCall, ToolContext};
