//! Agent definitions for v2ex-analyst.
//!
//! This crate provides:
//! - `InternalAgent` trait for defining agent behavior
//! - The built-in analyst agent

mod analyst;

pub use analyst::AnalystAgent;

/// Trait for internal agents.
///
/// Internal agents are built-in agents with a system prompt that guides
/// their behavior and a set of tools they can use.
pub trait InternalAgent: Send + Sync {
    /// Get the agent name (e.g., "analyst")
    fn name(&self) -> &str;

    /// Get the agent description for display
    fn description(&self) -> &str;

    /// Get the system prompt for this agent
    fn system_prompt(&self) -> &str;

    /// Get the tool names this agent needs
    fn tool_names(&self) -> &[&str];

    /// Get the default max iterations for the agentic loop
    fn max_turns(&self) -> usize {
        20
    }
}
