//! vxa-tools: Built-in tools for the v2ex-analyst agent
//!
//! Currently a single tool, `get_topic_bundle`, which is the only seam
//! between the agent loop and the forum client.

pub mod topic;

pub use topic::{create_topic_tools, TopicBundleTool};
