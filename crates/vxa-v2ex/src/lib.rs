//! vxa-v2ex: V2EX API client and topic bundle builder
//!
//! This crate wraps the two read-only V2EX endpoints (topic by id, replies
//! by id and page), validates their envelopes, and renders the result into
//! a single human-readable text bundle for the analyst agent:
//! - Model: typed wire shapes with strict validation
//! - Client: bearer-auth fetching with sequential reply pagination
//! - Formatter: pure text rendering with field fallback chains
//! - Bundle: the combined topic + replies document

pub mod bundle;
pub mod client;
pub mod format;
pub mod model;

pub use bundle::{REPLIES_HEADER, TOPIC_HEADER};
pub use client::{V2exClient, API_BASE};
pub use format::{format_replies, format_topic, pick_first, truncate};
pub use model::{
    ApiResponse, Member, Node, Pagination, RepliesResponse, Reply, Topic, TopicResponse,
};
