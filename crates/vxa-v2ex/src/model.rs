//! Wire types for the V2EX API.
//!
//! Every struct decodes one JSON shape the API returns. Required fields are
//! limited to entity ids, the envelope `success` flag, and the pagination
//! counters; everything else is optional and decodes to `None` when absent.
//! Unknown keys are ignored. Decoding is strict: a required field that is
//! missing or of the wrong primitive type is a `Validation` error, and JSON
//! strings are never coerced to integers.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    pub id: u64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub created: Option<u64>,
    #[serde(default)]
    pub pro: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Node {
    pub id: u64,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub footer: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub topics: Option<u64>,
    #[serde(default)]
    pub created: Option<u64>,
    #[serde(default)]
    pub last_modified: Option<u64>,
}

/// The API emits both `created` and `created_at` depending on the endpoint;
/// both stay optional and the formatter consults them in that order.
#[derive(Debug, Clone, Deserialize)]
pub struct Topic {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub content_rendered: Option<String>,
    #[serde(default)]
    pub syntax: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub replies: Option<u64>,
    #[serde(default)]
    pub last_reply_by: Option<String>,
    #[serde(default)]
    pub created: Option<u64>,
    #[serde(default)]
    pub created_at: Option<u64>,
    #[serde(default)]
    pub last_modified: Option<u64>,
    #[serde(default)]
    pub last_touched: Option<u64>,
    #[serde(default)]
    pub member: Option<Member>,
    #[serde(default)]
    pub node: Option<Node>,
    #[serde(default)]
    pub node_id: Option<u64>,
    /// Opaque pass-through items; never interpreted.
    #[serde(default)]
    pub supplements: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Reply {
    pub id: u64,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub content_rendered: Option<String>,
    #[serde(default)]
    pub created: Option<u64>,
    #[serde(default)]
    pub created_at: Option<u64>,
    #[serde(default)]
    pub member: Option<Member>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    pub per_page: u64,
    pub total: u64,
    pub pages: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopicResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub result: Topic,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepliesResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: Vec<Reply>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}
