use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use vxa_core::{Error, Result};

use crate::model::{ApiResponse, RepliesResponse, Reply, Topic, TopicResponse};

pub const API_BASE: &str = "https://www.v2ex.com/api/v2";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Client for the two read-only V2EX endpoints.
///
/// Holds only the bearer token and API base URL; the HTTP session is
/// supplied by the caller so its lifetime can be scoped to one bundle build.
#[derive(Debug, Clone)]
pub struct V2exClient {
    token: String,
    api_base: String,
}

impl V2exClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base: API_BASE.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    pub async fn fetch_topic(&self, http: &Client, topic_id: u64) -> Result<Topic> {
        info!(topic_id, "Fetching V2EX topic");
        let response = http
            .get(format!("{}/topics/{}", self.api_base, topic_id))
            .header("Authorization", self.bearer())
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::network(e.to_string()))?;

        let status = response.status();
        info!(topic_id, status = status.as_u16(), "V2EX topic response");
        let body = response
            .text()
            .await
            .map_err(|e| Error::network(e.to_string()))?;
        debug!(topic_id, body = %body, "V2EX topic response body");

        if !status.is_success() {
            return Err(Error::http(status.as_u16(), body));
        }

        let payload: Value =
            serde_json::from_str(&body).map_err(|e| Error::validation(e.to_string()))?;
        ensure_success(&payload)?;
        let decoded: TopicResponse =
            serde_json::from_value(payload).map_err(|e| Error::validation(e.to_string()))?;
        Ok(decoded.result)
    }

    /// Page through a topic's replies starting at page 1.
    ///
    /// Stops when `page > max_pages`, when a page comes back empty
    /// (end-of-data, not an error), or when the accumulated count reaches
    /// `max_replies` (the list is truncated to exactly that many). The
    /// server's `pagination` metadata is decoded but never bounds the loop.
    /// Any failure on any page aborts the whole fetch; no partial list is
    /// returned.
    pub async fn fetch_replies(
        &self,
        http: &Client,
        topic_id: u64,
        max_pages: u32,
        max_replies: Option<usize>,
    ) -> Result<Vec<Reply>> {
        let mut replies: Vec<Reply> = Vec::new();
        let mut page = 1u32;
        while page <= max_pages {
            info!(topic_id, page, "Fetching V2EX replies");
            let response = http
                .get(format!("{}/topics/{}/replies", self.api_base, topic_id))
                .query(&[("p", page)])
                .header("Authorization", self.bearer())
                .timeout(REQUEST_TIMEOUT)
                .send()
                .await
                .map_err(|e| Error::network(e.to_string()))?;

            let status = response.status();
            info!(topic_id, page, status = status.as_u16(), "V2EX replies response");
            let body = response
                .text()
                .await
                .map_err(|e| Error::network(e.to_string()))?;
            debug!(topic_id, page, body = %body, "V2EX replies response body");

            if !status.is_success() {
                return Err(Error::http(status.as_u16(), body));
            }

            let payload: Value =
                serde_json::from_str(&body).map_err(|e| Error::validation(e.to_string()))?;
            ensure_success(&payload)?;
            let decoded: RepliesResponse =
                serde_json::from_value(payload).map_err(|e| Error::validation(e.to_string()))?;

            if decoded.result.is_empty() {
                break;
            }
            replies.extend(decoded.result);

            if let Some(cap) = max_replies {
                if replies.len() >= cap {
                    replies.truncate(cap);
                    break;
                }
            }
            page += 1;
        }
        Ok(replies)
    }
}

/// Check the envelope's `success` flag before decoding the payload proper.
fn ensure_success(payload: &Value) -> Result<()> {
    let response: ApiResponse =
        serde_json::from_value(payload.clone()).map_err(|e| Error::validation(e.to_string()))?;
    if !response.success {
        return Err(Error::api(
            response.message.unwrap_or_else(|| "V2EX API error".to_string()),
        ));
    }
    Ok(())
}
