//! Assembly of the combined topic + replies text bundle.

use vxa_core::Result;

use crate::client::V2exClient;
use crate::format::{format_replies, format_topic};

pub const TOPIC_HEADER: &str = "文章内容（主题）:";
pub const REPLIES_HEADER: &str = "评论:";

impl V2exClient {
    /// Fetch and format one topic with up to `max_pages` pages of replies.
    ///
    /// The HTTP session lives only for the duration of this call and is
    /// dropped whether or not the fetches succeed. Formatting is
    /// untruncated; the downstream consumer sees the full thread.
    pub async fn build_bundle(&self, topic_id: u64, max_pages: u32) -> Result<String> {
        let (topic, replies) = {
            let http = reqwest::Client::new();
            let topic = self.fetch_topic(&http, topic_id).await?;
            let replies = self
                .fetch_replies(&http, topic_id, max_pages, None)
                .await?;
            (topic, replies)
        };

        let topic_text = format_topic(&topic, None);
        let replies_text = format_replies(&replies, None);

        let sections = [
            TOPIC_HEADER.to_string(),
            if topic_text.is_empty() {
                "N/A".to_string()
            } else {
                topic_text
            },
            String::new(),
            REPLIES_HEADER.to_string(),
            if replies_text.is_empty() {
                "No replies.".to_string()
            } else {
                replies_text
            },
        ];
        Ok(sections.join("\n\n").trim().to_string())
    }
}
