//! Pure text rendering of topics and replies.
//!
//! The formatter never fails: missing optional data degrades through
//! fallback chains to a caller-supplied default instead of erroring.

use crate::model::{Reply, Topic};

/// First candidate that is present and not empty/whitespace-only; otherwise
/// the default.
pub fn pick_first(values: &[Option<String>], default: &str) -> String {
    for value in values.iter().flatten() {
        if value.trim().is_empty() {
            continue;
        }
        return value.clone();
    }
    default.to_string()
}

/// Bound `text` to `max_chars` characters, replacing the tail with `...`.
/// Counting is per Unicode scalar value, not per byte.
pub fn truncate(text: &str, max_chars: Option<usize>) -> String {
    match max_chars {
        Some(max) if text.chars().count() > max => {
            let head: String = text.chars().take(max.saturating_sub(3)).collect();
            format!("{}...", head)
        }
        _ => text.to_string(),
    }
}

pub fn format_topic(topic: &Topic, max_chars: Option<usize>) -> String {
    let title = pick_first(&[topic.title.clone()], "");
    let content = pick_first(
        &[topic.content.clone(), topic.content_rendered.clone()],
        "",
    );
    let node = pick_first(
        &[
            topic.node.as_ref().and_then(|n| n.title.clone()),
            topic.node.as_ref().and_then(|n| n.name.clone()),
            topic.node_id.map(|id| id.to_string()),
        ],
        "",
    );
    let author = pick_first(
        &[
            topic.member.as_ref().and_then(|m| m.username.clone()),
            topic.member.as_ref().and_then(|m| m.name.clone()),
            topic.member.as_ref().map(|m| m.id.to_string()),
        ],
        "",
    );
    let created = pick_first(
        &[
            topic.created.map(|c| c.to_string()),
            topic.created_at.map(|c| c.to_string()),
        ],
        "",
    );
    [
        format!("Title: {}", title),
        format!("Author: {}", author),
        format!("Node: {}", node),
        format!("Created: {}", created),
        format!("Content:\n{}", truncate(&content, max_chars)),
    ]
    .join("\n")
    .trim()
    .to_string()
}

pub fn format_replies(replies: &[Reply], max_chars: Option<usize>) -> String {
    let mut blocks: Vec<String> = Vec::new();
    for (idx, reply) in replies.iter().enumerate() {
        let author = pick_first(
            &[
                reply.member.as_ref().and_then(|m| m.username.clone()),
                reply.member.as_ref().and_then(|m| m.name.clone()),
                reply.member.as_ref().map(|m| m.id.to_string()),
            ],
            "",
        );
        let created = pick_first(
            &[
                reply.created.map(|c| c.to_string()),
                reply.created_at.map(|c| c.to_string()),
            ],
            "",
        );
        let content = pick_first(
            &[reply.content.clone(), reply.content_rendered.clone()],
            "",
        );
        blocks.push(
            [
                format!("[{}] Author: {}", idx + 1, author),
                format!("Created: {}", created),
                format!("Content:\n{}", truncate(&content, max_chars)),
            ]
            .join("\n"),
        );
    }
    blocks.join("\n\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(value: serde_json::Value) -> Topic {
        serde_json::from_value(value).unwrap()
    }

    fn reply(value: serde_json::Value) -> Reply {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_pick_first_skips_empty_and_absent() {
        let picked = pick_first(
            &[
                Some("".to_string()),
                None,
                Some("x".to_string()),
                Some("y".to_string()),
            ],
            "",
        );
        assert_eq!(picked, "x");
    }

    #[test]
    fn test_pick_first_whitespace_only_is_skipped() {
        let picked = pick_first(&[Some("   ".to_string()), Some("z".to_string())], "");
        assert_eq!(picked, "z");
    }

    #[test]
    fn test_pick_first_all_absent_yields_default() {
        assert_eq!(pick_first(&[None, Some("".to_string())], ""), "");
        assert_eq!(pick_first(&[None], "fallback"), "fallback");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello world", Some(5)), "he...");
        assert_eq!(truncate("hi", Some(10)), "hi");
        assert_eq!(truncate("hello", None), "hello");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        // Five CJK characters are 15 UTF-8 bytes but 5 chars; within bound.
        assert_eq!(truncate("你好世界啊", Some(5)), "你好世界啊");
        assert_eq!(truncate("你好世界啊呀", Some(5)), "你好...");
    }

    #[test]
    fn test_format_topic_fallback_chains() {
        let t = topic(serde_json::json!({
            "id": 10,
            "title": "A title",
            "content_rendered": "<p>rendered</p>",
            "member": {"id": 99},
            "node_id": 7,
            "created_at": 1700000000
        }));
        let text = format_topic(&t, None);
        assert!(text.contains("Title: A title"));
        // member has no username/name, falls back to id
        assert!(text.contains("Author: 99"));
        // no node embedded, falls back to node_id
        assert!(text.contains("Node: 7"));
        // created absent, created_at used
        assert!(text.contains("Created: 1700000000"));
        // content absent, content_rendered used
        assert!(text.contains("Content:\n<p>rendered</p>"));
    }

    #[test]
    fn test_format_topic_prefers_created_over_created_at() {
        let t = topic(serde_json::json!({
            "id": 1,
            "created": 111,
            "created_at": 222
        }));
        assert!(format_topic(&t, None).contains("Created: 111"));
    }

    #[test]
    fn test_format_topic_prefers_node_title_over_name() {
        let t = topic(serde_json::json!({
            "id": 1,
            "node": {"id": 3, "name": "tech", "title": "Technology"}
        }));
        assert!(format_topic(&t, None).contains("Node: Technology"));
    }

    #[test]
    fn test_format_topic_truncates_content() {
        let t = topic(serde_json::json!({
            "id": 1,
            "content": "hello world"
        }));
        assert!(format_topic(&t, Some(5)).contains("Content:\nhe..."));
    }

    #[test]
    fn test_format_replies_numbered_blocks() {
        let replies = vec![
            reply(serde_json::json!({
                "id": 1,
                "content": "first",
                "member": {"id": 5, "username": "alice"},
                "created": 100
            })),
            reply(serde_json::json!({
                "id": 2,
                "content_rendered": "second",
                "member": {"id": 6}
            })),
        ];
        let text = format_replies(&replies, None);
        assert!(text.contains("[1] Author: alice"));
        assert!(text.contains("Created: 100"));
        assert!(text.contains("[2] Author: 6"));
        assert!(text.contains("Content:\nsecond"));
        // blocks separated by a blank line
        assert!(text.contains("\n\n[2]"));
    }

    #[test]
    fn test_format_replies_empty_input() {
        assert_eq!(format_replies(&[], None), "");
    }
}
