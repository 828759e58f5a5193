//! Integration tests for the OpenAI-compatible provider against a mock API.

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vxa_core::{CompletionRequest, FinishReason, Message, Provider};
use vxa_providers::OpenAIProvider;

#[tokio::test]
async fn test_complete_plain_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "gpt-4o",
            "choices": [{
                "message": {"role": "assistant", "content": "The analysis."},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3}
        })))
        .mount(&server)
        .await;

    let provider = OpenAIProvider::new("test-key").with_base_url(server.uri());
    let response = provider
        .complete(CompletionRequest::new(vec![Message::user("hi")]))
        .await
        .expect("complete failed");

    assert_eq!(response.message.content, "The analysis.");
    assert_eq!(response.finish_reason, FinishReason::Stop);
    assert_eq!(response.usage.total_tokens, 15);
}

#[tokio::test]
async fn test_complete_decodes_tool_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "gpt-4o",
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call-1",
                        "type": "function",
                        "function": {
                            "name": "get_topic_bundle",
                            "arguments": "{\"topic_id\": 42, \"max_pages\": 2}"
                        }
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        })))
        .mount(&server)
        .await;

    let provider = OpenAIProvider::new("test-key").with_base_url(server.uri());
    let response = provider
        .complete(CompletionRequest::new(vec![Message::user("analyze 42")]))
        .await
        .expect("complete failed");

    assert_eq!(response.finish_reason, FinishReason::ToolCalls);
    let call = &response.message.tool_calls[0];
    assert_eq!(call.name, "get_topic_bundle");
    assert_eq!(call.arguments["topic_id"], 42);
}

#[tokio::test]
async fn test_complete_maps_auth_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"error": {"message": "Invalid API key"}})),
        )
        .mount(&server)
        .await;

    let provider = OpenAIProvider::new("bad-key").with_base_url(server.uri());
    let result = provider
        .complete(CompletionRequest::new(vec![Message::user("hi")]))
        .await;
    assert!(matches!(result, Err(vxa_core::Error::Auth(_))));
}
