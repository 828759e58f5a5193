//! End-to-end test of the topic bundle tool against a mocked API.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vxa_core::Tool;
use vxa_tools::TopicBundleTool;
use vxa_v2ex::V2exClient;

#[tokio::test]
async fn test_execute_returns_bundle_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/topics/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": {"id": 7, "title": "Hello", "content": "Body"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/topics/7/replies"))
        .and(query_param("p", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "result": []})),
        )
        .mount(&server)
        .await;

    let client = V2exClient::new("token").with_api_base(server.uri());
    let tool = TopicBundleTool::new(client);

    let output = tool
        .execute(json!({"topic_id": 7}))
        .await
        .expect("tool execution failed");

    assert!(!output.is_error);
    assert!(output.content.contains("Title: Hello"));
    assert!(output.content.contains("No replies."));
}

#[tokio::test]
async fn test_execute_propagates_client_errors_typed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/topics/7"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "Rate limited"})),
        )
        .mount(&server)
        .await;

    let client = V2exClient::new("token").with_api_base(server.uri());
    let tool = TopicBundleTool::new(client);

    match tool.execute(json!({"topic_id": 7})).await {
        Err(vxa_core::Error::Api(message)) => assert_eq!(message, "Rate limited"),
        other => panic!("expected Api error, got {:?}", other),
    }
}
