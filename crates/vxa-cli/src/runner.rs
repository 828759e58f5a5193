//! The agentic run loop: completion turns, streamed output, tool execution.

use std::io::Write;

use anyhow::Result;
use futures::StreamExt;
use tracing::{debug, info};

use vxa_agents::InternalAgent;
use vxa_core::{CompletionRequest, Message, Provider, StreamChunk, ToolCall, ToolRegistry};

pub struct RunOptions {
    pub model: Option<String>,
    /// Print content deltas to stdout as they arrive.
    pub stream_output: bool,
}

/// A tool call being reassembled from stream deltas.
struct PendingToolCall {
    id: String,
    name: String,
    arguments: String,
}

/// Drive the agent until it produces a final answer.
///
/// Each turn sends the full history plus the tool definitions. Tool calls
/// execute sequentially and their outputs go back as tool-result messages;
/// a turn without tool calls is the final analysis. Tool failures abort the
/// run with their original error kind.
pub async fn run_analysis(
    provider: &dyn Provider,
    tools: &ToolRegistry,
    agent: &dyn InternalAgent,
    topic_id: u64,
    max_pages: u32,
    options: &RunOptions,
) -> Result<String> {
    let mut messages = vec![
        Message::system(agent.system_prompt()),
        Message::user(format!("topic_id={}, max_pages={}", topic_id, max_pages)),
    ];

    for turn in 0..agent.max_turns() {
        let mut request =
            CompletionRequest::new(messages.clone()).with_tools(tools.definitions());
        if let Some(model) = &options.model {
            request = request.with_model(model.as_str());
        }

        let (content, tool_calls) = if options.stream_output {
            stream_turn(provider, request).await?
        } else {
            let response = provider.complete(request).await?;
            (response.message.content, response.message.tool_calls)
        };

        if tool_calls.is_empty() {
            if !options.stream_output && !content.is_empty() {
                println!("{}", content);
            }
            info!(turns = turn + 1, "Analysis complete");
            return Ok(content.trim().to_string());
        }

        messages.push(Message::assistant_with_tool_calls(
            content,
            tool_calls.clone(),
        ));

        for tool_call in tool_calls {
            debug!(
                tool = %tool_call.name,
                arguments = %tool_call.arguments,
                "Executing tool"
            );
            let tool = tools
                .get(&tool_call.name)
                .ok_or_else(|| vxa_core::Error::tool(tool_call.name.clone(), "Unknown tool"))?;
            let output = tool.execute(tool_call.arguments.clone()).await?;
            debug!(
                tool = %tool_call.name,
                result_len = output.content.len(),
                is_error = output.is_error,
                "Tool result"
            );
            messages.push(Message::tool_result(&tool_call.id, output.content));
        }
    }

    anyhow::bail!(
        "Max turns ({}) reached without a final answer",
        agent.max_turns()
    )
}

/// Consume one streamed turn, printing content deltas and reassembling any
/// tool calls from their start/delta chunks.
async fn stream_turn(
    provider: &dyn Provider,
    request: CompletionRequest,
) -> Result<(String, Vec<ToolCall>)> {
    let mut stream = provider.stream(request).await?;
    let mut content = String::new();
    let mut pending: Vec<PendingToolCall> = Vec::new();

    while let Some(chunk) = stream.next().await {
        match chunk? {
            StreamChunk::Delta { content: delta } => {
                print!("{}", delta);
                std::io::stdout().flush().ok();
                content.push_str(&delta);
            }
            StreamChunk::ToolCallStart { id, name } => {
                pending.push(PendingToolCall {
                    id,
                    name,
                    arguments: String::new(),
                });
            }
            StreamChunk::ToolCallDelta { arguments } => {
                if let Some(call) = pending.last_mut() {
                    call.arguments.push_str(&arguments);
                }
            }
            StreamChunk::Done { usage } => {
                if let Some(usage) = usage {
                    info!(
                        prompt_tokens = usage.prompt_tokens,
                        completion_tokens = usage.completion_tokens,
                        total_tokens = usage.total_tokens,
                        "Turn finished"
                    );
                }
                break;
            }
        }
    }
    if !content.is_empty() {
        println!();
    }

    let tool_calls = pending
        .into_iter()
        .map(|call| {
            let arguments = if call.arguments.is_empty() {
                serde_json::Value::Object(Default::default())
            } else {
                serde_json::from_str(&call.arguments).map_err(|e| {
                    vxa_core::Error::stream(format!(
                        "Malformed tool arguments for {}: {}",
                        call.name, e
                    ))
                })?
            };
            Ok(ToolCall::new(call.id, call.name, arguments))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((content, tool_calls))
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use vxa_providers::OpenAIProvider;
    use vxa_tools::create_topic_tools;
    use vxa_v2ex::V2exClient;

    struct TestAgent {
        max_turns: usize,
    }

    impl InternalAgent for TestAgent {
        fn name(&self) -> &str {
            "test"
        }

        fn description(&self) -> &str {
            "test agent"
        }

        fn system_prompt(&self) -> &str {
            "Call get_topic_bundle, then report."
        }

        fn tool_names(&self) -> &[&str] {
            &["get_topic_bundle"]
        }

        fn max_turns(&self) -> usize {
            self.max_turns
        }
    }

    fn tool_call_response() -> serde_json::Value {
        json!({
            "model": "test-model",
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call-1",
                        "type": "function",
                        "function": {
                            "name": "get_topic_bundle",
                            "arguments": "{\"topic_id\": 7, \"max_pages\": 1}"
                        }
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        })
    }

    fn final_response(content: &str) -> serde_json::Value {
        json!({
            "model": "test-model",
            "choices": [{
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
    }

    async fn mount_forum(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/topics/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "result": {"id": 7, "title": "Hello", "content": "Body"}
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/topics/7/replies"))
            .and(query_param("p", "1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"success": true, "result": []})),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_run_executes_tool_then_returns_final_answer() {
        let llm = MockServer::start().await;
        let forum = MockServer::start().await;
        mount_forum(&forum).await;

        // First completion asks for the tool, second delivers the report.
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tool_call_response()))
            .up_to_n_times(1)
            .mount(&llm)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(final_response("Final report.")))
            .mount(&llm)
            .await;

        let provider = OpenAIProvider::new("test-key").with_base_url(llm.uri());
        let mut tools = ToolRegistry::new();
        for tool in create_topic_tools(V2exClient::new("token").with_api_base(forum.uri())) {
            tools.register(tool);
        }
        let agent = TestAgent { max_turns: 5 };
        let options = RunOptions {
            model: Some("test-model".to_string()),
            stream_output: false,
        };

        let analysis = run_analysis(&provider, &tools, &agent, 7, 1, &options)
            .await
            .expect("run_analysis failed");
        assert_eq!(analysis, "Final report.");
    }

    #[tokio::test]
    async fn test_run_aborts_on_tool_failure() {
        let llm = MockServer::start().await;
        let forum = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/topics/7"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": false, "message": "Rate limited"})),
            )
            .mount(&forum)
            .await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tool_call_response()))
            .mount(&llm)
            .await;

        let provider = OpenAIProvider::new("test-key").with_base_url(llm.uri());
        let mut tools = ToolRegistry::new();
        for tool in create_topic_tools(V2exClient::new("token").with_api_base(forum.uri())) {
            tools.register(tool);
        }
        let agent = TestAgent { max_turns: 5 };
        let options = RunOptions {
            model: None,
            stream_output: false,
        };

        let err = run_analysis(&provider, &tools, &agent, 7, 1, &options)
            .await
            .expect_err("expected tool failure to abort the run");
        match err.downcast_ref::<vxa_core::Error>() {
            Some(vxa_core::Error::Api(message)) => assert_eq!(message, "Rate limited"),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_run_stops_at_max_turns() {
        let llm = MockServer::start().await;
        let forum = MockServer::start().await;
        mount_forum(&forum).await;

        // The model never stops asking for the tool.
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tool_call_response()))
            .mount(&llm)
            .await;

        let provider = OpenAIProvider::new("test-key").with_base_url(llm.uri());
        let mut tools = ToolRegistry::new();
        for tool in create_topic_tools(V2exClient::new("token").with_api_base(forum.uri())) {
            tools.register(tool);
        }
        let agent = TestAgent { max_turns: 2 };
        let options = RunOptions {
            model: None,
            stream_output: false,
        };

        let err = run_analysis(&provider, &tools, &agent, 7, 1, &options)
            .await
            .expect_err("expected max turns to be enforced");
        assert!(err.to_string().contains("Max turns"));
    }
}
