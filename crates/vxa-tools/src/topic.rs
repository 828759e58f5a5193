//! Tool exposing the topic bundle builder to the agent loop.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use vxa_core::{Error, PropertySchema, Tool, ToolDefinition, ToolOutput, ToolParameters};
use vxa_v2ex::V2exClient;

pub struct TopicBundleTool {
    client: V2exClient,
}

impl TopicBundleTool {
    pub fn new(client: V2exClient) -> Self {
        Self { client }
    }
}

fn default_max_pages() -> u32 {
    1
}

#[derive(Deserialize)]
struct TopicBundleArgs {
    topic_id: u64,
    #[serde(default = "default_max_pages")]
    max_pages: u32,
}

#[async_trait]
impl Tool for TopicBundleTool {
    fn name(&self) -> &str {
        "get_topic_bundle"
    }

    fn description(&self) -> &str {
        "Fetch a V2EX topic and its replies, formatted for analysis."
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description()).with_parameters(
            ToolParameters::new()
                .add_property(
                    "topic_id",
                    PropertySchema::integer("Id of the V2EX topic to fetch"),
                    true,
                )
                .add_property(
                    "max_pages",
                    PropertySchema::integer("Maximum reply pages to fetch")
                        .with_default(serde_json::json!(1)),
                    false,
                ),
        )
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolOutput, Error> {
        let args: TopicBundleArgs = serde_json::from_value(arguments)
            .map_err(|e| Error::tool("get_topic_bundle", format!("Invalid arguments: {}", e)))?;

        info!(topic_id = args.topic_id, max_pages = args.max_pages, "Building topic bundle");

        // Fetch failures keep their original kind so the run aborts typed
        // rather than feeding the agent a half-loaded thread.
        let bundle = self.client.build_bundle(args.topic_id, args.max_pages).await?;
        Ok(ToolOutput::success(bundle))
    }
}

/// Create all topic tools.
pub fn create_topic_tools(client: V2exClient) -> Vec<Box<dyn Tool>> {
    vec![Box::new(TopicBundleTool::new(client))]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_schema() {
        let tool = TopicBundleTool::new(V2exClient::new("token"));
        let def = tool.definition();
        assert_eq!(def.name, "get_topic_bundle");
        assert!(def.parameters.required.contains(&"topic_id".to_string()));
        assert!(!def.parameters.required.contains(&"max_pages".to_string()));
        assert_eq!(
            def.parameters.properties["max_pages"].default,
            Some(serde_json::json!(1))
        );
    }

    #[tokio::test]
    async fn test_invalid_arguments_are_a_tool_error() {
        let tool = TopicBundleTool::new(V2exClient::new("token"));
        let result = tool
            .execute(serde_json::json!({"topic_id": "not a number"}))
            .await;
        assert!(matches!(result, Err(Error::Tool { .. })));
    }

    #[test]
    fn test_max_pages_defaults_to_one() {
        let args: TopicBundleArgs =
            serde_json::from_value(serde_json::json!({"topic_id": 42})).unwrap();
        assert_eq!(args.topic_id, 42);
        assert_eq!(args.max_pages, 1);
    }
}
