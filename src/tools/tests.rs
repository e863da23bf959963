use super::*;
use serde_json::json;

/// Minimal tool that echoes its query back as a single item.
struct EchoTool;

#[async_trait::async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Echo the query"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": { "type": "string" }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, input: Value) -> Result<Vec<RetrievedItem>> {
        let query = input
            .get("query")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid echo input: missing query"))?;
        Ok(vec![RetrievedItem::new("echo", query)])
    }
}

fn search_config() -> Config {
    let mut config = Config::default();
    config.search.api_key = Some("test-key".to_string());
    config
}

#[tokio::test]
async fn test_registry_with_builtins() {
    let registry = ToolRegistry::with_builtins(&search_config()).unwrap();
    assert_eq!(registry.len(), 1);
    assert!(!registry.is_empty());
    let defs = registry.definitions();
    assert_eq!(defs.len(), 1);
    assert_eq!(defs[0].name, "search");
    assert_eq!(defs[0].parameters["required"][0], "query");
}

#[tokio::test]
async fn test_unknown_tool() {
    let registry = ToolRegistry::with_builtins(&search_config()).unwrap();
    let result = registry.execute("nonexistent_tool", json!({})).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_search_rejects_missing_query() {
    let registry = ToolRegistry::with_builtins(&search_config()).unwrap();
    let result = registry.execute("search", json!({})).await;
    let err = result.unwrap_err().to_string();
    assert!(err.contains("Invalid search input"));
}

#[tokio::test]
async fn test_search_rejects_blank_query() {
    let registry = ToolRegistry::with_builtins(&search_config()).unwrap();
    let result = registry.execute("search", json!({"query": "   "})).await;
    let err = result.unwrap_err().to_string();
    assert!(err.contains("must not be empty"));
}

#[tokio::test]
async fn test_registry_dispatches_by_name() {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(EchoTool));
    let items = registry
        .execute("echo", json!({"query": "hello"}))
        .await
        .unwrap();
    assert_eq!(items, vec![RetrievedItem::new("echo", "hello")]);
}
