//! Web search tool backed by the Tavily API.
//!
//! Sends the planner's query to Tavily and maps each result to a
//! title/content pair for the intermediate store. Requests carry a bounded
//! timeout; a timeout or non-success status is an ordinary failure the
//! workflow records and feeds back to the planner.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

use super::Tool;

use crate::config::Config;
use crate::constants::{SEARCH_API_URL, SEARCH_MAX_RESULTS, SEARCH_TOOL_NAME};
use crate::store::RetrievedItem;

/// Tool that searches the web for real-time information.
///
/// Result count and search depth come from config; the count is capped at
/// [`SEARCH_MAX_RESULTS`] to keep responses bounded.
pub struct SearchTool {
    client: Client,
    api_key: String,
    max_results: u32,
    depth: String,
}

#[derive(Deserialize)]
struct SearchInput {
    query: String,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: u32,
    search_depth: &'a str,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

impl SearchTool {
    /// Builds the tool from config: API key, result count, depth, timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if no Tavily API key is configured or the HTTP
    /// client cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.resolve_search_api_key().context(
            "No API key found for Tavily. Set TAVILY_API_KEY or configure it in config.toml",
        )?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.search_timeout_secs()))
            .build()
            .context("Failed to create search HTTP client")?;
        Ok(Self {
            client,
            api_key,
            max_results: config.search_max_results().min(SEARCH_MAX_RESULTS),
            depth: config.search_depth(),
        })
    }

    async fn search(&self, query: &str) -> Result<Vec<RetrievedItem>> {
        let request = SearchRequest {
            api_key: &self.api_key,
            query,
            max_results: self.max_results,
            search_depth: &self.depth,
        };
        let response = self
            .client
            .post(SEARCH_API_URL)
            .json(&request)
            .send()
            .await
            .context("Search request failed")?;
        anyhow::ensure!(
            response.status().is_success(),
            "Search API returned HTTP {}",
            response.status()
        );
        let body: SearchResponse = response
            .json()
            .await
            .context("Search response was not valid JSON")?;
        Ok(body
            .results
            .into_iter()
            .map(|r| RetrievedItem::new(r.title, r.content))
            .collect())
    }
}

#[async_trait::async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        SEARCH_TOOL_NAME
    }

    fn description(&self) -> &str {
        "Search the web for information related to the query, providing real-time data to help with the summarization."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Topic to search for"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, input: Value) -> Result<Vec<RetrievedItem>> {
        let input: SearchInput = serde_json::from_value(input)
            .map_err(|e| anyhow::anyhow!("Invalid search input: {}", e))?;
        let query = input.query.trim();
        anyhow::ensure!(!query.is_empty(), "Search query must not be empty");
        self.search(query).await
    }
}
