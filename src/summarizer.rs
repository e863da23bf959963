//! Summarizing stage: turns the retrieved working set into the final answer.
//!
//! Reads the store contents only, never writes. The prompt demands a
//! best-effort answer even when nothing was retrieved, so an empty store
//! produces an "insufficient information" style reply rather than a failure.

use anyhow::Result;

use crate::constants::SUMMARIZER_SYSTEM_PROMPT;
use crate::message::Message;
use crate::provider::LlmClient;
use crate::store::RetrievedItem;

/// Produces the final answer from the original request and the store contents.
pub struct Summarizer<'a> {
    llm: &'a dyn LlmClient,
}

impl<'a> Summarizer<'a> {
    pub fn new(llm: &'a dyn LlmClient) -> Self {
        Self { llm }
    }

    /// Asks the LLM for the final summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the LLM call fails; the orchestrator treats that
    /// as fatal since no answer can be produced without it.
    pub async fn summarize(&self, request: &str, items: &[RetrievedItem]) -> Result<Message> {
        let prompt = build_prompt(request, items);
        let answer = self
            .llm
            .complete(&prompt, Some(SUMMARIZER_SYSTEM_PROMPT))
            .await?;
        Ok(Message::assistant(answer))
    }
}

/// Combines the request with all retrieved content, in insertion order.
fn build_prompt(request: &str, items: &[RetrievedItem]) -> String {
    let retrieved = if items.is_empty() {
        "(nothing was retrieved)".to_string()
    } else {
        items
            .iter()
            .map(|i| i.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    };
    format!(
        "Based on my query:\n{}\n\nAnd the retrieved information below:\n\n{}\n\nWrite a concise, informative summary.",
        request, retrieved
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_items_in_insertion_order() {
        let items = vec![
            RetrievedItem::new("first", "alpha content"),
            RetrievedItem::new("second", "beta content"),
        ];
        let prompt = build_prompt("what happened", &items);
        let alpha = prompt.find("alpha content").unwrap();
        let beta = prompt.find("beta content").unwrap();
        assert!(alpha < beta);
        assert!(prompt.contains("what happened"));
    }

    #[test]
    fn test_prompt_with_empty_store_still_asks_for_an_answer() {
        let prompt = build_prompt("what happened", &[]);
        assert!(prompt.contains("(nothing was retrieved)"));
        assert!(prompt.contains("Write a concise, informative summary."));
    }
}
