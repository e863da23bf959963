//! Planning stage: decides whether to retrieve more or hand off to the summarizer.
//!
//! Wraps the LLM call and converts its reply into a [`PlannerOutput`] tagged
//! variant, so downstream routing is an exhaustive match instead of a probe
//! of message internals. The planner is the sole "have we retrieved enough"
//! decision point, and that judgment is delegated to the LLM; the number of
//! planning turns per run is not fixed, only bounded by the tool budget.

use thiserror::Error;

use crate::constants::PLANNER_SYSTEM_PROMPT;
use crate::message::Message;
use crate::provider::LlmClient;
use crate::store::RetrievedItem;
use crate::tools::ToolDefinition;

/// What the planner decided for this turn.
#[derive(Debug)]
pub enum PlannerOutput {
    /// Enough information is available; proceed to the summary.
    Terminal(Message),
    /// Execute the tool calls carried on the message, then plan again.
    ToolBatch(Message),
}

impl PlannerOutput {
    /// The underlying planner message, whichever variant.
    pub fn message(&self) -> &Message {
        match self {
            PlannerOutput::Terminal(m) | PlannerOutput::ToolBatch(m) => m,
        }
    }
}

/// Why a planning turn produced no usable output.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The LLM call itself failed. The run can still summarize what it has.
    #[error("planner call failed: {0}")]
    Unavailable(String),
    /// The reply fits neither the terminal nor the tool-batch shape.
    #[error("{0}")]
    Malformed(String),
}

/// Builds planning prompts and interprets LLM replies.
pub struct Planner<'a> {
    llm: &'a dyn LlmClient,
}

impl<'a> Planner<'a> {
    pub fn new(llm: &'a dyn LlmClient) -> Self {
        Self { llm }
    }

    /// Runs one planning turn over the full history and a store snapshot.
    ///
    /// The snapshot is embedded in the system prompt so the LLM sees what
    /// has already been retrieved and avoids redundant searches. The
    /// remaining-search count is a hint only; the orchestrator enforces the
    /// actual bound.
    pub async fn plan(
        &self,
        history: &[Message],
        snapshot: &[RetrievedItem],
        tools: &[ToolDefinition],
        searches_remaining: u32,
    ) -> Result<PlannerOutput, PlanError> {
        let system = build_system_prompt(snapshot, searches_remaining);
        let reply = self
            .llm
            .generate(&system, history, tools)
            .await
            .map_err(|e| PlanError::Unavailable(e.to_string()))?;
        interpret(reply)
    }
}

/// Renders the planner system prompt with the current store snapshot.
fn build_system_prompt(snapshot: &[RetrievedItem], searches_remaining: u32) -> String {
    let data = if snapshot.is_empty() {
        "none".to_string()
    } else {
        snapshot
            .iter()
            .map(|i| format!("- {}: {}", i.title, i.content))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!(
        "{}\n\nSearches remaining: {}\n\nData retrieved so far:\n{}",
        PLANNER_SYSTEM_PROMPT, searches_remaining, data
    )
}

/// Classifies an LLM reply as terminal or a tool batch.
///
/// A reply with tool calls is a batch; one with only text is terminal.
/// A reply with neither, or with a nameless tool call, is malformed.
fn interpret(reply: Message) -> Result<PlannerOutput, PlanError> {
    if reply.tool_calls.is_empty() {
        if reply.text().trim().is_empty() {
            return Err(PlanError::Malformed(
                "reply carried neither text nor tool requests".to_string(),
            ));
        }
        return Ok(PlannerOutput::Terminal(reply));
    }
    if let Some(call) = reply.tool_calls.iter().find(|c| c.name.trim().is_empty()) {
        return Err(PlanError::Malformed(format!(
            "tool request {} has no tool name",
            call.id
        )));
    }
    Ok(PlannerOutput::ToolBatch(reply))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ToolCall;
    use serde_json::json;

    fn search_call(id: &str) -> ToolCall {
        ToolCall {
            id: id.to_string(),
            name: "search".to_string(),
            arguments: json!({"query": "latest F1 Grand Prix"}),
        }
    }

    #[test]
    fn test_interpret_text_reply_is_terminal() {
        let output = interpret(Message::assistant("enough information")).unwrap();
        assert!(matches!(output, PlannerOutput::Terminal(_)));
    }

    #[test]
    fn test_interpret_tool_calls_are_a_batch() {
        let reply = Message::assistant_with_tools("", vec![search_call("c1"), search_call("c2")]);
        let output = interpret(reply).unwrap();
        match output {
            PlannerOutput::ToolBatch(m) => assert_eq!(m.tool_calls.len(), 2),
            PlannerOutput::Terminal(_) => panic!("expected a tool batch"),
        }
    }

    #[test]
    fn test_interpret_empty_reply_is_malformed() {
        let err = interpret(Message::assistant("  ")).unwrap_err();
        assert!(matches!(err, PlanError::Malformed(_)));
    }

    #[test]
    fn test_interpret_nameless_tool_call_is_malformed() {
        let mut call = search_call("c1");
        call.name = String::new();
        let err = interpret(Message::assistant_with_tools("", vec![call])).unwrap_err();
        assert!(matches!(err, PlanError::Malformed(_)));
    }

    #[test]
    fn test_system_prompt_embeds_snapshot_and_remaining() {
        let snapshot = vec![RetrievedItem::new("race", "Verstappen won")];
        let prompt = build_system_prompt(&snapshot, 2);
        assert!(prompt.contains("Verstappen won"));
        assert!(prompt.contains("Searches remaining: 2"));
    }

    #[test]
    fn test_system_prompt_with_empty_snapshot() {
        let prompt = build_system_prompt(&[], 3);
        assert!(prompt.contains("Data retrieved so far:\nnone"));
    }
}
