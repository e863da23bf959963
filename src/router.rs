//! Routing: maps the planner's latest output to the next workflow stage.
//!
//! Deliberately a pure function over the tagged [`PlannerOutput`]: the
//! decision is total and deterministic, inspects no other state, and is
//! testable in isolation.

use crate::planner::PlannerOutput;

/// The stage the workflow moves to after a planning turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Hand off to the summarizer.
    Summarize,
    /// Execute the requested tool batch, then plan again.
    Tool,
}

/// Decides the next stage from the planner's output alone.
pub fn route(output: &PlannerOutput) -> Route {
    match output {
        PlannerOutput::Terminal(_) => Route::Summarize,
        PlannerOutput::ToolBatch(_) => Route::Tool,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Message, ToolCall};
    use serde_json::json;

    #[test]
    fn test_terminal_routes_to_summarize() {
        let output = PlannerOutput::Terminal(Message::assistant("done"));
        assert_eq!(route(&output), Route::Summarize);
    }

    #[test]
    fn test_tool_batch_routes_to_tool() {
        let output = PlannerOutput::ToolBatch(Message::assistant_with_tools(
            "",
            vec![ToolCall {
                id: "c1".to_string(),
                name: "search".to_string(),
                arguments: json!({"query": "x"}),
            }],
        ));
        assert_eq!(route(&output), Route::Tool);
    }

    #[test]
    fn test_route_ignores_message_content() {
        // Same decision regardless of how much text the message carries.
        let short = PlannerOutput::Terminal(Message::assistant("k"));
        let long = PlannerOutput::Terminal(Message::assistant("k".repeat(10_000)));
        assert_eq!(route(&short), route(&long));
    }
}
