//! Message types and run history for gist's workflow.
//!
//! Provides a structured [`Message`] type with [`Role`] and [`Content`] enums
//! that represent workflow turns, and [`History`], the ordered per-run
//! message sequence with an append-or-replace merge rule keyed on message id.
//! These are gist's internal types, converted to provider-specific formats
//! (e.g. rig-core's `Message`) when sent to the LLM.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A tool invocation requested by the LLM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this tool call (used to match results).
    pub id: String,
    /// Name of the tool to invoke.
    pub name: String,
    /// JSON arguments to pass to the tool.
    pub arguments: Value,
}

/// A single message in a run's history.
///
/// Contains a [`Role`] indicating who produced the message and [`Content`]
/// representing the message body. A planner message carries zero tool calls
/// (terminal candidate) or one-to-many (continuation candidate), never an
/// ambiguous mix of meaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Content,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    /// Identifier [`History::add`] uses to replace rather than append.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// The role of a message sender in the run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A note recorded by the workflow itself (e.g. a planner outage).
    System,
    /// The user's request.
    User,
    /// Planner output.
    Assistant,
    /// A tool result fed back to the planner.
    Tool,
}

/// Message content, currently text-only but structured for future multimodal support.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Content::Text(text.into()),
            tool_calls: Vec::new(),
            tool_call_id: None,
            id: Some(Uuid::new_v4().to_string()),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::assistant_with_tools(text, Vec::new())
    }

    /// Creates a planner message carrying the tool calls the LLM requested.
    pub fn assistant_with_tools(text: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: Role::Assistant,
            content: Content::Text(text.into()),
            tool_calls,
            tool_call_id: None,
            id: Some(Uuid::new_v4().to_string()),
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: Content::Text(text.into()),
            tool_calls: Vec::new(),
            tool_call_id: None,
            id: Some(Uuid::new_v4().to_string()),
        }
    }

    /// Creates a tool result message to feed back to the planner.
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: Content::Text(content.into()),
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_call_id.into()),
            id: Some(Uuid::new_v4().to_string()),
        }
    }

    pub fn text(&self) -> &str {
        match &self.content {
            Content::Text(s) => s,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "note"),
            Role::User => write!(f, "you"),
            Role::Assistant => write!(f, "planner"),
            Role::Tool => write!(f, "tool"),
        }
    }
}

/// Ordered message history for a single run.
///
/// Owned by the orchestrator for the run's lifetime and discarded with it.
/// One merge rule on [`History::add`]: a message whose id matches an existing
/// message replaces it in place; everything else is appended in arrival order.
#[derive(Debug, Default)]
pub struct History {
    messages: Vec<Message>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message, replacing in place when the id is already present.
    pub fn add(&mut self, msg: Message) {
        if let Some(id) = msg.id.as_deref() {
            if let Some(existing) = self
                .messages
                .iter_mut()
                .find(|m| m.id.as_deref() == Some(id))
            {
                *existing = msg;
                return;
            }
        }
        self.messages.push(msg);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_appends_in_order() {
        let mut history = History::new();
        history.add(Message::user("first"));
        history.add(Message::assistant("second"));
        history.add(Message::tool_result("call-1", "third"));

        let texts: Vec<&str> = history.messages().iter().map(|m| m.text()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_add_replaces_matching_id_in_place() {
        let mut history = History::new();
        history.add(Message::user("request"));
        let draft = Message::assistant("draft");
        let id = draft.id.clone();
        history.add(draft);
        history.add(Message::tool_result("call-1", "result"));

        let mut revised = Message::assistant("revised");
        revised.id = id;
        history.add(revised);

        assert_eq!(history.messages().len(), 3);
        assert_eq!(history.messages()[1].text(), "revised");
        assert_eq!(history.messages()[2].text(), "result");
    }

    #[test]
    fn test_add_without_id_always_appends() {
        let mut history = History::new();
        let mut a = Message::user("a");
        a.id = None;
        let mut b = Message::user("b");
        b.id = None;
        history.add(a);
        history.add(b);
        assert_eq!(history.messages().len(), 2);
    }

    #[test]
    fn test_planner_message_tool_calls_are_unambiguous() {
        let terminal = Message::assistant("done");
        assert!(terminal.tool_calls.is_empty());

        let batch = Message::assistant_with_tools(
            "",
            vec![ToolCall {
                id: "call-1".to_string(),
                name: "search".to_string(),
                arguments: serde_json::json!({"query": "x"}),
            }],
        );
        assert_eq!(batch.tool_calls.len(), 1);
    }
}
