//! Error types for the workflow core.
//!
//! Only conditions that end a run appear here. Tool failures and budget
//! exhaustion are deliberately absent: those are encoded as history messages
//! and fed back into the next planning turn so the workflow can adapt.

use thiserror::Error;

/// Errors that terminate a workflow run.
///
/// The caller always receives either a final answer string or exactly one of
/// these, never a partial state.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The summarizing LLM call failed, so no answer can be produced.
    /// A planner-stage failure is recovered instead (see the orchestrator).
    #[error("summarizer call failed: {0}")]
    CollaboratorUnavailable(String),

    /// The planner reply was neither an answer nor a usable tool-request
    /// batch, a contract violation the core cannot safely interpret.
    #[error("planner produced unusable output: {0}")]
    MalformedPlannerOutput(String),

    /// The intermediate store could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised by the intermediate store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file could not be read, written, or created.
    #[error("failed to access store file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The store file exists but does not contain a valid item list.
    #[error("store file {path} is not a valid item list: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
