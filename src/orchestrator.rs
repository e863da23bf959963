//! The workflow state machine driving the plan→retrieve→summarize loop.
//!
//! Owns the run's message history and tool budget. Alternates Planning and
//! ToolExecution until the planner stops requesting retrieval, then
//! summarizes and terminates. Tool failures and budget exhaustion become
//! history messages fed back to the next planning turn; only contract
//! violations and store I/O end the run early.

use crate::error::WorkflowError;
use crate::message::{History, Message, ToolCall};
use crate::output::Progress;
use crate::planner::{PlanError, Planner};
use crate::provider::LlmClient;
use crate::router::{route, Route};
use crate::store::Store;
use crate::summarizer::Summarizer;
use crate::tools::ToolRegistry;

/// Workflow stages. Every run starts in `Planning`; `Done` is terminal.
enum State {
    Planning,
    ToolExecution(Vec<ToolCall>),
    Summarizing,
    Done(String),
}

/// Tracks tool invocations against the per-run maximum.
///
/// The prompt tells the LLM how many searches remain, but this counter is
/// what actually bounds the run.
#[derive(Debug)]
pub struct Budget {
    used: u32,
    max: u32,
}

impl Budget {
    pub fn new(max: u32) -> Self {
        Self { used: 0, max }
    }

    /// Consumes one invocation if any remain. Returns false once exhausted.
    pub fn try_take(&mut self) -> bool {
        if self.used < self.max {
            self.used += 1;
            true
        } else {
            false
        }
    }

    pub fn used(&self) -> u32 {
        self.used
    }

    pub fn remaining(&self) -> u32 {
        self.max - self.used
    }
}

/// A configured retrieve-then-summarize workflow.
///
/// Holds the collaborators for one run: the LLM, the tool registry, the
/// intermediate store, the invocation budget, and a progress observer.
pub struct Workflow<'a> {
    llm: &'a dyn LlmClient,
    tools: &'a ToolRegistry,
    store: Store,
    budget: Budget,
    progress: &'a mut dyn Progress,
}

impl<'a> Workflow<'a> {
    pub fn new(
        llm: &'a dyn LlmClient,
        tools: &'a ToolRegistry,
        store: Store,
        max_tool_calls: u32,
        progress: &'a mut dyn Progress,
    ) -> Self {
        Self {
            llm,
            tools,
            store,
            budget: Budget::new(max_tool_calls),
            progress,
        }
    }

    /// Runs the workflow to completion and returns the final answer.
    ///
    /// The store is reset first so leftovers from a prior run never leak
    /// into this one. Tool calls within a batch execute sequentially in
    /// request order, keeping store append order deterministic. The caller
    /// receives either the answer text or a single descriptive error.
    pub async fn run(mut self, request: &str) -> Result<String, WorkflowError> {
        self.store.reset()?;

        let planner = Planner::new(self.llm);
        let summarizer = Summarizer::new(self.llm);
        let definitions = self.tools.definitions();

        let mut history = History::new();
        history.add(Message::user(request));

        let mut turn = 0;
        let mut state = State::Planning;
        loop {
            state = match state {
                State::Planning => {
                    turn += 1;
                    self.progress.planning(turn);
                    let snapshot = self.store.read_all()?;
                    match planner
                        .plan(
                            history.messages(),
                            &snapshot,
                            &definitions,
                            self.budget.remaining(),
                        )
                        .await
                    {
                        Ok(output) => {
                            history.add(output.message().clone());
                            match route(&output) {
                                Route::Tool => {
                                    State::ToolExecution(output.message().tool_calls.clone())
                                }
                                Route::Summarize => State::Summarizing,
                            }
                        }
                        Err(PlanError::Unavailable(reason)) => {
                            // Still answer from whatever was retrieved so far.
                            history.add(Message::system(format!(
                                "Planning failed ({}); summarizing with the data retrieved so far.",
                                reason
                            )));
                            State::Summarizing
                        }
                        Err(e @ PlanError::Malformed(_)) => {
                            return Err(WorkflowError::MalformedPlannerOutput(e.to_string()));
                        }
                    }
                }
                State::ToolExecution(batch) => {
                    for call in batch {
                        self.execute_tool(&call, &mut history).await?;
                    }
                    State::Planning
                }
                State::Summarizing => {
                    let items = self.store.read_all()?;
                    self.progress.summarizing(items.len());
                    let answer = summarizer
                        .summarize(request, &items)
                        .await
                        .map_err(|e| WorkflowError::CollaboratorUnavailable(e.to_string()))?;
                    let text = answer.text().to_string();
                    history.add(answer);
                    State::Done(text)
                }
                State::Done(answer) => return Ok(answer),
            };
        }
    }

    /// Handles one requested tool call, or refuses it when the budget is spent.
    ///
    /// Every outcome becomes a tool-result message so the next planning turn
    /// sees what happened; only a store failure propagates.
    async fn execute_tool(
        &mut self,
        call: &ToolCall,
        history: &mut History,
    ) -> Result<(), WorkflowError> {
        self.progress
            .tool_call(&call.name, &call.arguments.to_string());

        if !self.budget.try_take() {
            let notice = format!(
                "Tool budget exhausted ({} call(s) used); no further retrieval is possible. Answer with the information already retrieved.",
                self.budget.used()
            );
            self.progress.tool_failure(&notice);
            history.add(Message::tool_result(&call.id, notice));
            return Ok(());
        }

        match self.tools.execute(&call.name, call.arguments.clone()).await {
            Ok(items) => {
                self.store.append(&items)?;
                self.progress.tool_items(items.len());
                history.add(Message::tool_result(
                    &call.id,
                    format!("Retrieved {} result(s); stored for summarization.", items.len()),
                ));
            }
            Err(e) => {
                let reason = format!("Tool {} failed: {}", call.name, e);
                self.progress.tool_failure(&reason);
                history.add(Message::tool_result(&call.id, reason));
            }
        }
        Ok(())
    }
}
