//! Centralized constants for gist.
//!
//! All magic numbers, default strings, and configuration constants live here
//! so they can be changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "gist";

/// Default LLM model identifier.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-6";

/// Maximum tokens for LLM completions.
pub const MAX_TOKENS: u64 = 4096;

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Per-project configuration filename.
pub const PROJECT_CONFIG_FILENAME: &str = "gist.toml";

/// Default LLM model identifier for OpenAI.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4.1";

/// Default LLM model identifier for OpenRouter.
pub const DEFAULT_OPENROUTER_MODEL: &str = "arcee-ai/trinity-large-preview:free";

/// Default base URL for local Ollama server.
pub const OLLAMA_DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default LLM model identifier for Ollama.
pub const OLLAMA_DEFAULT_MODEL: &str = "llama3";

// --- Workflow limits ---

/// Maximum tool invocations per run when not configured.
pub const DEFAULT_MAX_TOOL_CALLS: u32 = 3;

// --- Intermediate store ---

/// Filename of the intermediate store under the data directory.
pub const STORE_FILENAME: &str = "retrieved.json";

// --- Search tool ---

/// Name the LLM uses to call the search tool.
pub const SEARCH_TOOL_NAME: &str = "search";

/// Tavily search endpoint.
pub const SEARCH_API_URL: &str = "https://api.tavily.com/search";

/// Default number of results requested per search.
pub const SEARCH_DEFAULT_RESULTS: u32 = 3;

/// Upper bound on results per search.
pub const SEARCH_MAX_RESULTS: u32 = 10;

/// Default search depth requested from the API.
pub const SEARCH_DEFAULT_DEPTH: &str = "advanced";

/// Request timeout for search calls, in seconds.
pub const SEARCH_TIMEOUT_SECS: u64 = 20;

// --- Prompts ---

/// System prompt for planning turns. The store snapshot and remaining-search
/// count are appended per turn; the hard invocation bound is enforced by the
/// orchestrator's counter, not by this text.
pub const PLANNER_SYSTEM_PROMPT: &str = "You are a planning agent. \
The user wants a summary of a recent event or topic. Decide what information \
must be retrieved from the web with the `search` tool so the summary can be \
accurate and current. Call the tool only when the data retrieved so far does \
not already cover the request; when it does, reply with a short confirmation \
that enough information is available instead of calling the tool.";

/// System prompt for the summarizing turn.
pub const SUMMARIZER_SYSTEM_PROMPT: &str = "You are a summarizer agent. \
You receive information retrieved from the web and write a concise, accurate \
summary answering the user's request. If no retrieved information is \
available, say so and answer from general knowledge as best you can.";
