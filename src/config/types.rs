//! Struct definitions and serde defaults for gist configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for gist, deserialized from `config.toml`.
///
/// Fields use serde defaults so gist can run with sensible defaults
/// when no config file exists.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Default model identifier (e.g. `"claude-sonnet-4-6"`).
    #[serde(default = "default_model")]
    pub model: String,
    /// Per-provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Default provider name (e.g., "anthropic", "openai").
    #[serde(default)]
    pub default_provider: Option<String>,
    /// Web search settings.
    #[serde(default)]
    pub search: SearchConfig,
    /// Workflow settings.
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

/// Returns the default model identifier.
///
/// Used by serde's `#[serde(default)]` attribute during deserialization.
pub(super) fn default_model() -> String {
    crate::constants::DEFAULT_MODEL.to_string()
}

/// Provider-specific configuration map.
///
/// Each field corresponds to a supported LLM provider. Only providers
/// the user has configured will be `Some`.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ProviderConfig {
    /// Configuration for the OpenAI API provider.
    pub openai: Option<ProviderEntry>,
    /// Configuration for the Anthropic API provider.
    pub anthropic: Option<ProviderEntry>,
    /// Configuration for the local Ollama provider.
    pub ollama: Option<ProviderEntry>,
    /// Configuration for the OpenRouter API provider.
    pub openrouter: Option<ProviderEntry>,
}

/// Connection details for a single LLM provider.
///
/// Allows overriding the API key, endpoint URL, and model on a
/// per-provider basis.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderEntry {
    /// API key for authentication. Can also be set via environment variables.
    pub api_key: Option<String>,
    /// Custom base URL for the provider's API (useful for proxies or self-hosted instances).
    pub base_url: Option<String>,
    /// Model identifier to use with this provider, overriding the global default.
    pub model: Option<String>,
}

/// Configuration for the web search tool.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct SearchConfig {
    /// API key for the search provider. Can also be set via `TAVILY_API_KEY`.
    pub api_key: Option<String>,
    /// Results requested per search (capped at 10).
    pub max_results: Option<u32>,
    /// Search depth passed to the API ("basic" or "advanced").
    pub depth: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Configuration for the workflow run itself.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct WorkflowConfig {
    /// Maximum tool invocations per run.
    pub max_tool_calls: Option<u32>,
    /// Intermediate store file path, overriding the data-directory default.
    pub store_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            provider: ProviderConfig::default(),
            default_provider: None,
            search: SearchConfig::default(),
            workflow: WorkflowConfig::default(),
        }
    }
}
