//! LLM provider abstraction for gist.
//!
//! Wraps rig-core's provider clients behind a [`Provider`] struct with enum
//! dispatch, keeping provider-specific details out of the workflow layer.
//! Supports Anthropic, OpenAI, OpenRouter, and Ollama (local) via
//! [`ProviderKind`]. The [`LlmClient`] trait is the seam the planner and
//! summarizer depend on, so tests can script replies without network access.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::{CompletionModel, CompletionRequest, Prompt};
use rig::message::{AssistantContent, Message as RigMessage};
use rig::one_or_many::OneOrMany;
use rig::providers::{anthropic, openai, openrouter};

use crate::config::Config;
use crate::message::{Message, Role, ToolCall};
use crate::tools::ToolDefinition;

/// Default provider name when nothing is configured.
const DEFAULT_PROVIDER: &str = "anthropic";

/// The reasoning collaborator the planner and summarizer delegate to.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Single-prompt completion with an optional system prompt.
    async fn complete(&self, prompt: &str, system_prompt: Option<&str>) -> Result<String>;

    /// Full-history completion that may request tool calls.
    ///
    /// Tool calls in the reply are surfaced as-is on the returned message;
    /// interpreting them is the planner's job.
    async fn generate(
        &self,
        system_prompt: &str,
        history: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<Message>;
}

/// Resolved provider + model pair.
pub struct ModelSelection {
    pub provider: ProviderKind,
    pub model: String,
}

/// Identifies which LLM provider to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Anthropic (Claude models).
    Anthropic,
    /// OpenAI (GPT models).
    OpenAI,
    /// OpenRouter (multi-provider gateway).
    OpenRouter,
    /// Ollama (local models via OpenAI-compatible API).
    Ollama,
}

impl ProviderKind {
    /// Parses a provider name string into a [`ProviderKind`].
    ///
    /// Matching is case-insensitive. Returns an error for unknown providers.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "anthropic" => Ok(Self::Anthropic),
            "openai" => Ok(Self::OpenAI),
            "openrouter" => Ok(Self::OpenRouter),
            "ollama" => Ok(Self::Ollama),
            other => Err(anyhow!(
                "Unknown provider: {other}. Supported: anthropic, openai, openrouter, ollama"
            )),
        }
    }
}

/// Returns the default model identifier for a given provider.
pub fn default_model_for(provider: &ProviderKind) -> &'static str {
    match provider {
        ProviderKind::Anthropic => crate::constants::DEFAULT_MODEL,
        ProviderKind::OpenAI => crate::constants::DEFAULT_OPENAI_MODEL,
        ProviderKind::OpenRouter => crate::constants::DEFAULT_OPENROUTER_MODEL,
        ProviderKind::Ollama => crate::constants::OLLAMA_DEFAULT_MODEL,
    }
}

/// Resolve which provider and model to use.
/// Priority: CLI flags > config.toml > defaults.
///
/// Accepts these formats:
///   --model anthropic/claude-sonnet-4-6  (provider/model shorthand)
///   --provider anthropic --model claude-sonnet-4-6
///   --provider anthropic  (uses provider's default model)
///   (nothing)  (uses config.toml, then hardcoded default)
pub fn resolve_model(
    cli_provider: Option<&str>,
    cli_model: Option<&str>,
    config: &Config,
) -> Result<ModelSelection> {
    // If --model contains a slash, parse as provider/model
    if let Some(model_str) = cli_model {
        if let Some((prov, model)) = model_str.split_once('/') {
            return Ok(ModelSelection {
                provider: ProviderKind::from_str(prov)?,
                model: model.to_string(),
            });
        }
    }

    // Resolve provider
    let provider_str = cli_provider
        .or(config.provider_name())
        .unwrap_or(DEFAULT_PROVIDER);
    let provider = ProviderKind::from_str(provider_str)?;

    // Resolve model
    let model = cli_model
        .map(String::from)
        .or_else(|| config.model_name())
        .unwrap_or_else(|| default_model_for(&provider).to_string());

    Ok(ModelSelection { provider, model })
}

/// Internal enum wrapping provider-specific clients.
enum ClientKind {
    Anthropic(anthropic::Client),
    OpenAI(openai::Client),
    OpenRouter(openrouter::Client),
    Ollama(openai::Client),
}

/// A configured LLM provider ready to handle completion requests.
///
/// Wraps a rig-core provider client and the target model name. Models and
/// agents are constructed per call since they are cheap to create and may
/// use different system prompts.
pub struct Provider {
    client: ClientKind,
    model: String,
}

/// Helper macro to reduce duplication across provider match arms.
///
/// Builds an agent from the given client, model, and optional system prompt,
/// then executes the provided block with the agent bound to `$agent`.
macro_rules! with_agent {
    ($client:expr, $model:expr, $sys:expr, |$agent:ident| $body:expr) => {{
        let $agent = if let Some(sys) = $sys {
            $client
                .agent($model)
                .preamble(sys)
                .max_tokens(crate::constants::MAX_TOKENS)
                .build()
        } else {
            $client
                .agent($model)
                .max_tokens(crate::constants::MAX_TOKENS)
                .build()
        };
        $body
    }};
}

/// Dispatches an operation across provider-specific clients.
///
/// Matches on [`ClientKind`] and executes the same block for each variant,
/// letting the compiler monomorphize per provider.
macro_rules! dispatch {
    ($self:expr, |$client:ident| $body:expr) => {
        match &$self.client {
            ClientKind::Anthropic($client) => $body,
            ClientKind::OpenAI($client) => $body,
            ClientKind::OpenRouter($client) => $body,
            ClientKind::Ollama($client) => $body,
        }
    };
}

impl Provider {
    /// Creates a new [`Provider`] from the loaded application config.
    ///
    /// Resolves the API key through gist's config precedence chain
    /// (env var → config file → substitution) and builds the appropriate
    /// provider client. Defaults to Anthropic when no provider is specified.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is found for the selected provider
    /// or if client construction fails.
    pub fn from_config(config: &Config, selection: &ModelSelection) -> Result<Self> {
        match selection.provider {
            ProviderKind::Anthropic => {
                let api_key = config
                    .resolve_api_key("anthropic")
                    .context("No API key found for Anthropic. Set ANTHROPIC_API_KEY or configure it in config.toml")?;
                let client = anthropic::Client::new(&api_key)
                    .context("Failed to create Anthropic client")?;
                Ok(Self {
                    client: ClientKind::Anthropic(client),
                    model: selection.model.clone(),
                })
            }
            ProviderKind::OpenAI => {
                let api_key = config
                    .resolve_api_key("openai")
                    .context("No API key found for OpenAI. Set OPENAI_API_KEY or configure it in config.toml")?;
                let client = openai::Client::new(&api_key)
                    .context("Failed to create OpenAI client")?;
                Ok(Self {
                    client: ClientKind::OpenAI(client),
                    model: selection.model.clone(),
                })
            }
            ProviderKind::OpenRouter => {
                let api_key = config
                    .resolve_api_key("openrouter")
                    .context("No API key found for OpenRouter. Set OPENROUTER_API_KEY or configure it in config.toml")?;
                let client = openrouter::Client::new(&api_key)
                    .context("Failed to create OpenRouter client")?;
                Ok(Self {
                    client: ClientKind::OpenRouter(client),
                    model: selection.model.clone(),
                })
            }
            ProviderKind::Ollama => {
                let base_url = config
                    .provider
                    .ollama
                    .as_ref()
                    .and_then(|o| o.base_url.as_deref())
                    .unwrap_or(crate::constants::OLLAMA_DEFAULT_BASE_URL);
                let client = openai::Client::builder()
                    .api_key("ollama")
                    .base_url(&format!("{}/v1", base_url))
                    .build()
                    .context("Failed to create Ollama client")?;
                Ok(Self {
                    client: ClientKind::Ollama(client),
                    model: selection.model.clone(),
                })
            }
        }
    }
}

#[async_trait]
impl LlmClient for Provider {
    /// Sends a prompt to the configured model and returns the full response.
    ///
    /// Builds a fresh agent for each call, optionally attaching a system
    /// prompt as the agent's preamble.
    ///
    /// # Errors
    ///
    /// Returns an error if the LLM API call fails (network error,
    /// invalid key, rate limit, etc.).
    async fn complete(&self, prompt: &str, system_prompt: Option<&str>) -> Result<String> {
        let response = dispatch!(self, |client| {
            with_agent!(client, &self.model, system_prompt, |agent| {
                agent.prompt(prompt).await.context("LLM API call failed")?
            })
        });
        Ok(response)
    }

    /// Sends the full history and tool definitions to the model and returns
    /// its reply as a gist [`Message`], tool calls included.
    async fn generate(
        &self,
        system_prompt: &str,
        history: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<Message> {
        let chat_history = OneOrMany::many(to_rig_messages(history))
            .map_err(|_| anyhow!("history must contain at least one message"))?;
        let rig_tools: Vec<rig::completion::ToolDefinition> =
            tools.iter().map(to_rig_tool).collect();

        let choice = dispatch!(self, |client| {
            let model = client.completion_model(&self.model);
            let request = CompletionRequest {
                model: None,
                output_schema: None,
                preamble: Some(system_prompt.to_string()),
                chat_history: chat_history.clone(),
                documents: Vec::new(),
                tools: rig_tools.clone(),
                temperature: None,
                max_tokens: Some(crate::constants::MAX_TOKENS),
                tool_choice: None,
                additional_params: None,
            };
            model
                .completion(request)
                .await
                .context("LLM API call failed")?
                .choice
        });

        Ok(from_assistant_content(choice))
    }
}

/// Converts gist messages to rig messages.
///
/// rig has no mid-history system slot and tool exchanges are provider
/// specific, so notes and tool results are rendered as plain user text the
/// next completion can read.
fn to_rig_messages(history: &[Message]) -> Vec<RigMessage> {
    history
        .iter()
        .map(|m| match m.role {
            Role::User => RigMessage::user(m.text()),
            Role::Assistant => {
                if m.tool_calls.is_empty() {
                    RigMessage::assistant(m.text())
                } else {
                    let calls: Vec<String> = m
                        .tool_calls
                        .iter()
                        .map(|c| format!("{}({})", c.name, c.arguments))
                        .collect();
                    RigMessage::assistant(format!("Requested tools: {}", calls.join(", ")))
                }
            }
            Role::Tool => RigMessage::user(format!("Tool result: {}", m.text())),
            Role::System => RigMessage::user(format!("Note: {}", m.text())),
        })
        .collect()
}

/// Converts a gist tool definition to rig's wire shape.
fn to_rig_tool(def: &ToolDefinition) -> rig::completion::ToolDefinition {
    rig::completion::ToolDefinition {
        name: def.name.clone(),
        description: def.description.clone(),
        parameters: def.parameters.clone(),
    }
}

/// Collects a completion choice into a single gist message.
///
/// Text fragments are joined; tool calls are carried through untouched so
/// the planner sees exactly what the model requested.
fn from_assistant_content(choice: OneOrMany<AssistantContent>) -> Message {
    let mut text = String::new();
    let mut calls = Vec::new();
    for item in choice.iter() {
        match item {
            AssistantContent::Text(t) => {
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(&t.text);
            }
            AssistantContent::ToolCall(tc) => calls.push(ToolCall {
                id: tc.id.clone(),
                name: tc.function.name.clone(),
                arguments: tc.function.arguments.clone(),
            }),
            // Reasoning and other content kinds carry nothing to replay.
            _ => {}
        }
    }
    Message::assistant_with_tools(text, calls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_provider_kind_from_str() {
        assert_eq!(
            ProviderKind::from_str("Anthropic").unwrap(),
            ProviderKind::Anthropic
        );
        assert_eq!(
            ProviderKind::from_str("ollama").unwrap(),
            ProviderKind::Ollama
        );
        assert!(ProviderKind::from_str("groq-cloud").is_err());
    }

    #[test]
    fn test_resolve_model_provider_slash_shorthand() {
        let config = Config::default();
        let selection = resolve_model(None, Some("openai/gpt-4.1"), &config).unwrap();
        assert_eq!(selection.provider, ProviderKind::OpenAI);
        assert_eq!(selection.model, "gpt-4.1");
    }

    #[test]
    fn test_resolve_model_defaults() {
        let config = Config::default();
        let selection = resolve_model(None, None, &config).unwrap();
        assert_eq!(selection.provider, ProviderKind::Anthropic);
        assert_eq!(selection.model, crate::constants::DEFAULT_MODEL);
    }

    #[test]
    fn test_resolve_model_provider_default_model() {
        let config = Config::default();
        let selection = resolve_model(Some("openrouter"), None, &config).unwrap();
        assert_eq!(selection.provider, ProviderKind::OpenRouter);
        assert_eq!(selection.model, crate::constants::DEFAULT_OPENROUTER_MODEL);
    }
}
