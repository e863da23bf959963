//! Environment variable substitution and API key resolution.

use super::types::{Config, ProviderEntry};

use crate::constants::{
    DEFAULT_MAX_TOOL_CALLS, SEARCH_DEFAULT_DEPTH, SEARCH_DEFAULT_RESULTS, SEARCH_TIMEOUT_SECS,
};

impl Config {
    /// Resolve {env:VAR_NAME} patterns in string fields.
    pub(super) fn resolve_substitutions(&mut self) {
        self.model = Self::resolve_str(&self.model);
        if let Some(ref mut dp) = self.default_provider {
            *dp = Self::resolve_str(dp);
        }
        Self::resolve_provider_entry(&mut self.provider.openai);
        Self::resolve_provider_entry(&mut self.provider.anthropic);
        Self::resolve_provider_entry(&mut self.provider.ollama);
        Self::resolve_provider_entry(&mut self.provider.openrouter);
        if let Some(ref mut key) = self.search.api_key {
            *key = Self::resolve_str(key);
        }
    }

    /// Resolves `{env:VAR}` patterns in a single provider entry's `api_key` and `base_url`.
    fn resolve_provider_entry(entry: &mut Option<ProviderEntry>) {
        if let Some(ref mut e) = entry {
            if let Some(ref mut key) = e.api_key {
                *key = Self::resolve_str(key);
            }
            if let Some(ref mut url) = e.base_url {
                *url = Self::resolve_str(url);
            }
        }
    }

    /// Replace {env:VAR} with the environment variable value.
    fn resolve_str(s: &str) -> String {
        let mut result = s.to_string();
        while let Some(start) = result.find("{env:") {
            if let Some(end) = result[start..].find('}') {
                let var_name = &result[start + 5..start + end];
                let value = std::env::var(var_name).unwrap_or_default();
                result = format!(
                    "{}{}{}",
                    &result[..start],
                    value,
                    &result[start + end + 1..]
                );
            } else {
                break;
            }
        }
        result
    }

    /// Resolve API key for a provider: env var first, then config value.
    pub fn resolve_api_key(&self, provider: &str) -> Option<String> {
        // Check env var first (OPENAI_API_KEY, ANTHROPIC_API_KEY, etc.)
        let env_key = format!("{}_API_KEY", provider.to_uppercase());
        if let Ok(val) = std::env::var(&env_key) {
            if !val.is_empty() {
                return Some(val);
            }
        }

        // Fall back to config
        let entry = match provider {
            "openai" => &self.provider.openai,
            "anthropic" => &self.provider.anthropic,
            "ollama" => &self.provider.ollama,
            "openrouter" => &self.provider.openrouter,
            _ => &None,
        };
        entry.as_ref().and_then(|e| e.api_key.clone())
    }

    /// Resolve the search API key: `TAVILY_API_KEY` first, then config.
    pub fn resolve_search_api_key(&self) -> Option<String> {
        if let Ok(val) = std::env::var("TAVILY_API_KEY") {
            if !val.is_empty() {
                return Some(val);
            }
        }
        self.search.api_key.clone().filter(|k| !k.is_empty())
    }

    /// Get the configured default provider name, if any.
    pub fn provider_name(&self) -> Option<&str> {
        self.default_provider.as_deref()
    }

    /// Get the model name from config, stripping provider prefix if present.
    /// Returns None if the model is the compile-time default (meaning user hasn't configured it).
    pub fn model_name(&self) -> Option<String> {
        let m = &self.model;
        if m == crate::constants::DEFAULT_MODEL {
            return None; // treat default as "not configured"
        }
        // If model contains slash, extract just the model part
        if let Some((_prov, model)) = m.split_once('/') {
            Some(model.to_string())
        } else {
            Some(m.to_string())
        }
    }

    /// Maximum tool invocations per run.
    pub fn max_tool_calls(&self) -> u32 {
        self.workflow.max_tool_calls.unwrap_or(DEFAULT_MAX_TOOL_CALLS)
    }

    /// Results requested per search.
    pub fn search_max_results(&self) -> u32 {
        self.search.max_results.unwrap_or(SEARCH_DEFAULT_RESULTS)
    }

    /// Search depth passed to the API.
    pub fn search_depth(&self) -> String {
        self.search
            .depth
            .clone()
            .unwrap_or_else(|| SEARCH_DEFAULT_DEPTH.to_string())
    }

    /// Request timeout for search calls, in seconds.
    pub fn search_timeout_secs(&self) -> u64 {
        self.search.timeout_secs.unwrap_or(SEARCH_TIMEOUT_SECS)
    }
}
