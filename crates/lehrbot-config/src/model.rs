// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Lehrbot tutoring service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.
//!
//! Model identifiers are deliberately absent: the set of selectable
//! (provider, model) pairs is fixed in `lehrbot-core`.

use serde::{Deserialize, Serialize};

/// Top-level Lehrbot configuration.
///
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LehrbotConfig {
    /// Service identity, logging, and reference text.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Primary provider. Credentials are mandatory at start-up.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Low-cost provider. Credentials are optional.
    #[serde(default)]
    pub mistral: MistralConfig,

    /// Informational cost tracking.
    #[serde(default)]
    pub cost: CostConfig,

    /// User store behaviour.
    #[serde(default)]
    pub store: StoreConfig,
}

/// Service identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the service.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Path to the reference text embedded in every system message.
    /// A missing or unreadable file falls back to a built-in default.
    #[serde(default = "default_reference_file")]
    pub reference_file: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            reference_file: default_reference_file(),
        }
    }
}

fn default_agent_name() -> String {
    "lehrbot".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_reference_file() -> Option<String> {
    Some("training_data.txt".to_string())
}

/// OpenAI API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// OpenAI API key. `None` requires the `OPENAI_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the API (without `/chat/completions`).
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Mistral API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MistralConfig {
    /// Mistral API key. `None` falls back to `MISTRAL_API_KEY`; if that is
    /// unset too, Mistral is excluded from selection.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the API (without `/chat/completions`).
    #[serde(default = "default_mistral_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MistralConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_mistral_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_mistral_base_url() -> String {
    "https://api.mistral.ai/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Cost tracking configuration.
///
/// Tracking is informational: it logs, it never blocks a request.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CostConfig {
    /// Daily estimated-cost level that triggers a warning at 80%. `None` disables the warning.
    #[serde(default)]
    pub daily_budget_usd: Option<f64>,
}

/// User store configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Create new users as approved instead of pending (local testing).
    #[serde(default)]
    pub auto_approve: bool,
}

impl LehrbotConfig {
    /// Copy of this configuration with API keys replaced by a marker, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.openai.api_key.is_some() {
            copy.openai.api_key = Some("<redacted>".to_string());
        }
        if copy.mistral.api_key.is_some() {
            copy.mistral.api_key = Some("<redacted>".to_string());
        }
        copy
    }
}
