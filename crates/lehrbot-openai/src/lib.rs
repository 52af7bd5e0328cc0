// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI provider adapter for Lehrbot.
//!
//! Implements [`CompletionProvider`] over the chat-completions API. The
//! [`client`] and [`types`] modules are shared with the Mistral adapter,
//! which speaks the same wire format.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use lehrbot_config::model::OpenAiConfig;
use lehrbot_core::{CompletionProvider, CompletionRequest, LehrbotError, ProviderId};
use secrecy::SecretString;
use tracing::info;

use crate::client::ChatClient;
use crate::types::ChatRequest;

/// Environment variable consulted when the config carries no key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// OpenAI provider implementing [`CompletionProvider`].
///
/// API key resolution order: config -> `OPENAI_API_KEY` env var -> error.
pub struct OpenAiProvider {
    client: ChatClient,
}

impl OpenAiProvider {
    /// Creates the provider from configuration.
    ///
    /// Fails with [`LehrbotError::ProviderUnavailable`] when no key is found;
    /// the service cannot start without its primary provider.
    pub fn from_config(config: &OpenAiConfig) -> Result<Self, LehrbotError> {
        let api_key = resolve_api_key(config.api_key.as_deref(), API_KEY_ENV).ok_or(
            LehrbotError::ProviderUnavailable {
                provider: ProviderId::OpenAi,
            },
        )?;
        let provider = Self::new(
            &api_key,
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )?;
        info!(base_url = %config.base_url, "OpenAI provider initialized");
        Ok(provider)
    }

    /// Creates the provider with an explicit key and endpoint.
    pub fn new(
        api_key: &SecretString,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, LehrbotError> {
        Ok(Self {
            client: ChatClient::new(ProviderId::OpenAi, api_key, base_url, timeout)?,
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, LehrbotError> {
        self.client.complete_text(&ChatRequest::from(&request)).await
    }
}

/// Resolves an API key: a non-empty config value wins, then the named
/// environment variable. Returns `None` when neither is set.
pub fn resolve_api_key(config_key: Option<&str>, env_var: &str) -> Option<SecretString> {
    if let Some(key) = config_key
        && !key.trim().is_empty()
    {
        return Some(SecretString::from(key.trim().to_string()));
    }

    std::env::var(env_var)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .map(|key| SecretString::from(key.trim().to_string()))
}
