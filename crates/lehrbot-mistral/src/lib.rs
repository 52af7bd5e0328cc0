// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mistral provider adapter for Lehrbot.
//!
//! Mistral speaks the chat-completions format, so this crate reuses the
//! OpenAI adapter's client and only differs in identity and key handling:
//! a missing key disables the provider instead of failing start-up.

use std::time::Duration;

use async_trait::async_trait;
use lehrbot_config::model::MistralConfig;
use lehrbot_core::{CompletionProvider, CompletionRequest, LehrbotError, ProviderId};
use lehrbot_openai::client::ChatClient;
use lehrbot_openai::resolve_api_key;
use lehrbot_openai::types::ChatRequest;
use secrecy::SecretString;
use tracing::info;

/// Environment variable consulted when the config carries no key.
pub const API_KEY_ENV: &str = "MISTRAL_API_KEY";

/// Mistral provider implementing [`CompletionProvider`].
pub struct MistralProvider {
    client: ChatClient,
}

impl MistralProvider {
    /// Creates the provider from configuration.
    ///
    /// Returns `Ok(None)` when neither the config nor `MISTRAL_API_KEY`
    /// carries a key; the selector then never routes to Mistral.
    pub fn from_config(config: &MistralConfig) -> Result<Option<Self>, LehrbotError> {
        let Some(api_key) = resolve_api_key(config.api_key.as_deref(), API_KEY_ENV) else {
            info!("Mistral API key not set, low-cost tier disabled");
            return Ok(None);
        };
        let provider = Self::new(
            &api_key,
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )?;
        info!(base_url = %config.base_url, "Mistral provider initialized");
        Ok(Some(provider))
    }

    /// Creates the provider with an explicit key and endpoint.
    pub fn new(
        api_key: &SecretString,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, LehrbotError> {
        Ok(Self {
            client: ChatClient::new(ProviderId::Mistral, api_key, base_url, timeout)?,
        })
    }
}

#[async_trait]
impl CompletionProvider for MistralProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Mistral
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, LehrbotError> {
        self.client.complete_text(&ChatRequest::from(&request)).await
    }
}
