// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for chat-completions APIs.
//!
//! Provides [`ChatClient`] which handles request construction, bearer
//! authentication, and error mapping. It makes exactly one attempt per call.

use std::time::Duration;

use lehrbot_core::{LehrbotError, ProviderId};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::types::{ApiErrorResponse, ChatRequest, ChatResponse};

/// Path appended to the configured base URL.
const COMPLETIONS_PATH: &str = "/chat/completions";

/// HTTP client for one chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    endpoint: String,
    provider: ProviderId,
}

impl ChatClient {
    /// Creates a client for `provider` at `base_url` (without `/chat/completions`).
    pub fn new(
        provider: ProviderId,
        api_key: &SecretString,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, LehrbotError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            .map_err(|e| {
                LehrbotError::Config(format!("invalid {provider} API key header value: {e}"))
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                LehrbotError::Config(format!("failed to build {provider} HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}{COMPLETIONS_PATH}", base_url.trim_end_matches('/')),
            provider,
        })
    }

    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one request and parses the full response.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, LehrbotError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| self.call_failed(None, transport_message(&e)))?;

        let status = response.status();
        debug!(provider = %self.provider, status = %status, model = %request.model, "completion response received");

        let body = response
            .text()
            .await
            .map_err(|e| self.call_failed(Some(status.as_u16()), format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => api_err.summary(),
                Err(_) if body.trim().is_empty() => format!("API returned {status}"),
                Err(_) => format!("API returned {status}: {}", truncate(&body, 200)),
            };
            return Err(self.call_failed(Some(status.as_u16()), message));
        }

        serde_json::from_str(&body).map_err(|e| {
            self.call_failed(Some(status.as_u16()), format!("malformed response body: {e}"))
        })
    }

    /// Sends one request and returns the first choice's text.
    ///
    /// A response without choices or with empty content is a failure.
    pub async fn complete_text(&self, request: &ChatRequest) -> Result<String, LehrbotError> {
        let response = self.chat(request).await?;
        if let Some(usage) = response.usage {
            debug!(
                provider = %self.provider,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "token usage"
            );
        }
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| self.call_failed(Some(200), "response contained no text content".into()))
    }

    fn call_failed(&self, status: Option<u16>, message: String) -> LehrbotError {
        LehrbotError::ProviderCallFailed {
            provider: self.provider,
            status,
            message,
        }
    }
}

fn transport_message(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timed out".to_string()
    } else if e.is_connect() {
        format!("connection failed: {e}")
    } else {
        format!("HTTP request failed: {e}")
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
