// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for chat-completion backends (OpenAI, Mistral).

use async_trait::async_trait;

use crate::error::LehrbotError;
use crate::types::{CompletionRequest, ProviderId};

/// Adapter for a language model backend reachable over HTTP.
///
/// Implementations return the assistant's text on success and
/// [`LehrbotError::ProviderCallFailed`] on a non-success status or a
/// malformed response body. They do not retry.
#[async_trait]
pub trait CompletionProvider: Send + Sync + 'static {
    /// Which provider this adapter talks to.
    fn id(&self) -> ProviderId;

    /// Sends the request and returns the assistant's text content.
    async fn complete(&self, request: CompletionRequest) -> Result<String, LehrbotError>;
}
