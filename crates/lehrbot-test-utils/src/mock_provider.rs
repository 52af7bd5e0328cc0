// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.
//!
//! `MockProvider` implements `CompletionProvider` with pre-configured
//! responses and records every request it receives.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use lehrbot_core::{CompletionProvider, CompletionRequest, LehrbotError, ProviderId};

/// A mock provider that returns pre-configured responses.
///
/// Responses are popped from a FIFO queue. When the queue is empty,
/// a default "mock response" text is returned.
pub struct MockProvider {
    id: ProviderId,
    responses: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<CompletionRequest>>,
    calls: AtomicUsize,
    fail_status: Option<u16>,
    delay: Option<Duration>,
}

impl MockProvider {
    /// Create a mock for `id` with an empty response queue.
    pub fn new(id: ProviderId) -> Self {
        Self {
            id,
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            fail_status: None,
            delay: None,
        }
    }

    /// Create a mock pre-loaded with the given responses.
    pub fn with_responses(id: ProviderId, responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from(responses)),
            ..Self::new(id)
        }
    }

    /// Every call fails with `ProviderCallFailed` carrying `status`.
    pub fn failing(id: ProviderId, status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::new(id)
        }
    }

    /// Sleep for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Add a response to the end of the queue.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.responses.lock().await.push_back(text.into());
    }

    /// Number of `complete` calls started, including failed ones.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received so far, in order.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }

    async fn next_response(&self) -> String {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock response".to_string())
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, LehrbotError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().await.push(request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.fail_status {
            Some(status) => Err(LehrbotError::ProviderCallFailed {
                provider: self.id,
                status: Some(status),
                message: "mock failure".into(),
            }),
            None => Ok(self.next_response().await),
        }
    }
}
