// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end tutoring pipeline tests.
//!
//! `TestHarness` assembles a [`TutorSession`] over mock providers and an
//! in-memory store wrapped in a [`FailingStore`], and keeps handles to every
//! part so tests can assert on calls, counters, and stored state.

use std::sync::Arc;
use std::time::Duration;

use lehrbot_agent::{CompletionInvoker, DEFAULT_REFERENCE_TEXT, TutorSession};
use lehrbot_core::{CallerId, CompletionProvider, LehrbotError, ProviderId, UserStore};
use lehrbot_cost::{DailyCostTracker, ProviderStats};
use lehrbot_store::MemoryUserStore;

use crate::failing_store::FailingStore;
use crate::mock_provider::MockProvider;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    primary_responses: Vec<String>,
    primary_failure: Option<u16>,
    mistral: bool,
    mistral_responses: Vec<String>,
    provider_delay: Option<Duration>,
    reference: String,
    daily_budget_usd: Option<f64>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            primary_responses: Vec::new(),
            primary_failure: None,
            mistral: false,
            mistral_responses: Vec::new(),
            provider_delay: None,
            reference: DEFAULT_REFERENCE_TEXT.to_string(),
            daily_budget_usd: None,
        }
    }

    /// Queue responses on the primary provider.
    pub fn with_primary_responses(mut self, responses: Vec<String>) -> Self {
        self.primary_responses = responses;
        self
    }

    /// Make every primary call fail with `status`.
    pub fn with_primary_failure(mut self, status: u16) -> Self {
        self.primary_failure = Some(status);
        self
    }

    /// Configure the low-cost provider.
    pub fn with_mistral(mut self) -> Self {
        self.mistral = true;
        self
    }

    /// Configure the low-cost provider with queued responses.
    pub fn with_mistral_responses(mut self, responses: Vec<String>) -> Self {
        self.mistral = true;
        self.mistral_responses = responses;
        self
    }

    /// Delay every provider answer.
    pub fn with_provider_delay(mut self, delay: Duration) -> Self {
        self.provider_delay = Some(delay);
        self
    }

    /// Reference text embedded in the system prompt.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    /// Set a daily budget for the cost tracker.
    pub fn with_budget(mut self, daily_usd: f64) -> Self {
        self.daily_budget_usd = Some(daily_usd);
        self
    }

    /// Build the harness.
    pub fn build(self) -> TestHarness {
        let delay = self.provider_delay;
        let with_delay = |mock: MockProvider| match delay {
            Some(d) => mock.with_delay(d),
            None => mock,
        };

        let primary = Arc::new(with_delay(match self.primary_failure {
            Some(status) => MockProvider::failing(ProviderId::OpenAi, status),
            None => MockProvider::with_responses(ProviderId::OpenAi, self.primary_responses),
        }));
        let mistral = self.mistral.then(|| {
            Arc::new(with_delay(MockProvider::with_responses(
                ProviderId::Mistral,
                self.mistral_responses,
            )))
        });

        let users = Arc::new(MemoryUserStore::new(false));
        let store = Arc::new(FailingStore::new(Arc::clone(&users)));
        let stats = Arc::new(ProviderStats::new());

        let invoker = CompletionInvoker::new(
            Arc::clone(&primary) as Arc<dyn CompletionProvider>,
            mistral
                .as_ref()
                .map(|m| Arc::clone(m) as Arc<dyn CompletionProvider>),
            Arc::clone(&stats),
        );
        let session = TutorSession::new(
            Arc::clone(&store) as Arc<dyn UserStore>,
            invoker,
            self.reference,
            DailyCostTracker::new(self.daily_budget_usd),
        );

        TestHarness {
            session,
            primary,
            mistral,
            store,
            users,
            stats,
        }
    }
}

/// A complete tutoring stack over mocks.
pub struct TestHarness {
    /// The session under test.
    pub session: TutorSession,
    /// Mock primary provider.
    pub primary: Arc<MockProvider>,
    /// Mock low-cost provider, if configured.
    pub mistral: Option<Arc<MockProvider>>,
    /// Store seen by the session; can inject write failures.
    pub store: Arc<FailingStore>,
    /// Backing store, for approval changes and assertions.
    pub users: Arc<MemoryUserStore>,
    /// Counters shared with the session's invoker.
    pub stats: Arc<ProviderStats>,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Register `id` and approve it.
    pub async fn approved_caller(&self, id: &str) -> Result<CallerId, LehrbotError> {
        let caller = CallerId::new(id);
        self.users.get_or_create(&caller).await?;
        self.users.approve(&caller)?;
        Ok(caller)
    }

    /// Calls made to all providers, including failed ones.
    pub fn provider_calls(&self) -> usize {
        self.primary.call_count() + self.mistral.as_ref().map_or(0, |m| m.call_count())
    }
}
