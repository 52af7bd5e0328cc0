// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatches a routed request to the selected provider and counts successes.

use std::sync::Arc;

use lehrbot_core::{
    CompletionProvider, CompletionRequest, LehrbotError, Message, ProviderId, ProviderSelection,
};
use lehrbot_cost::ProviderStats;
use lehrbot_router::Availability;
use tracing::{debug, warn};

/// Upper bound on generated tokens per reply.
pub const MAX_OUTPUT_TOKENS: u32 = 400;

/// Sampling temperature for every call.
pub const TEMPERATURE: f32 = 0.7;

/// Holds the provider clients and the shared call counters.
///
/// The primary provider is mandatory. The low-cost provider is optional and
/// its absence is reported through [`CompletionInvoker::availability`].
pub struct CompletionInvoker {
    primary: Arc<dyn CompletionProvider>,
    low_cost: Option<Arc<dyn CompletionProvider>>,
    stats: Arc<ProviderStats>,
}

impl CompletionInvoker {
    pub fn new(
        primary: Arc<dyn CompletionProvider>,
        low_cost: Option<Arc<dyn CompletionProvider>>,
        stats: Arc<ProviderStats>,
    ) -> Self {
        Self {
            primary,
            low_cost,
            stats,
        }
    }

    /// Which providers the selector may choose from.
    pub fn availability(&self) -> Availability {
        Availability {
            mistral: self.low_cost.is_some(),
        }
    }

    pub fn stats(&self) -> &Arc<ProviderStats> {
        &self.stats
    }

    /// Send `messages` to the provider named by `selection` and return its text.
    ///
    /// Exactly one attempt. The counter for the selected model is incremented
    /// only on success.
    pub async fn invoke(
        &self,
        messages: Vec<Message>,
        selection: &ProviderSelection,
    ) -> Result<String, LehrbotError> {
        let provider = match selection.provider() {
            ProviderId::OpenAi => &self.primary,
            ProviderId::Mistral => {
                self.low_cost
                    .as_ref()
                    .ok_or(LehrbotError::ProviderUnavailable {
                        provider: ProviderId::Mistral,
                    })?
            }
        };

        let request = CompletionRequest {
            messages,
            model: selection.model(),
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
        };

        match provider.complete(request).await {
            Ok(text) => {
                self.stats.increment(selection.model());
                debug!(
                    provider = %selection.provider(),
                    model = %selection.model(),
                    chars = text.chars().count(),
                    "completion succeeded"
                );
                Ok(text)
            }
            Err(e) => {
                warn!(
                    provider = %selection.provider(),
                    model = %selection.model(),
                    error = %e,
                    "completion failed"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lehrbot_core::ModelChoice;
    use std::sync::Mutex;

    /// Echoes the model id, or fails with a fixed status.
    struct StubProvider {
        id: ProviderId,
        fail_status: Option<u16>,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl StubProvider {
        fn ok(id: ProviderId) -> Arc<Self> {
            Arc::new(Self {
                id,
                fail_status: None,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing(id: ProviderId, status: u16) -> Arc<Self> {
            Arc::new(Self {
                id,
                fail_status: Some(status),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionProvider for StubProvider {
        fn id(&self) -> ProviderId {
            self.id
        }

        async fn complete(&self, request: CompletionRequest) -> Result<String, LehrbotError> {
            let model = request.model;
            self.seen.lock().unwrap().push(request);
            match self.fail_status {
                Some(status) => Err(LehrbotError::ProviderCallFailed {
                    provider: self.id,
                    status: Some(status),
                    message: "stub failure".into(),
                }),
                None => Ok(format!("reply from {model}")),
            }
        }
    }

    fn messages() -> Vec<Message> {
        vec![Message::system("sys"), Message::user("Hallo")]
    }

    #[tokio::test]
    async fn routes_to_primary_and_counts() {
        let primary = StubProvider::ok(ProviderId::OpenAi);
        let stats = Arc::new(ProviderStats::new());
        let invoker = CompletionInvoker::new(primary.clone(), None, stats.clone());

        let selection = ProviderSelection::for_model(ModelChoice::Gpt4o);
        let text = invoker.invoke(messages(), &selection).await.unwrap();

        assert_eq!(text, "reply from gpt-4o");
        assert_eq!(stats.calls(ModelChoice::Gpt4o), 1);
        assert_eq!(stats.total(), 1);

        let seen = primary.seen.lock().unwrap();
        assert_eq!(seen[0].max_tokens, MAX_OUTPUT_TOKENS);
        assert_eq!(seen[0].temperature, TEMPERATURE);
        assert_eq!(seen[0].messages, messages());
    }

    #[tokio::test]
    async fn routes_to_low_cost_provider() {
        let primary = StubProvider::ok(ProviderId::OpenAi);
        let mistral = StubProvider::ok(ProviderId::Mistral);
        let stats = Arc::new(ProviderStats::new());
        let invoker = CompletionInvoker::new(
            primary.clone(),
            Some(mistral.clone() as Arc<dyn CompletionProvider>),
            stats.clone(),
        );
        assert!(invoker.availability().mistral);

        let selection = ProviderSelection::for_model(ModelChoice::MistralSmall);
        invoker.invoke(messages(), &selection).await.unwrap();

        assert_eq!(mistral.seen.lock().unwrap().len(), 1);
        assert!(primary.seen.lock().unwrap().is_empty());
        assert_eq!(stats.calls(ModelChoice::MistralSmall), 1);
    }

    #[tokio::test]
    async fn absent_low_cost_provider_fails_fast() {
        let primary = StubProvider::ok(ProviderId::OpenAi);
        let stats = Arc::new(ProviderStats::new());
        let invoker = CompletionInvoker::new(primary.clone(), None, stats.clone());
        assert!(!invoker.availability().mistral);

        let selection = ProviderSelection::for_model(ModelChoice::MistralSmall);
        let err = invoker.invoke(messages(), &selection).await.unwrap_err();

        assert!(matches!(
            err,
            LehrbotError::ProviderUnavailable {
                provider: ProviderId::Mistral
            }
        ));
        assert!(primary.seen.lock().unwrap().is_empty());
        assert_eq!(stats.total(), 0);
    }

    #[tokio::test]
    async fn failure_is_surfaced_and_not_counted() {
        let primary = StubProvider::failing(ProviderId::OpenAi, 502);
        let stats = Arc::new(ProviderStats::new());
        let invoker = CompletionInvoker::new(primary.clone(), None, stats.clone());

        let selection = ProviderSelection::for_model(ModelChoice::Gpt4oMini);
        let err = invoker.invoke(messages(), &selection).await.unwrap_err();

        assert!(matches!(
            err,
            LehrbotError::ProviderCallFailed {
                provider: ProviderId::OpenAi,
                status: Some(502),
                ..
            }
        ));
        assert_eq!(primary.seen.lock().unwrap().len(), 1);
        assert_eq!(stats.total(), 0);
    }
}
