// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wires configuration into a ready-to-use tutoring session.

use std::sync::Arc;

use colored::Colorize;
use lehrbot_agent::{
    CompletionInvoker, DEFAULT_REFERENCE_TEXT, FileReference, ReplyMeta, TutorReply, TutorSession,
    load_reference_text,
};
use lehrbot_config::LehrbotConfig;
use lehrbot_core::{CallerId, CompletionProvider, LehrbotError, UserStore};
use lehrbot_cost::{DailyCostTracker, ProviderStats};
use lehrbot_mistral::MistralProvider;
use lehrbot_openai::OpenAiProvider;
use lehrbot_store::MemoryUserStore;
use tracing::info;

/// Generic reply shown when the upstream model call fails.
pub const TRY_AGAIN_TEXT: &str = "⚠️ Sorry, something went wrong. Please try again in a moment.";

/// The assembled service.
pub struct App {
    pub session: TutorSession,
    pub users: Arc<MemoryUserStore>,
}

impl App {
    /// Build providers, store, and session from `config`.
    ///
    /// Fails with [`LehrbotError::ProviderUnavailable`] when the primary
    /// provider has no credentials.
    pub async fn build(config: &LehrbotConfig) -> Result<Self, LehrbotError> {
        let primary: Arc<dyn CompletionProvider> =
            Arc::new(OpenAiProvider::from_config(&config.openai)?);
        let low_cost = MistralProvider::from_config(&config.mistral)?
            .map(|p| Arc::new(p) as Arc<dyn CompletionProvider>);

        let reference = match &config.agent.reference_file {
            Some(path) => load_reference_text(&FileReference::new(path)).await,
            None => DEFAULT_REFERENCE_TEXT.to_string(),
        };

        let users = Arc::new(MemoryUserStore::from_config(&config.store));
        let invoker = CompletionInvoker::new(primary, low_cost, Arc::new(ProviderStats::new()));
        let session = TutorSession::new(
            Arc::clone(&users) as Arc<dyn UserStore>,
            invoker,
            reference,
            DailyCostTracker::from_config(&config.cost),
        );

        info!(
            name = %config.agent.name,
            low_cost_available = session.availability().mistral,
            "tutoring session ready"
        );
        Ok(Self { session, users })
    }

    /// Register `id`, approving it when `approve` is set.
    pub async fn caller(&self, id: &str, approve: bool) -> Result<CallerId, LehrbotError> {
        let caller = CallerId::new(id);
        self.users.get_or_create(&caller).await?;
        if approve {
            self.users.approve(&caller)?;
        }
        Ok(caller)
    }
}

/// One-line routing summary for terminal display.
pub fn describe_meta(reply: &TutorReply) -> String {
    match &reply.meta {
        ReplyMeta::Blocked => "[blocked: registration pending]".to_string(),
        ReplyMeta::Command => "[command]".to_string(),
        ReplyMeta::Routed {
            complexity,
            model,
            points,
        } => format!(
            "[{complexity} -> {}/{} (${:.2}), +{points} XP]",
            model.provider(),
            model.model(),
            model.estimated_cost()
        ),
    }
}

/// Print a reply with its dimmed routing summary.
pub fn print_reply(reply: &TutorReply) {
    println!("{}", reply.text);
    eprintln!("{}", describe_meta(reply).dimmed());
}
