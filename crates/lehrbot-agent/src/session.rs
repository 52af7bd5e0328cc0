// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-message tutoring pipeline.
//!
//! A [`TutorSession`] gates the caller on approval status, builds the
//! prompt, routes the message, invokes the selected provider, and records
//! experience points and lesson history. It is cheap to clone and safe to
//! share across tasks; each call runs independently.

use std::sync::Arc;

use lehrbot_core::{
    CallerId, LehrbotError, LessonRecord, ModelChoice, ProviderSelection, UserProfile, UserStore,
};
use lehrbot_cost::{DailyCostTracker, ProviderStats};
use lehrbot_router::{Availability, ComplexityTier, route};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::commands::{ChatCommand, parse_command};
use crate::invoker::CompletionInvoker;
use crate::locale;
use crate::prompt::build_messages;

/// What happened to a message, returned alongside the reply text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ReplyMeta {
    /// Caller not approved: no model was invoked.
    Blocked,
    /// A chat command was applied; no model was invoked.
    Command,
    /// The message was answered by a model.
    Routed {
        complexity: ComplexityTier,
        model: ProviderSelection,
        points: u32,
    },
}

impl ReplyMeta {
    pub fn is_blocked(&self) -> bool {
        matches!(self, ReplyMeta::Blocked)
    }
}

/// Reply text plus routing metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TutorReply {
    pub text: String,
    pub meta: ReplyMeta,
}

/// Experience points awarded for an answer from `model`.
///
/// Grows with model capability, so pricier routes earn more. This follows
/// the product's current rule and does not reflect answer quality.
pub fn award_points(model: ModelChoice) -> u32 {
    match model {
        ModelChoice::MistralSmall => 10,
        ModelChoice::Gpt4oMini => 15,
        ModelChoice::Gpt4o => 20,
    }
}

/// Entry point for inbound learner messages.
#[derive(Clone)]
pub struct TutorSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    store: Arc<dyn UserStore>,
    invoker: CompletionInvoker,
    reference: String,
    cost_tracker: Mutex<DailyCostTracker>,
}

impl TutorSession {
    /// `reference` is the already-loaded reference text for system prompts.
    pub fn new(
        store: Arc<dyn UserStore>,
        invoker: CompletionInvoker,
        reference: String,
        cost_tracker: DailyCostTracker,
    ) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                store,
                invoker,
                reference,
                cost_tracker: Mutex::new(cost_tracker),
            }),
        }
    }

    pub fn stats(&self) -> &Arc<ProviderStats> {
        self.inner.invoker.stats()
    }

    pub fn availability(&self) -> Availability {
        self.inner.invoker.availability()
    }

    /// Today's accumulated estimated cost.
    pub async fn daily_cost(&self) -> f64 {
        self.inner.cost_tracker.lock().await.daily_total()
    }

    /// Answer one tutoring message from `caller`.
    ///
    /// An unapproved caller gets the localized pending-approval text with
    /// [`ReplyMeta::Blocked`]. Provider failures propagate. Writes of points
    /// and lesson history are best-effort.
    ///
    /// The pipeline runs on its own task: dropping the returned future does
    /// not cancel an in-flight provider call or the writes that follow it.
    pub async fn respond(
        &self,
        message: &str,
        caller: &CallerId,
    ) -> Result<TutorReply, LehrbotError> {
        let inner = Arc::clone(&self.inner);
        let message = message.to_string();
        let caller = caller.clone();
        tokio::spawn(async move { inner.respond(&message, &caller).await })
            .await
            .map_err(|e| LehrbotError::Internal(format!("tutoring task failed: {e}")))?
    }

    /// Apply a chat command if `text` is one, otherwise [`respond`](Self::respond).
    ///
    /// Commands work for unapproved callers too.
    pub async fn handle(&self, text: &str, caller: &CallerId) -> Result<TutorReply, LehrbotError> {
        match parse_command(text) {
            Some(command) => self.inner.apply_command(command, caller).await,
            None => self.respond(text, caller).await,
        }
    }
}

impl SessionInner {
    async fn respond(&self, message: &str, caller: &CallerId) -> Result<TutorReply, LehrbotError> {
        let profile = self.store.get_or_create(caller).await?;

        if !profile.is_approved() {
            info!(user = %caller, status = %profile.status, "caller not approved, reply gated");
            return Ok(TutorReply {
                text: locale::pending_approval(profile.preferred_language).to_string(),
                meta: ReplyMeta::Blocked,
            });
        }

        self.store.touch_last_active(caller).await?;

        let messages = build_messages(&profile, &self.reference, message);
        let decision = route(message, self.invoker.availability());
        info!(
            user = %caller,
            tier = %decision.tier,
            reason = decision.reason,
            provider = %decision.selection.provider(),
            model = %decision.selection.model(),
            cost = decision.selection.estimated_cost(),
            "message routed"
        );

        let text = self.invoker.invoke(messages, &decision.selection).await?;

        let points = award_points(decision.selection.model());
        self.cost_tracker
            .lock()
            .await
            .record(decision.selection.estimated_cost());
        self.persist_lesson(caller, &profile, message, &text, points)
            .await;

        Ok(TutorReply {
            text,
            meta: ReplyMeta::Routed {
                complexity: decision.tier,
                model: decision.selection,
                points,
            },
        })
    }

    /// Best-effort: failures are logged and swallowed.
    async fn persist_lesson(
        &self,
        caller: &CallerId,
        profile: &UserProfile,
        message: &str,
        feedback: &str,
        points: u32,
    ) {
        match self.store.add_experience(caller, points).await {
            Ok(total) => debug!(user = %caller, points, total, "experience recorded"),
            Err(e) => warn!(user = %caller, error = %e, "failed to record experience points"),
        }

        let record = LessonRecord::conversation(message, feedback, points, profile.german_level);
        if let Err(e) = self.store.append_lesson_record(caller, record).await {
            warn!(user = %caller, error = %e, "failed to append lesson record");
        }
    }

    async fn apply_command(
        &self,
        command: ChatCommand,
        caller: &CallerId,
    ) -> Result<TutorReply, LehrbotError> {
        self.store.get_or_create(caller).await?;
        let text = match command {
            ChatCommand::SetLanguage(language) => {
                self.store.set_preferred_language(caller, language).await?;
                info!(user = %caller, language = %language, "preferred language changed");
                locale::language_updated(language)
            }
            ChatCommand::ShowLanguageMenu => locale::LANGUAGE_MENU,
        };
        Ok(TutorReply {
            text: text.to_string(),
            meta: ReplyMeta::Command,
        })
    }
}
