// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Lehrbot service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Opaque identifier of the person on the other end of the chat
/// (a WhatsApp number such as `whatsapp:+4915112345678`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallerId(pub String);

impl CallerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CallerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Speaker of a chat message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single message of a completion request. Order within a request is
/// conversation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Identifies a language model backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// Primary provider. Credentials are mandatory.
    OpenAi,
    /// Low-cost provider. Credentials are optional.
    Mistral,
}

/// The closed set of (provider, model) pairs the selector may resolve to.
///
/// Model identifiers never come from user input or configuration; adding a
/// model means adding a variant here.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum ModelChoice {
    /// Low-cost provider, lightweight model.
    #[strum(serialize = "mistral-small-latest")]
    #[serde(rename = "mistral-small-latest")]
    MistralSmall,
    /// Primary provider, mid-tier model.
    #[strum(serialize = "gpt-4o-mini")]
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    /// Primary provider, highest-capability model.
    #[strum(serialize = "gpt-4o")]
    #[serde(rename = "gpt-4o")]
    Gpt4o,
}

impl ModelChoice {
    /// Every selectable model, in ascending capability order.
    pub const ALL: [ModelChoice; 3] = [
        ModelChoice::MistralSmall,
        ModelChoice::Gpt4oMini,
        ModelChoice::Gpt4o,
    ];

    /// The provider that serves this model.
    pub fn provider(self) -> ProviderId {
        match self {
            ModelChoice::MistralSmall => ProviderId::Mistral,
            ModelChoice::Gpt4oMini | ModelChoice::Gpt4o => ProviderId::OpenAi,
        }
    }

    /// Model identifier sent on the wire.
    pub fn model_id(self) -> &'static str {
        match self {
            ModelChoice::MistralSmall => "mistral-small-latest",
            ModelChoice::Gpt4oMini => "gpt-4o-mini",
            ModelChoice::Gpt4o => "gpt-4o",
        }
    }

    /// Estimated unit cost of one call.
    pub fn estimated_cost(self) -> f64 {
        match self {
            ModelChoice::MistralSmall => 0.0,
            ModelChoice::Gpt4oMini => 0.24,
            ModelChoice::Gpt4o => 5.0,
        }
    }

    /// Dense index into per-model tables such as call counters.
    pub fn index(self) -> usize {
        match self {
            ModelChoice::MistralSmall => 0,
            ModelChoice::Gpt4oMini => 1,
            ModelChoice::Gpt4o => 2,
        }
    }
}

/// The resolved (provider, model, cost) triple for one request.
///
/// Only constructible from a [`ModelChoice`], so provider and cost always
/// agree with the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSelection {
    provider: ProviderId,
    model: ModelChoice,
    estimated_cost: f64,
}

impl ProviderSelection {
    pub fn for_model(model: ModelChoice) -> Self {
        Self {
            provider: model.provider(),
            model,
            estimated_cost: model.estimated_cost(),
        }
    }

    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    pub fn model(&self) -> ModelChoice {
        self.model
    }

    pub fn estimated_cost(&self) -> f64 {
        self.estimated_cost
    }
}

/// A chat-completion request handed to a provider adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Full conversation, in order.
    pub messages: Vec<Message>,
    pub model: ModelChoice,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Registration approval state, owned by the user store.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Interface language for replies and system messages.
///
/// Closed set. Stored values outside it resolve to [`Language::English`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    French,
    Arabic,
}

impl Language {
    /// Parse a language choice typed by a user: a menu number, a short code,
    /// or the full name.
    pub fn parse_token(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "1" | "en" | "english" => Some(Language::English),
            "2" | "fr" | "french" => Some(Language::French),
            "3" | "ar" | "arabic" => Some(Language::Arabic),
            _ => None,
        }
    }

    /// Resolve a stored preference, falling back to the default language.
    pub fn resolve(stored: Option<&str>) -> Self {
        stored
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

/// CEFR proficiency level of the learner.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString,
    Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum GermanLevel {
    #[default]
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

/// Learner profile as kept by the user store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: CallerId,
    pub preferred_language: Language,
    pub german_level: GermanLevel,
    pub status: ApprovalStatus,
    pub experience_points: u64,
    pub created_at: DateTime<Utc>,
    pub last_active: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// A fresh profile with default language and level.
    pub fn new(id: CallerId, status: ApprovalStatus) -> Self {
        Self {
            id,
            preferred_language: Language::default(),
            german_level: GermanLevel::default(),
            status,
            experience_points: 0,
            created_at: Utc::now(),
            last_active: None,
        }
    }

    pub fn is_approved(&self) -> bool {
        self.status == ApprovalStatus::Approved
    }
}

/// One row of a learner's lesson history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonRecord {
    /// Lesson kind, e.g. `conversation`.
    pub kind: String,
    /// What the learner sent.
    pub content: String,
    /// Tutor feedback (the model output).
    pub feedback: String,
    pub points: u32,
    pub is_correct: bool,
    pub level: GermanLevel,
    pub topic: String,
    pub created_at: DateTime<Utc>,
}

impl LessonRecord {
    /// A free-conversation record.
    pub fn conversation(content: &str, feedback: &str, points: u32, level: GermanLevel) -> Self {
        Self {
            kind: "conversation".to_string(),
            content: content.to_string(),
            feedback: feedback.to_string(),
            points,
            is_correct: true,
            level,
            topic: "conversation".to_string(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_choices_map_to_fixed_providers() {
        assert_eq!(ModelChoice::MistralSmall.provider(), ProviderId::Mistral);
        assert_eq!(ModelChoice::Gpt4oMini.provider(), ProviderId::OpenAi);
        assert_eq!(ModelChoice::Gpt4o.provider(), ProviderId::OpenAi);
    }

    #[test]
    fn model_indices_are_dense() {
        let indices: Vec<usize> = ModelChoice::ALL.iter().map(|m| m.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn model_display_matches_wire_id() {
        for model in ModelChoice::ALL {
            assert_eq!(model.to_string(), model.model_id());
            assert_eq!(model.model_id().parse::<ModelChoice>().unwrap(), model);
        }
    }

    #[test]
    fn unknown_model_name_rejected() {
        assert!("gpt-5-ultra".parse::<ModelChoice>().is_err());
    }

    #[test]
    fn selection_follows_model() {
        let sel = ProviderSelection::for_model(ModelChoice::Gpt4o);
        assert_eq!(sel.provider(), ProviderId::OpenAi);
        assert_eq!(sel.estimated_cost(), 5.0);

        let sel = ProviderSelection::for_model(ModelChoice::MistralSmall);
        assert_eq!(sel.provider(), ProviderId::Mistral);
        assert_eq!(sel.estimated_cost(), 0.0);
    }

    #[test]
    fn selection_serializes_camel_case() {
        let sel = ProviderSelection::for_model(ModelChoice::Gpt4oMini);
        let json = serde_json::to_value(sel).unwrap();
        assert_eq!(json["provider"], "openai");
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["estimatedCost"], 0.24);
    }

    #[test]
    fn language_tokens() {
        assert_eq!(Language::parse_token("1"), Some(Language::English));
        assert_eq!(Language::parse_token(" FR "), Some(Language::French));
        assert_eq!(Language::parse_token("arabic"), Some(Language::Arabic));
        assert_eq!(Language::parse_token("de"), None);
    }

    #[test]
    fn unrecognized_language_resolves_to_english() {
        assert_eq!(Language::resolve(Some("german")), Language::English);
        assert_eq!(Language::resolve(None), Language::English);
        assert_eq!(Language::resolve(Some("French")), Language::French);
    }

    #[test]
    fn level_parses_case_insensitive() {
        assert_eq!("b2".parse::<GermanLevel>().unwrap(), GermanLevel::B2);
        assert_eq!(GermanLevel::default().to_string(), "A1");
    }

    #[test]
    fn new_profile_defaults() {
        let p = UserProfile::new(CallerId::new("whatsapp:+491"), ApprovalStatus::Pending);
        assert!(!p.is_approved());
        assert_eq!(p.preferred_language, Language::English);
        assert_eq!(p.german_level, GermanLevel::A1);
        assert_eq!(p.experience_points, 0);
    }

    #[test]
    fn conversation_record_tags() {
        let r = LessonRecord::conversation("Hallo", "Hallo! Wie geht's?", 10, GermanLevel::A2);
        assert_eq!(r.kind, "conversation");
        assert_eq!(r.topic, "conversation");
        assert!(r.is_correct);
        assert_eq!(r.level, GermanLevel::A2);
    }
}
