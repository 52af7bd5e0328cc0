// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maps a complexity tier to a concrete (provider, model) pair.

use lehrbot_core::{ModelChoice, ProviderId, ProviderSelection};

use crate::classifier::{ComplexityTier, classify_detailed};

/// Which optional providers are configured.
///
/// The primary provider is always available; the service refuses to start
/// without it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Availability {
    pub mistral: bool,
}

impl Availability {
    /// Both providers configured.
    pub fn all() -> Self {
        Self { mistral: true }
    }

    /// Only the primary provider configured.
    pub fn primary_only() -> Self {
        Self { mistral: false }
    }

    pub fn is_available(&self, provider: ProviderId) -> bool {
        match provider {
            ProviderId::OpenAi => true,
            ProviderId::Mistral => self.mistral,
        }
    }
}

/// Choose the model for a tier.
///
/// Pure and total: every (tier, availability) combination yields a valid
/// selection, and an unavailable provider is never chosen.
pub fn select(tier: ComplexityTier, availability: Availability) -> ProviderSelection {
    let model = match tier {
        ComplexityTier::Simple if availability.mistral => ModelChoice::MistralSmall,
        ComplexityTier::Complex => ModelChoice::Gpt4o,
        _ => ModelChoice::Gpt4oMini,
    };
    ProviderSelection::for_model(model)
}

/// Outcome of classifying and selecting for one message.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingDecision {
    pub tier: ComplexityTier,
    pub reason: &'static str,
    pub selection: ProviderSelection,
}

/// Classify `message` and select a model for it in one step.
pub fn route(message: &str, availability: Availability) -> RoutingDecision {
    let classification = classify_detailed(message);
    RoutingDecision {
        tier: classification.tier,
        reason: classification.reason,
        selection: select(classification.tier, availability),
    }
}
