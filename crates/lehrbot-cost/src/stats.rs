// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-(provider, model) call counters.

use std::sync::atomic::{AtomicU64, Ordering};

use lehrbot_core::{ModelChoice, ProviderId};
use serde::Serialize;

/// Successful-invocation counters, one per [`ModelChoice`].
///
/// Start at zero, only ever increase, never persisted. Shared through `Arc`;
/// each increment is a single atomic add.
#[derive(Debug, Default)]
pub struct ProviderStats {
    calls: [AtomicU64; ModelChoice::ALL.len()],
}

/// One row of a [`ProviderStats::snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsEntry {
    pub provider: ProviderId,
    pub model: ModelChoice,
    pub calls: u64,
}

impl ProviderStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one successful call to `model`.
    pub fn increment(&self, model: ModelChoice) {
        self.calls[model.index()].fetch_add(1, Ordering::Relaxed);
    }

    pub fn calls(&self, model: ModelChoice) -> u64 {
        self.calls[model.index()].load(Ordering::Relaxed)
    }

    /// Sum over all models.
    pub fn total(&self) -> u64 {
        self.calls.iter().map(|c| c.load(Ordering::Relaxed)).sum()
    }

    /// Current counts for every model, in [`ModelChoice::ALL`] order.
    pub fn snapshot(&self) -> Vec<StatsEntry> {
        ModelChoice::ALL
            .iter()
            .map(|&model| StatsEntry {
                provider: model.provider(),
                model,
                calls: self.calls(model),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn starts_at_zero() {
        let stats = ProviderStats::new();
        assert_eq!(stats.total(), 0);
        assert!(stats.snapshot().iter().all(|e| e.calls == 0));
    }

    #[test]
    fn increments_only_selected_model() {
        let stats = ProviderStats::new();
        stats.increment(ModelChoice::Gpt4o);
        stats.increment(ModelChoice::Gpt4o);
        stats.increment(ModelChoice::MistralSmall);
        assert_eq!(stats.calls(ModelChoice::Gpt4o), 2);
        assert_eq!(stats.calls(ModelChoice::MistralSmall), 1);
        assert_eq!(stats.calls(ModelChoice::Gpt4oMini), 0);
        assert_eq!(stats.total(), 3);
    }

    #[test]
    fn snapshot_carries_provider() {
        let stats = ProviderStats::new();
        stats.increment(ModelChoice::MistralSmall);
        let snapshot = stats.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(
            snapshot[0],
            StatsEntry {
                provider: ProviderId::Mistral,
                model: ModelChoice::MistralSmall,
                calls: 1,
            }
        );
        let json = serde_json::to_value(snapshot[1]).unwrap();
        assert_eq!(json["provider"], "openai");
        assert_eq!(json["model"], "gpt-4o-mini");
    }

    #[tokio::test]
    async fn concurrent_increments_are_not_lost() {
        let stats = Arc::new(ProviderStats::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let stats = Arc::clone(&stats);
            handles.push(tokio::spawn(async move {
                for _ in 0..500 {
                    stats.increment(ModelChoice::Gpt4oMini);
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(stats.calls(ModelChoice::Gpt4oMini), 4000);
    }
}
