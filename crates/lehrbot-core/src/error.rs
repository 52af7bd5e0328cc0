// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Lehrbot tutoring service.

use thiserror::Error;

use crate::types::ProviderId;

/// The primary error type used across all Lehrbot adapter traits and core operations.
///
/// An unapproved caller is not represented here: gating is a normal outcome
/// carried in the reply metadata.
#[derive(Debug, Error)]
pub enum LehrbotError {
    /// Configuration errors (invalid TOML, bad values, unusable header values).
    #[error("configuration error: {0}")]
    Config(String),

    /// A provider has no credentials. Fatal at construction for the primary
    /// provider; returned by the invoker when routed to an absent provider.
    #[error("provider {provider} is unavailable: no credentials configured")]
    ProviderUnavailable { provider: ProviderId },

    /// An upstream chat-completion call failed (transport error, non-2xx
    /// status, or malformed body). `status` is `None` for transport errors.
    #[error("{provider} call failed{}: {message}", status.map(|s| format!(" ({s})")).unwrap_or_default())]
    ProviderCallFailed {
        provider: ProviderId,
        status: Option<u16>,
        message: String,
    },

    /// User store read or write failed.
    #[error("persistence error: {message}")]
    Persistence {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LehrbotError {
    /// Shorthand for a [`LehrbotError::Persistence`] without an underlying source.
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true when the error came from an upstream provider call.
    pub fn is_provider_call(&self) -> bool {
        matches!(self, Self::ProviderCallFailed { .. })
    }
}
