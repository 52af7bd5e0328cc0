// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Lehrbot tutoring service.
//!
//! This crate provides the error taxonomy, the domain types shared by every
//! other crate, and the adapter traits for the services the tutoring core
//! calls into (providers, user store, reference text).

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::LehrbotError;
pub use types::{
    ApprovalStatus, CallerId, CompletionRequest, GermanLevel, Language, LessonRecord, Message,
    ModelChoice, ProviderId, ProviderSelection, Role, UserProfile,
};

pub use traits::{CompletionProvider, ReferenceSource, UserStore};
