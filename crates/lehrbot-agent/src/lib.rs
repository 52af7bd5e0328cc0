// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tutoring core for the Lehrbot service.
//!
//! The [`TutorSession`] is the per-message coordinator that:
//! - Gates callers whose registration is not approved
//! - Builds the system prompt from the learner's language, level, and reference text
//! - Classifies the message and selects a model
//! - Invokes the selected provider through the [`CompletionInvoker`]
//! - Records experience points and a lesson-history row

pub mod commands;
pub mod invoker;
pub mod locale;
pub mod prompt;
pub mod session;

pub use commands::{ChatCommand, parse_command};
pub use invoker::{CompletionInvoker, MAX_OUTPUT_TOKENS, TEMPERATURE};
pub use prompt::{DEFAULT_REFERENCE_TEXT, FileReference, load_reference_text};
pub use session::{ReplyMeta, TutorReply, TutorSession, award_points};
