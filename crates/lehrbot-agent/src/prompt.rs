// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! System prompt assembly and reference text loading.

use std::path::PathBuf;

use async_trait::async_trait;
use lehrbot_core::{
    GermanLevel, Language, LehrbotError, Message, ReferenceSource, UserProfile,
};
use tracing::{info, warn};

/// Reference text used when none can be loaded.
pub const DEFAULT_REFERENCE_TEXT: &str = "Standard DaF/DaZ Wissen";

/// The tutor's system message for a learner.
pub fn system_prompt(language: Language, level: GermanLevel, reference: &str) -> String {
    format!(
        "You are a professional DaF/DaZ teacher.\n\
         USER LANGUAGE: {language}\n\
         GERMAN LEVEL: {level}\n\
         TRAINING DATA:\n\
         {reference}\n\
         Always reply in the user's language."
    )
}

/// The full request history for one turn: exactly `[system, user]`.
pub fn build_messages(profile: &UserProfile, reference: &str, input: &str) -> Vec<Message> {
    vec![
        Message::system(system_prompt(
            profile.preferred_language,
            profile.german_level,
            reference,
        )),
        Message::user(input),
    ]
}

/// Reference text read from a file.
#[derive(Debug, Clone)]
pub struct FileReference {
    path: PathBuf,
}

impl FileReference {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ReferenceSource for FileReference {
    async fn load(&self) -> Result<String, LehrbotError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| {
                LehrbotError::Internal(format!(
                    "failed to read reference file {}: {e}",
                    self.path.display()
                ))
            })
    }
}

/// Load reference text once, substituting [`DEFAULT_REFERENCE_TEXT`] when the
/// source fails or yields only whitespace.
pub async fn load_reference_text(source: &dyn ReferenceSource) -> String {
    match source.load().await {
        Ok(text) if !text.trim().is_empty() => {
            info!(chars = text.chars().count(), "loaded reference text");
            text.trim().to_string()
        }
        Ok(_) => {
            warn!("reference text is empty, using built-in default");
            DEFAULT_REFERENCE_TEXT.to_string()
        }
        Err(e) => {
            warn!(error = %e, "failed to load reference text, using built-in default");
            DEFAULT_REFERENCE_TEXT.to_string()
        }
    }
}
