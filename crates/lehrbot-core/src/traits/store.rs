// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User store trait for learner profiles and lesson history.

use async_trait::async_trait;

use crate::error::LehrbotError;
use crate::types::{CallerId, Language, LessonRecord, UserProfile};

/// Persistence backend for learner state.
///
/// The tutoring core reads approval status, language, and level, and writes
/// activity, experience points, and lesson history. It never changes
/// approval status.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Returns the profile for `id`, creating it on first contact.
    ///
    /// Idempotent: the same id always yields the same profile, created once.
    async fn get_or_create(&self, id: &CallerId) -> Result<UserProfile, LehrbotError>;

    /// Stamps the caller's last-active time with the current time.
    async fn touch_last_active(&self, id: &CallerId) -> Result<(), LehrbotError>;

    /// Adds experience points and returns the new total.
    async fn add_experience(&self, id: &CallerId, points: u32) -> Result<u64, LehrbotError>;

    /// Appends one row to the caller's lesson history.
    async fn append_lesson_record(
        &self,
        id: &CallerId,
        record: LessonRecord,
    ) -> Result<(), LehrbotError>;

    /// Changes the caller's reply language.
    async fn set_preferred_language(
        &self,
        id: &CallerId,
        language: Language,
    ) -> Result<(), LehrbotError>;
}
