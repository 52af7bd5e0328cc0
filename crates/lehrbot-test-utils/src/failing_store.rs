// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User store wrapper that injects write failures.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use lehrbot_core::{CallerId, Language, LehrbotError, LessonRecord, UserProfile, UserStore};
use lehrbot_store::MemoryUserStore;

/// Delegates to a [`MemoryUserStore`] but fails selected writes on demand.
pub struct FailingStore {
    inner: Arc<MemoryUserStore>,
    fail_progress_writes: AtomicBool,
    fail_touch: AtomicBool,
}

impl FailingStore {
    pub fn new(inner: Arc<MemoryUserStore>) -> Self {
        Self {
            inner,
            fail_progress_writes: AtomicBool::new(false),
            fail_touch: AtomicBool::new(false),
        }
    }

    /// Make `add_experience` and `append_lesson_record` fail.
    pub fn fail_progress_writes(&self, fail: bool) {
        self.fail_progress_writes.store(fail, Ordering::SeqCst);
    }

    /// Make `touch_last_active` fail.
    pub fn fail_touch(&self, fail: bool) {
        self.fail_touch.store(fail, Ordering::SeqCst);
    }

    fn injected(what: &str) -> LehrbotError {
        LehrbotError::persistence(format!("injected {what} failure"))
    }
}

#[async_trait]
impl UserStore for FailingStore {
    async fn get_or_create(&self, id: &CallerId) -> Result<UserProfile, LehrbotError> {
        self.inner.get_or_create(id).await
    }

    async fn touch_last_active(&self, id: &CallerId) -> Result<(), LehrbotError> {
        if self.fail_touch.load(Ordering::SeqCst) {
            return Err(Self::injected("touch"));
        }
        self.inner.touch_last_active(id).await
    }

    async fn add_experience(&self, id: &CallerId, points: u32) -> Result<u64, LehrbotError> {
        if self.fail_progress_writes.load(Ordering::SeqCst) {
            return Err(Self::injected("experience"));
        }
        self.inner.add_experience(id, points).await
    }

    async fn append_lesson_record(
        &self,
        id: &CallerId,
        record: LessonRecord,
    ) -> Result<(), LehrbotError> {
        if self.fail_progress_writes.load(Ordering::SeqCst) {
            return Err(Self::injected("lesson"));
        }
        self.inner.append_lesson_record(id, record).await
    }

    async fn set_preferred_language(
        &self,
        id: &CallerId,
        language: Language,
    ) -> Result<(), LehrbotError> {
        self.inner.set_preferred_language(id, language).await
    }
}
