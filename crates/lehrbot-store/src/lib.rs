// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory [`UserStore`] for local mode and tests.
//!
//! Profiles and lesson history live in a [`DashMap`] keyed by caller id, so
//! concurrent sessions for different callers never contend on one lock.
//! Nothing survives a restart.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use lehrbot_config::model::StoreConfig;
use lehrbot_core::{
    ApprovalStatus, CallerId, GermanLevel, Language, LehrbotError, LessonRecord, UserProfile,
    UserStore,
};
use tracing::{debug, info};

#[derive(Debug, Clone)]
struct UserEntry {
    profile: UserProfile,
    lessons: Vec<LessonRecord>,
}

/// Learner store backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: DashMap<CallerId, UserEntry>,
    auto_approve: bool,
}

impl MemoryUserStore {
    /// New users start `pending` unless `auto_approve` is set.
    pub fn new(auto_approve: bool) -> Self {
        Self {
            users: DashMap::new(),
            auto_approve,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.auto_approve)
    }

    /// Marks a user approved. Admin operation, never called by the tutoring core.
    pub fn approve(&self, id: &CallerId) -> Result<(), LehrbotError> {
        self.set_status(id, ApprovalStatus::Approved)
    }

    /// Marks a user rejected. Admin operation, never called by the tutoring core.
    pub fn reject(&self, id: &CallerId) -> Result<(), LehrbotError> {
        self.set_status(id, ApprovalStatus::Rejected)
    }

    pub fn set_german_level(&self, id: &CallerId, level: GermanLevel) -> Result<(), LehrbotError> {
        self.with_entry(id, |entry| entry.profile.german_level = level)
    }

    /// Current profile, if the user exists.
    pub fn profile(&self, id: &CallerId) -> Option<UserProfile> {
        self.users.get(id).map(|entry| entry.profile.clone())
    }

    /// Lesson history in insertion order; empty for unknown users.
    pub fn lessons(&self, id: &CallerId) -> Vec<LessonRecord> {
        self.users
            .get(id)
            .map(|entry| entry.lessons.clone())
            .unwrap_or_default()
    }

    /// Number of known users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn set_status(&self, id: &CallerId, status: ApprovalStatus) -> Result<(), LehrbotError> {
        self.with_entry(id, |entry| entry.profile.status = status)?;
        info!(user = %id, status = %status, "approval status changed");
        Ok(())
    }

    fn with_entry<T>(
        &self,
        id: &CallerId,
        f: impl FnOnce(&mut UserEntry) -> T,
    ) -> Result<T, LehrbotError> {
        let mut entry = self
            .users
            .get_mut(id)
            .ok_or_else(|| LehrbotError::persistence(format!("unknown user {id}")))?;
        Ok(f(entry.value_mut()))
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get_or_create(&self, id: &CallerId) -> Result<UserProfile, LehrbotError> {
        let entry = self.users.entry(id.clone()).or_insert_with(|| {
            let status = if self.auto_approve {
                ApprovalStatus::Approved
            } else {
                ApprovalStatus::Pending
            };
            debug!(user = %id, status = %status, "creating user");
            UserEntry {
                profile: UserProfile::new(id.clone(), status),
                lessons: Vec::new(),
            }
        });
        Ok(entry.profile.clone())
    }

    async fn touch_last_active(&self, id: &CallerId) -> Result<(), LehrbotError> {
        self.with_entry(id, |entry| entry.profile.last_active = Some(Utc::now()))
    }

    async fn add_experience(&self, id: &CallerId, points: u32) -> Result<u64, LehrbotError> {
        self.with_entry(id, |entry| {
            entry.profile.experience_points += u64::from(points);
            entry.profile.experience_points
        })
    }

    async fn append_lesson_record(
        &self,
        id: &CallerId,
        record: LessonRecord,
    ) -> Result<(), LehrbotError> {
        self.with_entry(id, |entry| entry.lessons.push(record))
    }

    async fn set_preferred_language(
        &self,
        id: &CallerId,
        language: Language,
    ) -> Result<(), LehrbotError> {
        self.with_entry(id, |entry| entry.profile.preferred_language = language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn caller() -> CallerId {
        CallerId::new("whatsapp:+4915112345678")
    }

    #[tokio::test]
    async fn new_users_are_pending() {
        let store = MemoryUserStore::new(false);
        let profile = store.get_or_create(&caller()).await.unwrap();
        assert_eq!(profile.status, ApprovalStatus::Pending);
        assert_eq!(profile.preferred_language, Language::English);
    }

    #[tokio::test]
    async fn auto_approve_creates_approved_users() {
        let store = MemoryUserStore::from_config(&StoreConfig { auto_approve: true });
        assert!(store.get_or_create(&caller()).await.unwrap().is_approved());
    }

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let store = MemoryUserStore::new(false);
        let first = store.get_or_create(&caller()).await.unwrap();
        store.approve(&caller()).unwrap();
        let second = store.get_or_create(&caller()).await.unwrap();
        assert_eq!(first.created_at, second.created_at);
        assert!(second.is_approved());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_first_contact_creates_once() {
        let store = Arc::new(MemoryUserStore::new(false));
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.get_or_create(&caller()).await.unwrap().created_at
            }));
        }
        let mut stamps = Vec::new();
        for handle in handles {
            stamps.push(handle.await.unwrap());
        }
        assert!(stamps.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn experience_accumulates() {
        let store = MemoryUserStore::new(true);
        store.get_or_create(&caller()).await.unwrap();
        assert_eq!(store.add_experience(&caller(), 10).await.unwrap(), 10);
        assert_eq!(store.add_experience(&caller(), 20).await.unwrap(), 30);
        assert_eq!(store.profile(&caller()).unwrap().experience_points, 30);
    }

    #[tokio::test]
    async fn lessons_keep_order() {
        let store = MemoryUserStore::new(true);
        store.get_or_create(&caller()).await.unwrap();
        for text in ["eins", "zwei"] {
            store
                .append_lesson_record(
                    &caller(),
                    LessonRecord::conversation(text, "gut", 15, GermanLevel::A1),
                )
                .await
                .unwrap();
        }
        let lessons = store.lessons(&caller());
        assert_eq!(lessons.len(), 2);
        assert_eq!(lessons[0].content, "eins");
        assert_eq!(lessons[1].content, "zwei");
    }

    #[tokio::test]
    async fn writes_to_unknown_user_fail() {
        let store = MemoryUserStore::new(false);
        let err = store.touch_last_active(&caller()).await.unwrap_err();
        assert!(matches!(err, LehrbotError::Persistence { .. }));
        assert!(store.approve(&caller()).is_err());
        assert!(store.lessons(&caller()).is_empty());
    }

    #[tokio::test]
    async fn touch_and_language_update_profile() {
        let store = MemoryUserStore::new(false);
        store.get_or_create(&caller()).await.unwrap();
        store.touch_last_active(&caller()).await.unwrap();
        store
            .set_preferred_language(&caller(), Language::Arabic)
            .await
            .unwrap();
        store.set_german_level(&caller(), GermanLevel::B1).unwrap();
        let profile = store.profile(&caller()).unwrap();
        assert!(profile.last_active.is_some());
        assert_eq!(profile.preferred_language, Language::Arabic);
        assert_eq!(profile.german_level, GermanLevel::B1);
    }

    #[tokio::test]
    async fn reject_sets_status() {
        let store = MemoryUserStore::new(false);
        store.get_or_create(&caller()).await.unwrap();
        store.reject(&caller()).unwrap();
        assert_eq!(
            store.profile(&caller()).unwrap().status,
            ApprovalStatus::Rejected
        );
    }
}
