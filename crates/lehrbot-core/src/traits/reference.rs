// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Source of the static reference text embedded in every system message.

use async_trait::async_trait;

use crate::error::LehrbotError;

/// Loads reference (training) text once at start-up.
///
/// May fail; callers substitute a built-in default.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    async fn load(&self) -> Result<String, LehrbotError>;
}
