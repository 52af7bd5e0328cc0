// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Lehrbot integration tests.
//!
//! Provides mock adapters and a test harness for exercising the tutoring
//! pipeline without network access.

pub mod failing_store;
pub mod harness;
pub mod mock_provider;

pub use failing_store::FailingStore;
pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_provider::MockProvider;
