// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Usage accounting for the Lehrbot tutoring service.
//!
//! This crate provides:
//! - **Provider stats**: Lock-free per-model call counters, injected into the invoker
//! - **Budget tracker**: In-memory daily estimated-cost total with an 80% warning
//!
//! Neither ever blocks a request; both are observational.

pub mod budget;
pub mod stats;

pub use budget::DailyCostTracker;
pub use stats::{ProviderStats, StatsEntry};
