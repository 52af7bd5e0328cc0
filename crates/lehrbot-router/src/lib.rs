// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message complexity classification and provider selection for Lehrbot.
//!
//! This crate provides:
//! - [`classify`]: Heuristic complexity classification (zero-cost, zero-latency)
//! - [`select`]: Availability-aware mapping from tier to a fixed (provider, model) pair
//!
//! Both are pure functions; the orchestrator calls them once per approved
//! message before invoking a provider.

pub mod classifier;
pub mod selector;

pub use classifier::{Classification, ComplexityTier, classify, classify_detailed};
pub use selector::{Availability, RoutingDecision, route, select};
