// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the services the tutoring core calls into.
//!
//! All adapters use `#[async_trait]` for dynamic dispatch compatibility.

pub mod provider;
pub mod reference;
pub mod store;

pub use provider::CompletionProvider;
pub use reference::ReferenceSource;
pub use store::UserStore;
