// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./lehrbot.toml` > `~/.config/lehrbot/lehrbot.toml` > `/etc/lehrbot/lehrbot.toml`
//! with environment variable overrides via `LEHRBOT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::LehrbotConfig;

/// File name looked up in each configuration directory.
pub const CONFIG_FILE_NAME: &str = "lehrbot.toml";

/// System-wide configuration path.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/lehrbot/lehrbot.toml";

/// Section names that `LEHRBOT_<SECTION>_<KEY>` variables may address.
const ENV_SECTIONS: &[&str] = &["agent", "openai", "mistral", "cost", "store"];

/// Path of the per-user configuration file, if a config directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lehrbot").join(CONFIG_FILE_NAME))
}

/// Build the layered Figment without extracting it.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/lehrbot/lehrbot.toml`
/// 3. `~/.config/lehrbot/lehrbot.toml`
/// 4. `./lehrbot.toml`
/// 5. `LEHRBOT_*` environment variables
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(LehrbotConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(CONFIG_FILE_NAME))
        .merge(env_provider())
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<LehrbotConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string over compiled defaults (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<LehrbotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LehrbotConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one explicit file with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LehrbotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LehrbotConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Environment provider mapping `LEHRBOT_<SECTION>_<KEY>` to `section.key`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `LEHRBOT_OPENAI_API_KEY` maps to `openai.api_key`, not `openai.api.key`.
/// Figment hands over the stripped key in its original case.
fn env_provider() -> Env {
    Env::prefixed("LEHRBOT_").map(|key| map_env_key(&key.as_str().to_ascii_lowercase()).into())
}

/// Map a lowercased, prefix-stripped env key to a dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    for section in ENV_SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|r| r.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
