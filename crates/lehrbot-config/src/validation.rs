// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints serde cannot express. All failures are
//! collected; validation does not stop at the first one.

use crate::diagnostic::ConfigError;
use crate::model::LehrbotConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
pub fn validate_config(config: &LehrbotConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.agent.name.trim().is_empty() {
        errors.push(invalid("agent.name must not be empty".to_string()));
    }

    if !LOG_LEVELS.contains(&config.agent.log_level.to_lowercase().as_str()) {
        errors.push(invalid(format!(
            "agent.log_level `{}` is not one of {}",
            config.agent.log_level,
            LOG_LEVELS.join(", ")
        )));
    }

    for (section, base_url, timeout_secs) in [
        ("openai", &config.openai.base_url, config.openai.timeout_secs),
        ("mistral", &config.mistral.base_url, config.mistral.timeout_secs),
    ] {
        let url = base_url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            errors.push(invalid(format!(
                "{section}.base_url must be an http(s) URL, got `{url}`"
            )));
        }
        if timeout_secs == 0 {
            errors.push(invalid(format!("{section}.timeout_secs must be greater than 0")));
        }
    }

    if let Some(daily) = config.cost.daily_budget_usd
        && daily < 0.0
    {
        errors.push(invalid(format!(
            "cost.daily_budget_usd must be non-negative, got {daily}"
        )));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Validation { message }
}
