// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end configuration loading and validation.

use lehrbot_config::{ConfigError, load_and_validate_str};

#[test]
fn full_config_round_trips_through_validation() {
    let config = load_and_validate_str(
        r#"
[agent]
name = "deutschlehrer"
log_level = "debug"
reference_file = "/srv/lehrbot/training_data.txt"

[openai]
api_key = "sk-test"
timeout_secs = 20

[mistral]
api_key = "m-test"

[cost]
daily_budget_usd = 25.0

[store]
auto_approve = true
"#,
    )
    .expect("valid config");

    assert_eq!(config.agent.name, "deutschlehrer");
    assert_eq!(config.openai.timeout_secs, 20);
    assert_eq!(config.mistral.timeout_secs, 30);
    assert_eq!(config.mistral.base_url, "https://api.mistral.ai/v1");
    assert!(config.store.auto_approve);
}

#[test]
fn typo_in_section_reports_suggestion() {
    let errors = load_and_validate_str("[store]\nauto_aprove = true\n").unwrap_err();
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { suggestion: Some(s), .. } if s == "auto_approve")
    });
    assert!(found, "errors: {errors:?}");
}

#[test]
fn wrong_type_reported() {
    let errors = load_and_validate_str("[openai]\ntimeout_secs = \"soon\"\n").unwrap_err();
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("timeout_secs")))
    );
}

#[test]
fn semantic_errors_surface_after_parse() {
    let errors = load_and_validate_str("[openai]\nbase_url = \"ftp://example\"\n").unwrap_err();
    assert!(matches!(&errors[0], ConfigError::Validation { message } if message.contains("openai.base_url")));
}

#[test]
fn env_override_passes_validation() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("lehrbot.toml", "[agent]\nname = \"lehrbot-test\"\n")?;
        jail.set_env("LEHRBOT_OPENAI_API_KEY", "sk-from-env");
        jail.set_env("LEHRBOT_COST_DAILY_BUDGET_USD", "3.5");

        let config = lehrbot_config::load_and_validate_path(std::path::Path::new("lehrbot.toml"))
            .unwrap_or_else(|errors| panic!("unexpected config errors: {errors:?}"));
        assert_eq!(config.agent.name, "lehrbot-test");
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-from-env"));
        assert_eq!(config.cost.daily_budget_usd, Some(3.5));
        Ok(())
    });
}
