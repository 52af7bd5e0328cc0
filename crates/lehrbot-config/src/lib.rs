// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Lehrbot tutoring service.
//!
//! TOML configuration with strict key checking (`deny_unknown_fields`),
//! XDG file hierarchy lookup, `LEHRBOT_*` environment overrides, and
//! miette diagnostics with typo suggestions.
//!
//! ```no_run
//! let config = lehrbot_config::load_and_validate().expect("config errors");
//! println!("service: {}", config.agent.name);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::LehrbotConfig;

/// Load configuration from the XDG hierarchy and validate it.
///
/// Figment errors are converted into diagnostics with source spans taken
/// from whichever config files exist.
pub fn load_and_validate() -> Result<LehrbotConfig, Vec<ConfigError>> {
    finish(loader::load_config(), collect_toml_sources)
}

/// Load configuration from a single file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &std::path::Path) -> Result<LehrbotConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path), || {
        std::fs::read_to_string(path)
            .map(|content| vec![(path.display().to_string(), content)])
            .unwrap_or_default()
    })
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<LehrbotConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

fn finish(
    loaded: Result<LehrbotConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<LehrbotConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Read whichever config files exist, for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let local = std::env::current_dir()
        .map(|d| d.join(loader::CONFIG_FILE_NAME))
        .unwrap_or_else(|_| loader::CONFIG_FILE_NAME.into());

    [
        Some(local),
        loader::user_config_path(),
        Some(loader::SYSTEM_CONFIG_PATH.into()),
    ]
    .into_iter()
    .flatten()
    .filter_map(|path| {
        std::fs::read_to_string(&path)
            .ok()
            .map(|content| (path.display().to_string(), content))
    })
    .collect()
}
