// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lehrbot - German tutoring assistant with cost-aware model routing.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod app;
mod shell;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use lehrbot_config::LehrbotConfig;
use tracing::error;

use crate::app::{App, TRY_AGAIN_TEXT, print_reply};

/// Crates whose log level follows `agent.log_level`; everything else logs at warn.
const LOG_TARGETS: &[&str] = &[
    "lehrbot",
    "lehrbot_agent",
    "lehrbot_config",
    "lehrbot_cost",
    "lehrbot_mistral",
    "lehrbot_openai",
    "lehrbot_router",
    "lehrbot_store",
];

/// Lehrbot - German tutoring assistant with cost-aware model routing.
#[derive(Parser, Debug)]
#[command(name = "lehrbot", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer a single message and exit.
    Ask {
        /// Caller id, e.g. `whatsapp:+4915112345678`.
        #[arg(long = "from")]
        from: String,
        /// Approve the caller before answering.
        #[arg(long)]
        approve: bool,
        /// Print the reply and routing metadata as JSON.
        #[arg(long)]
        json: bool,
        /// The message text.
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Launch an interactive chat session.
    Shell {
        /// Caller id, e.g. `whatsapp:+4915112345678`.
        #[arg(long = "from", default_value = "local:shell")]
        from: String,
        /// Approve the caller before starting.
        #[arg(long)]
        approve: bool,
    },
    /// Print the effective configuration with secrets redacted.
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => lehrbot_config::load_and_validate_path(path),
        None => lehrbot_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            lehrbot_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.agent.log_level);

    match cli.command {
        Commands::Config => print_config(&config),
        Commands::Ask {
            from,
            approve,
            json,
            message,
        } => ask(&config, &from, approve, json, &message.join(" ")).await,
        Commands::Shell { from, approve } => {
            let app = match App::build(&config).await {
                Ok(app) => app,
                Err(e) => return startup_failed(e),
            };
            let caller = match app.caller(&from, approve).await {
                Ok(caller) => caller,
                Err(e) => return startup_failed(e),
            };
            match shell::run_shell(app, caller).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

async fn ask(
    config: &LehrbotConfig,
    from: &str,
    approve: bool,
    json: bool,
    message: &str,
) -> ExitCode {
    let app = match App::build(config).await {
        Ok(app) => app,
        Err(e) => return startup_failed(e),
    };
    let caller = match app.caller(from, approve).await {
        Ok(caller) => caller,
        Err(e) => return startup_failed(e),
    };

    match app.session.handle(message, &caller).await {
        Ok(reply) if json => match serde_json::to_string_pretty(&reply) {
            Ok(out) => {
                println!("{out}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: failed to serialize reply: {e}");
                ExitCode::FAILURE
            }
        },
        Ok(reply) => {
            print_reply(&reply);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "failed to answer message");
            println!("{TRY_AGAIN_TEXT}");
            ExitCode::FAILURE
        }
    }
}

fn print_config(config: &LehrbotConfig) -> ExitCode {
    match toml::to_string_pretty(&config.redacted()) {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to render config: {e}");
            ExitCode::FAILURE
        }
    }
}

fn startup_failed(e: lehrbot_core::LehrbotError) -> ExitCode {
    eprintln!("error: {e}");
    if matches!(e, lehrbot_core::LehrbotError::ProviderUnavailable { .. }) {
        eprintln!("hint: set openai.api_key in lehrbot.toml or export OPENAI_API_KEY");
    }
    ExitCode::FAILURE
}

/// Log to stderr; `RUST_LOG` overrides the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn default_directives(log_level: &str) -> String {
    std::iter::once("warn".to_string())
        .chain(LOG_TARGETS.iter().map(|t| format!("{t}={log_level}")))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn parses_ask_with_multiword_message() {
        let cli = Cli::try_parse_from([
            "lehrbot", "ask", "--from", "whatsapp:+491", "--approve", "Wie", "geht's",
        ])
        .unwrap();
        match cli.command {
            Commands::Ask {
                from,
                approve,
                json,
                message,
            } => {
                assert_eq!(from, "whatsapp:+491");
                assert!(approve);
                assert!(!json);
                assert_eq!(message.join(" "), "Wie geht's");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn ask_requires_message() {
        assert!(Cli::try_parse_from(["lehrbot", "ask", "--from", "x"]).is_err());
    }

    #[test]
    fn global_config_flag() {
        let cli = Cli::try_parse_from(["lehrbot", "config", "--config", "/tmp/l.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/l.toml")));
        assert!(matches!(cli.command, Commands::Config));
    }

    #[test]
    fn directives_cover_workspace_crates() {
        let directives = default_directives("debug");
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("lehrbot_agent=debug"));
        assert!(directives.contains("lehrbot_router=debug"));
        assert!(tracing_subscriber::EnvFilter::try_new(&directives).is_ok());
    }
}
