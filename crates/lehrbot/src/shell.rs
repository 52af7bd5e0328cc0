// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lehrbot shell` command implementation.
//!
//! An interactive REPL that plays the chat side of one caller. Lines are
//! handled exactly like inbound chat messages, plus a few local slash commands.

use colored::Colorize;
use lehrbot_core::{CallerId, LehrbotError};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::error;

use crate::app::{App, TRY_AGAIN_TEXT, print_reply};

/// Runs the REPL until `/quit`, Ctrl+C, or Ctrl+D.
pub async fn run_shell(app: App, caller: CallerId) -> Result<(), LehrbotError> {
    let mut rl = DefaultEditor::new()
        .map_err(|e| LehrbotError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "lehrbot shell".bold().green());
    println!(
        "Chatting as {}. Type {} for commands, {} to exit.\n",
        caller.as_str().cyan(),
        "/help".yellow(),
        "/quit".yellow()
    );

    let prompt = format!("{}> ", "du".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                match trimmed {
                    "/quit" | "/exit" => break,
                    "/help" => print_help(),
                    "/stats" => print_stats(&app),
                    "/cost" => {
                        let total = app.session.daily_cost().await;
                        println!("{}", format!("estimated cost today: ${total:.2}").dimmed());
                    }
                    "/me" => match app.users.profile(&caller) {
                        Some(p) => println!(
                            "{}",
                            format!(
                                "status={} language={} level={} xp={} lessons={}",
                                p.status,
                                p.preferred_language,
                                p.german_level,
                                p.experience_points,
                                app.users.lessons(&caller).len()
                            )
                            .dimmed()
                        ),
                        None => println!("{}", "no profile yet".dimmed()),
                    },
                    message => match app.session.handle(message, &caller).await {
                        Ok(reply) => print_reply(&reply),
                        Err(e) => {
                            error!(error = %e, "failed to answer message");
                            println!("{TRY_AGAIN_TEXT}");
                        }
                    },
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    println!("{}", "tschüss".dimmed());
    Ok(())
}

fn print_help() {
    println!("  {}      change reply language (1 English, 2 Français, 3 العربية)", "lang <n>".yellow());
    println!("  {}        calls per model since start, memory use", "/stats".yellow());
    println!("  {}         estimated cost today", "/cost".yellow());
    println!("  {}           your profile", "/me".yellow());
    println!("  {}         leave the shell", "/quit".yellow());
}

fn print_stats(app: &App) {
    for entry in app.session.stats().snapshot() {
        println!(
            "  {:<8} {:<22} {}",
            entry.provider.to_string(),
            entry.model.to_string(),
            entry.calls
        );
    }
    println!("  {}", memory_summary().dimmed());
}

/// Heap and resident memory as reported by jemalloc.
#[cfg(not(target_env = "msvc"))]
fn memory_summary() -> String {
    let _ = tikv_jemalloc_ctl::epoch::advance();
    let allocated = tikv_jemalloc_ctl::stats::allocated::read().unwrap_or(0);
    let resident = tikv_jemalloc_ctl::stats::resident::read().unwrap_or(0);
    format!(
        "heap: {:.1} MB, resident: {:.1} MB",
        allocated as f64 / (1024.0 * 1024.0),
        resident as f64 / (1024.0 * 1024.0)
    )
}

#[cfg(target_env = "msvc")]
fn memory_summary() -> String {
    "memory stats not available on MSVC".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn memory_summary_reports_heap_and_resident() {
        let summary = memory_summary();
        assert!(summary.starts_with("heap: "), "{summary}");
        assert!(summary.contains(" MB, resident: "), "{summary}");
        assert!(summary.ends_with(" MB"), "{summary}");
    }
}
