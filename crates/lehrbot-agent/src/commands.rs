// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat commands recognized before a message reaches the tutor.

use lehrbot_core::Language;

/// Words that open the language command.
const LANGUAGE_COMMANDS: &[&str] = &["lang", "language", "sprache"];

/// A command typed into the chat instead of a tutoring message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand {
    /// `lang 2`, `sprache fr`, `language arabic`.
    SetLanguage(Language),
    /// The language command without a recognizable choice.
    ShowLanguageMenu,
}

/// Parse `text` as a command. `None` means it is an ordinary message.
///
/// The command word must be the whole first word, so `langsam` stays a
/// tutoring message.
pub fn parse_command(text: &str) -> Option<ChatCommand> {
    let lowered = text.trim().to_lowercase();
    let mut words = lowered.split_whitespace();
    let first = words.next()?;
    if !LANGUAGE_COMMANDS.contains(&first) {
        return None;
    }
    match words.next().and_then(Language::parse_token) {
        Some(language) => Some(ChatCommand::SetLanguage(language)),
        None => Some(ChatCommand::ShowLanguageMenu),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_with_choice() {
        assert_eq!(
            parse_command("LANG 2"),
            Some(ChatCommand::SetLanguage(Language::French))
        );
        assert_eq!(
            parse_command("  sprache   ar "),
            Some(ChatCommand::SetLanguage(Language::Arabic))
        );
        assert_eq!(
            parse_command("language english"),
            Some(ChatCommand::SetLanguage(Language::English))
        );
    }

    #[test]
    fn language_without_valid_choice_shows_menu() {
        assert_eq!(parse_command("lang"), Some(ChatCommand::ShowLanguageMenu));
        assert_eq!(parse_command("Sprache deutsch"), Some(ChatCommand::ShowLanguageMenu));
    }

    #[test]
    fn ordinary_messages_are_not_commands() {
        assert_eq!(parse_command("Langsam bitte, ich verstehe nicht"), None);
        assert_eq!(parse_command("Hallo"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("   "), None);
    }
}
