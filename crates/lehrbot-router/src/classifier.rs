// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic message complexity classification.
//!
//! Assigns every inbound learner message one of three coarse tiers using
//! ordered rules (first match wins). No network, no model call, no state.

use serde::Serialize;
use strum::Display;

/// Messages with fewer characters than this (after trimming) are simple.
pub const SHORT_MESSAGE_CHARS: usize = 10;

/// Messages with more characters than this are complex.
pub const LONG_MESSAGE_CHARS: usize = 150;

/// More question marks than this makes a message complex.
pub const MAX_SIMPLE_QUESTION_MARKS: usize = 2;

/// Coarse difficulty of an inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ComplexityTier {
    /// Greetings, thanks, very short messages.
    Simple,
    /// Ordinary conversation.
    Medium,
    /// Explanation-seeking, long, or question-heavy messages.
    Complex,
}

/// Greeting openers (prefix match on the lowercased message).
const GREETING_PREFIXES: &[&str] = &[
    "hallo", "hi", "hey", "hello", "bonjour", "salut", "marhaba", "ahlan",
];

/// Thanks tokens (substring match).
const GRATITUDE_TOKENS: &[&str] = &["danke", "merci", "shukran"];

/// Explanation-seeking vocabulary (substring match).
const EXPLANATION_KEYWORDS: &[&str] = &[
    "grammatik",
    "grammar",
    "explain",
    "erklär",
    "why",
    "warum",
    "unterschied",
    "difference",
    "regel",
    "rule",
];

/// Result of classifying a message: the tier and which rule produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub tier: ComplexityTier,
    pub reason: &'static str,
}

/// Classify a message into a [`ComplexityTier`].
///
/// Total and deterministic; empty or whitespace-only input is simple.
pub fn classify(message: &str) -> ComplexityTier {
    classify_detailed(message).tier
}

/// Classify a message and report which rule matched.
pub fn classify_detailed(message: &str) -> Classification {
    let msg = message.trim().to_lowercase();
    let length = msg.chars().count();

    if length < SHORT_MESSAGE_CHARS {
        return Classification {
            tier: ComplexityTier::Simple,
            reason: "short message",
        };
    }

    if GREETING_PREFIXES.iter().any(|g| msg.starts_with(g))
        || GRATITUDE_TOKENS.iter().any(|t| msg.contains(t))
    {
        return Classification {
            tier: ComplexityTier::Simple,
            reason: "greeting or thanks",
        };
    }

    if EXPLANATION_KEYWORDS.iter().any(|k| msg.contains(k)) {
        return Classification {
            tier: ComplexityTier::Complex,
            reason: "explanation requested",
        };
    }
    if length > LONG_MESSAGE_CHARS {
        return Classification {
            tier: ComplexityTier::Complex,
            reason: "long message",
        };
    }
    if msg.matches('?').count() > MAX_SIMPLE_QUESTION_MARKS {
        return Classification {
            tier: ComplexityTier::Complex,
            reason: "many questions",
        };
    }

    Classification {
        tier: ComplexityTier::Medium,
        reason: "ordinary conversation",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_and_whitespace_are_simple() {
        assert_eq!(classify(""), ComplexityTier::Simple);
        assert_eq!(classify("   \n\t "), ComplexityTier::Simple);
    }

    #[test]
    fn short_message_is_simple_even_with_keyword() {
        // "warum?" is short; the length rule runs first.
        assert_eq!(classify("warum?"), ComplexityTier::Simple);
        assert_eq!(classify_detailed("warum?").reason, "short message");
    }

    #[test]
    fn greetings_are_simple() {
        assert_eq!(classify("Hallo, wie geht es dir heute?"), ComplexityTier::Simple);
        assert_eq!(classify("Bonjour tout le monde"), ComplexityTier::Simple);
        assert_eq!(classify("ahlan wa sahlan ya ustaz"), ComplexityTier::Simple);
    }

    #[test]
    fn greeting_beats_keyword() {
        let tier = classify("Hello, can you explain the dative case?");
        assert_eq!(tier, ComplexityTier::Simple);
    }

    #[test]
    fn thanks_anywhere_is_simple() {
        assert_eq!(classify("Vielen Dank, danke schön!"), ComplexityTier::Simple);
        assert_eq!(classify("ok merci beaucoup"), ComplexityTier::Simple);
    }

    #[test]
    fn explanation_keywords_are_complex() {
        assert_eq!(
            classify("Was ist der Unterschied zwischen seit und seitdem?"),
            ComplexityTier::Complex
        );
        assert_eq!(classify("Kannst du die Grammatik erklären"), ComplexityTier::Complex);
        assert_eq!(
            classify_detailed("Why is it 'der Tisch'").reason,
            "explanation requested"
        );
    }

    #[test]
    fn long_message_is_complex() {
        let msg = "Ich habe gestern mit meiner Nachbarin gesprochen ".repeat(4);
        assert!(msg.trim().chars().count() > LONG_MESSAGE_CHARS);
        assert_eq!(classify_detailed(&msg).reason, "long message");
    }

    #[test]
    fn three_question_marks_are_complex() {
        assert_eq!(classify("Wer? Wo? Wann?"), ComplexityTier::Complex);
        assert_eq!(classify("Wo bist du? Wann?"), ComplexityTier::Medium);
    }

    #[test]
    fn ordinary_sentence_is_medium() {
        assert_eq!(classify("Wie geht's"), ComplexityTier::Medium);
        assert_eq!(classify("Ich gehe morgen ins Kino."), ComplexityTier::Medium);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // Nine Arabic letters: 18 bytes, still below the short threshold.
        assert_eq!(classify("ابتثجحخدذ"), ComplexityTier::Simple);
    }

    #[test]
    fn tier_display_and_json() {
        assert_eq!(ComplexityTier::Medium.to_string(), "medium");
        assert_eq!(
            serde_json::to_value(ComplexityTier::Complex).unwrap(),
            "complex"
        );
    }

    proptest! {
        #[test]
        fn anything_shorter_than_threshold_is_simple(s in "[a-zA-Z0-9 ?!.äöüß]{0,9}") {
            prop_assert_eq!(classify(&s), ComplexityTier::Simple);
        }

        #[test]
        fn keyword_in_plain_text_is_complex(
            filler in "[k-p]{10,60}",
            keyword in proptest::sample::select(EXPLANATION_KEYWORDS),
        ) {
            let msg = format!("{filler} {keyword}");
            prop_assert_eq!(classify(&msg), ComplexityTier::Complex);
        }

        #[test]
        fn greeting_prefix_is_simple(
            greeting in proptest::sample::select(GREETING_PREFIXES),
            rest in "[a-z ?]{10,120}",
        ) {
            let msg = format!("{greeting} {rest}");
            prop_assert_eq!(classify(&msg), ComplexityTier::Simple);
        }
    }
}
