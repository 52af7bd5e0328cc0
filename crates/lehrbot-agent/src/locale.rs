// SPDX-FileCopyrightText: 2026 Lehrbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed reply texts for the three interface languages.

use lehrbot_core::Language;

/// Language selection menu. Deliberately multilingual, so not keyed by language.
pub const LANGUAGE_MENU: &str =
    "🌍 Sprache ändern:\nLANG 1 (English)\nLANG 2 (Français)\nLANG 3 (العربية)";

/// Reply for callers whose registration has not been approved.
pub fn pending_approval(language: Language) -> &'static str {
    match language {
        Language::English => "⏳ Your registration is not approved yet.",
        Language::French => "⏳ Votre inscription n'est pas encore approuvée.",
        Language::Arabic => "⏳ لم تتم الموافقة على تسجيلك بعد.",
    }
}

/// Confirmation after the caller changed their reply language.
pub fn language_updated(language: Language) -> &'static str {
    match language {
        Language::English => "✅ Language updated to English.",
        Language::French => "✅ Langue changée en français.",
        Language::Arabic => "✅ تم تغيير اللغة إلى العربية.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_language_has_distinct_texts() {
        let all = [Language::English, Language::French, Language::Arabic];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(pending_approval(*a), pending_approval(*b));
                assert_ne!(language_updated(*a), language_updated(*b));
            }
        }
    }

    #[test]
    fn unrecognized_stored_language_gets_english_text() {
        let lang = Language::resolve(Some("klingon"));
        assert_eq!(
            pending_approval(lang),
            "⏳ Your registration is not approved yet."
        );
    }
}
