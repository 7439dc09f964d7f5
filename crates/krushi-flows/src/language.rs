//! Answer languages.

use serde::Serialize;

/// A language the flows can answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    /// ISO 639-1 code.
    pub code: &'static str,
    /// English name, as used in prompts.
    pub name: &'static str,
}

/// Languages offered to farmers.
pub const SUPPORTED: &[Language] = &[
    Language { code: "en", name: "English" },
    Language { code: "hi", name: "Hindi" },
    Language { code: "mr", name: "Marathi" },
    Language { code: "bn", name: "Bengali" },
    Language { code: "te", name: "Telugu" },
    Language { code: "ta", name: "Tamil" },
    Language { code: "gu", name: "Gujarati" },
    Language { code: "kn", name: "Kannada" },
    Language { code: "ml", name: "Malayalam" },
    Language { code: "pa", name: "Punjabi" },
    Language { code: "or", name: "Odia" },
];

/// Default answer language.
pub const DEFAULT: &str = "English";

/// Resolves a code or a name to the name used in prompts.
///
/// Known codes map to their English name; anything else is passed
/// through trimmed, and blank input falls back to English.
pub fn resolve(code_or_name: Option<&str>) -> String {
    let Some(raw) = code_or_name.map(str::trim).filter(|s| !s.is_empty()) else {
        return DEFAULT.to_string();
    };
    SUPPORTED
        .iter()
        .find(|l| l.code.eq_ignore_ascii_case(raw) || l.name.eq_ignore_ascii_case(raw))
        .map_or_else(|| raw.to_string(), |l| l.name.to_string())
}
