//! The canonical exercise-language table.
//!
//! The original design kept separate string-keyed maps for file extensions
//! and comment tokens and let their fallbacks drift apart. Here there is
//! exactly one enumerated `Language` with associated metadata, and one
//! fallback pair for unrecognized names: extension `txt`, comment token `//`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Fallback file extension for names outside the supported domain.
pub const FALLBACK_EXTENSION: &str = "txt";

/// Fallback single-line comment token for names outside the supported domain.
pub const FALLBACK_COMMENT_TOKEN: &str = "//";

/// A programming language Gradus can generate exercises for.
///
/// Parsing is ASCII-case-insensitive (`"Python"`, `"python"` and `"PYTHON"`
/// all parse), and `Display` renders the lowercase conventional name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Language {
    #[strum(serialize = "python")]
    #[serde(rename = "python")]
    Python,
    #[strum(serialize = "javascript")]
    #[serde(rename = "javascript")]
    JavaScript,
    #[strum(serialize = "typescript")]
    #[serde(rename = "typescript")]
    TypeScript,
    #[strum(serialize = "c++")]
    #[serde(rename = "c++")]
    Cpp,
    #[strum(serialize = "c")]
    #[serde(rename = "c")]
    C,
    #[strum(serialize = "java")]
    #[serde(rename = "java")]
    Java,
    #[strum(serialize = "c#")]
    #[serde(rename = "c#")]
    CSharp,
    #[strum(serialize = "ruby")]
    #[serde(rename = "ruby")]
    Ruby,
    #[strum(serialize = "php")]
    #[serde(rename = "php")]
    Php,
    #[strum(serialize = "go")]
    #[serde(rename = "go")]
    Go,
    #[strum(serialize = "swift")]
    #[serde(rename = "swift")]
    Swift,
    #[strum(serialize = "scala")]
    #[serde(rename = "scala")]
    Scala,
    #[strum(serialize = "rust")]
    #[serde(rename = "rust")]
    Rust,
    #[strum(serialize = "kotlin")]
    #[serde(rename = "kotlin")]
    Kotlin,
    #[strum(serialize = "perl")]
    #[serde(rename = "perl")]
    Perl,
    #[strum(serialize = "r")]
    #[serde(rename = "r")]
    R,
}

impl Language {
    /// The language used when inference finds nothing in the goal text.
    pub const DEFAULT: Language = Language::Python;

    /// Parses a human-entered language name, case-insensitively.
    ///
    /// Returns `None` for names outside the supported domain; callers that
    /// need a total mapping use [`extension_of`] / [`comment_token_of`].
    pub fn parse(name: &str) -> Option<Self> {
        Self::from_str(name.trim()).ok()
    }

    /// Conventional file extension for the playground artifact.
    pub fn extension(&self) -> &'static str {
        match self {
            Language::Python => "py",
            Language::JavaScript => "js",
            Language::TypeScript => "ts",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::Java => "java",
            Language::CSharp => "cs",
            Language::Ruby => "rb",
            Language::Php => "php",
            Language::Go => "go",
            Language::Swift => "swift",
            Language::Scala => "scala",
            Language::Rust => "rs",
            Language::Kotlin => "kt",
            Language::Perl => "pl",
            Language::R => "r",
        }
    }

    /// Single-line comment token used to prefix generated exercise text.
    pub fn comment_token(&self) -> &'static str {
        match self {
            Language::Python | Language::Ruby | Language::Perl | Language::R => "#",
            _ => "//",
        }
    }

    /// Infers a language from a free-text goal description.
    ///
    /// This is a word scan over the supported names, not a classifier:
    /// `c++`/`c#` are matched as substrings (they do not survive
    /// tokenization), everything else must appear as a whole word. The
    /// first match in declaration order wins. Returns `None` when the text
    /// names no supported language; the progression engine substitutes
    /// [`Language::DEFAULT`] in that case.
    pub fn infer(text: &str) -> Option<Self> {
        let lowered = text.to_lowercase();

        if lowered.contains("c++") {
            return Some(Language::Cpp);
        }
        if lowered.contains("c#") || lowered.contains("csharp") {
            return Some(Language::CSharp);
        }

        let tokens: Vec<&str> = lowered
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();

        Language::iter().find(|lang| {
            let name = lang.to_string();
            tokens.iter().any(|t| *t == name)
        })
    }
}

/// Total mapping from a language name to a file extension.
///
/// Unrecognized names map to [`FALLBACK_EXTENSION`].
pub fn extension_of(name: &str) -> &'static str {
    Language::parse(name)
        .map(|lang| lang.extension())
        .unwrap_or(FALLBACK_EXTENSION)
}

/// Total mapping from a language name to a single-line comment token.
///
/// Unrecognized names map to [`FALLBACK_COMMENT_TOKEN`].
pub fn comment_token_of(name: &str) -> &'static str {
    Language::parse(name)
        .map(|lang| lang.comment_token())
        .unwrap_or(FALLBACK_COMMENT_TOKEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Language::parse("Python"), Some(Language::Python));
        assert_eq!(Language::parse("PYTHON"), Some(Language::Python));
        assert_eq!(Language::parse("  rust "), Some(Language::Rust));
        assert_eq!(Language::parse("C++"), Some(Language::Cpp));
        assert_eq!(Language::parse("C#"), Some(Language::CSharp));
        assert_eq!(Language::parse("klingon"), None);
    }

    #[test]
    fn test_every_language_has_metadata() {
        for lang in Language::iter() {
            assert!(!lang.extension().is_empty());
            assert!(lang.comment_token() == "#" || lang.comment_token() == "//");
        }
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for lang in Language::iter() {
            assert_eq!(Language::parse(&lang.to_string()), Some(lang));
        }
    }

    #[test]
    fn test_total_mappings_use_unified_fallback() {
        assert_eq!(extension_of("rust"), "rs");
        assert_eq!(comment_token_of("rust"), "//");
        assert_eq!(extension_of("Ruby"), "rb");
        assert_eq!(comment_token_of("Ruby"), "#");
        assert_eq!(extension_of("brainfuck"), FALLBACK_EXTENSION);
        assert_eq!(comment_token_of("brainfuck"), FALLBACK_COMMENT_TOKEN);
        assert_eq!(extension_of(""), "txt");
        assert_eq!(comment_token_of(""), "//");
    }

    #[test]
    fn test_infer_finds_whole_words() {
        assert_eq!(
            Language::infer("I want to learn rust ownership"),
            Some(Language::Rust)
        );
        assert_eq!(
            Language::infer("Learn advanced C++ templates"),
            Some(Language::Cpp)
        );
        assert_eq!(
            Language::infer("intro to c# generics"),
            Some(Language::CSharp)
        );
        // "java" inside "javascript" must not match Java
        assert_eq!(
            Language::infer("modern javascript closures"),
            Some(Language::JavaScript)
        );
        assert_eq!(Language::infer("sorting algorithms"), None);
    }

    #[test]
    fn test_infer_prefers_declaration_order() {
        // Both named: python comes first in the declaration order
        assert_eq!(
            Language::infer("python or go, not sure yet"),
            Some(Language::Python)
        );
    }
}
