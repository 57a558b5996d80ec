//! Submission language model

use serde::{Deserialize, Serialize};

/// Supported submission languages
///
/// The pipeline runs a single toolchain per evaluation, selected by the
/// submission's language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    Cpp,
    Python,
}

impl Language {
    /// Get language as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Python => "python",
        }
    }

    /// Parse language from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "c" => Some(Self::C),
            "cpp" => Some(Self::Cpp),
            "python" => Some(Self::Python),
            _ => None,
        }
    }

    /// Whether this language goes through a compile step before running
    pub fn is_compiled(&self) -> bool {
        matches!(self, Self::C | Self::Cpp)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_round_trip() {
        for lang in [Language::C, Language::Cpp, Language::Python] {
            assert_eq!(Language::from_str(lang.as_str()), Some(lang));
        }
        assert_eq!(Language::from_str("cobol"), None);
    }

    #[test]
    fn test_compiled_languages() {
        assert!(Language::Cpp.is_compiled());
        assert!(Language::C.is_compiled());
        assert!(!Language::Python.is_compiled());
    }
}
