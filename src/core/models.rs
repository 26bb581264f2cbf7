//! Core data models for translation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Formality preference for a translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formality {
    /// No preference, nothing is sent to the API
    Default,
    /// More formal language
    More,
    /// Less formal language
    Less,
    /// More formal if the target language supports it
    PreferMore,
    /// Less formal if the target language supports it
    PreferLess,
}

impl Formality {
    /// Parse the wire representation used in tool arguments
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "default" => Some(Formality::Default),
            "more" => Some(Formality::More),
            "less" => Some(Formality::Less),
            "prefer_more" => Some(Formality::PreferMore),
            "prefer_less" => Some(Formality::PreferLess),
            _ => None,
        }
    }

    /// Wire representation accepted by the DeepL API
    pub fn as_str(&self) -> &'static str {
        match self {
            Formality::Default => "default",
            Formality::More => "more",
            Formality::Less => "less",
            Formality::PreferMore => "prefer_more",
            Formality::PreferLess => "prefer_less",
        }
    }
}

impl fmt::Display for Formality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Translation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub target_lang: String,
    pub source_lang: Option<String>,
    pub formality: Option<Formality>,
    pub preserve_formatting: bool,
}

impl TranslateRequest {
    pub fn new(text: impl Into<String>, target_lang: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_lang: target_lang.into(),
            source_lang: None,
            formality: None,
            preserve_formatting: true,
        }
    }

    pub fn with_source_lang(mut self, source_lang: impl Into<String>) -> Self {
        self.source_lang = Some(source_lang.into());
        self
    }

    pub fn with_formality(mut self, formality: Formality) -> Self {
        self.formality = Some(formality);
        self
    }

    pub fn with_preserve_formatting(mut self, preserve: bool) -> Self {
        self.preserve_formatting = preserve;
        self
    }
}

/// Translation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResult {
    pub text: String,
    pub detected_source_lang: Option<String>,
}

/// A language supported as a translation source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

/// A language supported as a translation target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetLanguage {
    pub code: String,
    pub name: String,
    pub supports_formality: bool,
}

/// Usage counters for one billing dimension
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MeteredUsage {
    pub count: u64,
    /// Absent on unlimited plans
    pub limit: Option<u64>,
}

/// Account usage snapshot reported by the API
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct UsageSnapshot {
    pub character: Option<MeteredUsage>,
    pub document: Option<MeteredUsage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formality_round_trip() {
        for value in ["default", "more", "less", "prefer_more", "prefer_less"] {
            let formality = Formality::parse(value).unwrap();
            assert_eq!(formality.as_str(), value);
        }
    }

    #[test]
    fn test_formality_rejects_unknown() {
        assert!(Formality::parse("formal").is_none());
        assert!(Formality::parse("MORE").is_none());
        assert!(Formality::parse("").is_none());
    }

    #[test]
    fn test_request_defaults() {
        let request = TranslateRequest::new("hello", "JA");
        assert_eq!(request.source_lang, None);
        assert_eq!(request.formality, None);
        assert!(request.preserve_formatting);
    }

    #[test]
    fn test_request_builder() {
        let request = TranslateRequest::new("hello", "JA")
            .with_source_lang("EN")
            .with_formality(Formality::More)
            .with_preserve_formatting(false);

        assert_eq!(request.source_lang.as_deref(), Some("EN"));
        assert_eq!(request.formality, Some(Formality::More));
        assert!(!request.preserve_formatting);
    }
}
