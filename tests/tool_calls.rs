//! Integration tests driving the tool dispatcher against a mock provider

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use deepl_mcp::core::client::TranslationProvider;
use deepl_mcp::core::errors::{Result, TranslationError};
use deepl_mcp::core::models::{
    Formality, Language, MeteredUsage, TargetLanguage, TranslateRequest, TranslationResult,
    UsageSnapshot,
};
use deepl_mcp::server::tools::{call_tool, list_tools};

/// Mock provider with canned responses; records the last translate request
struct MockProvider {
    translated_text: String,
    detected_source_lang: Option<String>,
    usage: UsageSnapshot,
    fail_with: Option<String>,
    last_request: Mutex<Option<TranslateRequest>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            translated_text: "Hallo Welt".to_string(),
            detected_source_lang: Some("EN".to_string()),
            usage: UsageSnapshot::default(),
            fail_with: None,
            last_request: Mutex::new(None),
        }
    }
}

impl MockProvider {
    fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    fn check_failure(&self) -> Result<()> {
        if let Some(message) = &self.fail_with {
            return Err(TranslationError::Api {
                status: 456,
                message: message.clone(),
            });
        }
        Ok(())
    }

    fn last_request(&self) -> TranslateRequest {
        self.last_request
            .lock()
            .unwrap()
            .clone()
            .expect("no translate request recorded")
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    async fn translate(&self, request: &TranslateRequest) -> Result<TranslationResult> {
        self.check_failure()?;
        *self.last_request.lock().unwrap() = Some(request.clone());
        Ok(TranslationResult {
            text: self.translated_text.clone(),
            detected_source_lang: self.detected_source_lang.clone(),
        })
    }

    async fn source_languages(&self) -> Result<Vec<Language>> {
        self.check_failure()?;
        Ok(vec![
            Language {
                code: "JA".to_string(),
                name: "Japanese".to_string(),
            },
            Language {
                code: "EN".to_string(),
                name: "English".to_string(),
            },
            Language {
                code: "DE".to_string(),
                name: "German".to_string(),
            },
        ])
    }

    async fn target_languages(&self) -> Result<Vec<TargetLanguage>> {
        self.check_failure()?;
        Ok(vec![
            Language {
                code: "JA".to_string(),
                name: "Japanese".to_string(),
            },
            Language {
                code: "DE".to_string(),
                name: "German".to_string(),
            },
            Language {
                code: "EN-US".to_string(),
                name: "English (American)".to_string(),
            },
        ]
        .into_iter()
        .map(|language| TargetLanguage {
            supports_formality: language.code == "DE" || language.code == "JA",
            code: language.code,
            name: language.name,
        })
        .collect())
    }

    async fn usage(&self) -> Result<UsageSnapshot> {
        self.check_failure()?;
        Ok(self.usage)
    }
}

#[tokio::test]
async fn translate_renders_labeled_block() {
    let provider = MockProvider::default();
    let arguments = json!({ "text": "Hello world", "target_lang": "German" });

    let content = call_tool("translate", &arguments, &provider).await;

    assert_eq!(content.kind, "text");
    assert_eq!(
        content.text,
        "**Translated Text:**\n\nHallo Welt\n\n---\n*Source language: EN*\n*Target language: DE*"
    );
}

#[tokio::test]
async fn translate_reports_unknown_when_detection_missing() {
    let provider = MockProvider {
        detected_source_lang: None,
        ..MockProvider::default()
    };
    let arguments = json!({ "text": "Hello", "target_lang": "DE" });

    let content = call_tool("translate", &arguments, &provider).await;

    assert!(content.text.contains("*Source language: unknown*"));
    assert!(content.text.contains("*Target language: DE*"));
}

#[tokio::test]
async fn translate_missing_text_checked_before_target_lang() {
    let provider = MockProvider::default();

    // Both empty: the text message wins
    let arguments = json!({ "text": "", "target_lang": "" });
    let content = call_tool("translate", &arguments, &provider).await;
    assert_eq!(content.text, "Error: 'text' parameter is required");

    // Empty text with a valid target still reports text first
    let arguments = json!({ "text": "", "target_lang": "JA" });
    let content = call_tool("translate", &arguments, &provider).await;
    assert_eq!(content.text, "Error: 'text' parameter is required");

    let arguments = json!({ "text": "hello" });
    let content = call_tool("translate", &arguments, &provider).await;
    assert_eq!(content.text, "Error: 'target_lang' parameter is required");
}

#[tokio::test]
async fn translate_resolves_language_aliases() {
    let provider = MockProvider::default();
    let arguments = json!({
        "text": "Hello",
        "target_lang": " Brazilian Portuguese ",
        "source_lang": "american english",
    });

    call_tool("translate", &arguments, &provider).await;

    let request = provider.last_request();
    assert_eq!(request.target_lang, "PT-BR");
    // Source codes are region-less
    assert_eq!(request.source_lang.as_deref(), Some("EN"));
}

#[tokio::test]
async fn translate_default_formality_is_not_forwarded() {
    let provider = MockProvider::default();

    let arguments = json!({ "text": "Hi", "target_lang": "DE", "formality": "default" });
    call_tool("translate", &arguments, &provider).await;
    assert_eq!(provider.last_request().formality, None);

    let arguments = json!({ "text": "Hi", "target_lang": "DE", "formality": "more" });
    call_tool("translate", &arguments, &provider).await;
    assert_eq!(provider.last_request().formality, Some(Formality::More));
}

#[tokio::test]
async fn translate_rejects_unknown_formality() {
    let provider = MockProvider::default();
    let arguments = json!({ "text": "Hi", "target_lang": "DE", "formality": "casual" });

    let content = call_tool("translate", &arguments, &provider).await;

    assert!(content.text.starts_with("Error: "));
    assert!(provider.last_request.lock().unwrap().is_none());
}

#[tokio::test]
async fn translate_preserve_formatting_defaults_to_true() {
    let provider = MockProvider::default();

    let arguments = json!({ "text": "Hi", "target_lang": "DE" });
    call_tool("translate", &arguments, &provider).await;
    assert!(provider.last_request().preserve_formatting);

    let arguments = json!({ "text": "Hi", "target_lang": "DE", "preserve_formatting": false });
    call_tool("translate", &arguments, &provider).await;
    assert!(!provider.last_request().preserve_formatting);
}

#[tokio::test]
async fn get_languages_target_only_sorted_with_formality_markers() {
    let provider = MockProvider::default();
    let arguments = json!({ "type": "target" });

    let content = call_tool("get_supported_languages", &arguments, &provider).await;

    assert!(!content.text.contains("## Source Languages"));
    let expected = "## Target Languages (translate to)\n\
                    \n\
                    - **English (American)** (`EN-US`)\n\
                    - **German** (`DE`) - supports formality\n\
                    - **Japanese** (`JA`) - supports formality";
    assert_eq!(content.text, expected);
}

#[tokio::test]
async fn get_languages_both_renders_both_sections_sorted_by_name() {
    let provider = MockProvider::default();
    let arguments = json!({});

    let content = call_tool("get_supported_languages", &arguments, &provider).await;

    let source_pos = content.text.find("## Source Languages").unwrap();
    let target_pos = content.text.find("## Target Languages").unwrap();
    assert!(source_pos < target_pos);

    // Source list sorted ascending by name
    let english = content.text.find("- **English** (`EN`)").unwrap();
    let german = content.text.find("- **German** (`DE`)").unwrap();
    let japanese = content.text.find("- **Japanese** (`JA`)").unwrap();
    assert!(english < german && german < japanese);
}

#[tokio::test]
async fn get_languages_unrecognized_type_renders_empty() {
    let provider = MockProvider::default();
    let arguments = json!({ "type": "everything" });

    let content = call_tool("get_supported_languages", &arguments, &provider).await;

    assert_eq!(content.kind, "text");
    assert_eq!(content.text, "");
}

#[tokio::test]
async fn get_usage_renders_counts_with_thousands_separators() {
    let provider = MockProvider {
        usage: UsageSnapshot {
            character: Some(MeteredUsage {
                count: 250_000,
                limit: Some(1_000_000),
            }),
            document: None,
        },
        ..MockProvider::default()
    };

    let content = call_tool("get_usage", &json!({}), &provider).await;

    assert!(content.text.starts_with("## DeepL API Usage"));
    assert!(content.text.contains("**Characters Used:** 250,000"));
    assert!(content.text.contains("**Character Limit:** 1,000,000"));
    assert!(content.text.contains("**Remaining:** 750,000"));
    assert!(content.text.contains("**Usage:** 25.0%"));
    assert!(!content.text.contains("### Document Translation"));
}

#[tokio::test]
async fn get_usage_unlimited_plan() {
    let provider = MockProvider {
        usage: UsageSnapshot {
            character: Some(MeteredUsage {
                count: 42_000,
                limit: None,
            }),
            document: Some(MeteredUsage {
                count: 7,
                limit: None,
            }),
        },
        ..MockProvider::default()
    };

    let content = call_tool("get_usage", &json!({}), &provider).await;

    assert!(content.text.contains("**Character Limit:** Unlimited"));
    assert!(content.text.contains("**Remaining:** unlimited"));
    assert!(content.text.contains("**Usage:** 0.0%"));
    assert!(content.text.contains("### Document Translation"));
    assert!(content.text.contains("**Documents Used:** 7"));
    assert!(content.text.contains("**Document Limit:** Unlimited"));
}

#[tokio::test]
async fn get_usage_without_character_section() {
    let provider = MockProvider {
        usage: UsageSnapshot {
            character: None,
            document: Some(MeteredUsage {
                count: 3,
                limit: Some(20),
            }),
        },
        ..MockProvider::default()
    };

    let content = call_tool("get_usage", &json!({}), &provider).await;

    assert!(!content.text.contains("**Characters Used:**"));
    assert!(content.text.contains("**Documents Used:** 3"));
    assert!(content.text.contains("**Document Limit:** 20"));
}

#[tokio::test]
async fn detect_language_uses_dummy_target_and_resolves_name() {
    let provider = MockProvider {
        detected_source_lang: Some("JA".to_string()),
        ..MockProvider::default()
    };
    let arguments = json!({ "text": "こんにちは" });

    let content = call_tool("detect_language", &arguments, &provider).await;

    assert!(content.text.contains("**Detected Language:** Japanese (`JA`)"));
    assert!(content.text.contains("*Text analyzed: \"こんにちは\"*"));

    let request = provider.last_request();
    assert_eq!(request.target_lang, "EN-US");
}

#[tokio::test]
async fn detect_language_falls_back_to_raw_code() {
    let provider = MockProvider {
        detected_source_lang: Some("XX".to_string()),
        ..MockProvider::default()
    };
    let arguments = json!({ "text": "mystery" });

    let content = call_tool("detect_language", &arguments, &provider).await;

    assert!(content.text.contains("**Detected Language:** XX (`XX`)"));
}

#[tokio::test]
async fn detect_language_truncates_long_input() {
    let provider = MockProvider::default();

    let long_text = "a".repeat(150);
    let arguments = json!({ "text": long_text });
    let content = call_tool("detect_language", &arguments, &provider).await;
    let expected_excerpt = format!("\"{}...\"", "a".repeat(100));
    assert!(content.text.contains(&expected_excerpt));

    let short_text = "b".repeat(50);
    let arguments = json!({ "text": short_text });
    let content = call_tool("detect_language", &arguments, &provider).await;
    let expected_excerpt = format!("\"{}\"", "b".repeat(50));
    assert!(content.text.contains(&expected_excerpt));
    assert!(!content.text.contains("..."));
}

#[tokio::test]
async fn detect_language_requires_text() {
    let provider = MockProvider::default();
    let content = call_tool("detect_language", &json!({}), &provider).await;

    assert_eq!(content.text, "Error: 'text' parameter is required");
}

#[tokio::test]
async fn unknown_tool_is_an_informational_response() {
    let provider = MockProvider::default();
    let content = call_tool("summarize", &json!({}), &provider).await;

    assert_eq!(content.text, "Unknown tool: summarize");
}

#[tokio::test]
async fn provider_errors_are_labeled_per_tool() {
    for (name, arguments) in [
        ("translate", json!({ "text": "Hi", "target_lang": "DE" })),
        ("get_supported_languages", json!({})),
        ("get_usage", json!({})),
        ("detect_language", json!({ "text": "Hi" })),
    ] {
        let provider = MockProvider::failing("Quota for this billing period has been exceeded");
        let content = call_tool(name, &arguments, &provider).await;

        assert!(
            content.text.starts_with("DeepL API error: "),
            "tool {} rendered: {}",
            name,
            content.text
        );
        assert!(content
            .text
            .contains("Quota for this billing period has been exceeded"));
    }
}

#[test]
fn catalog_lists_four_tools_in_declaration_order() {
    let tools = list_tools();
    let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();

    assert_eq!(
        names,
        ["translate", "get_supported_languages", "get_usage", "detect_language"]
    );
}

#[test]
fn catalog_schemas_enumerate_legal_values() {
    use assert_json_diff::assert_json_include;

    let tools = list_tools();

    assert_json_include!(
        actual: tools[0].input_schema.clone(),
        expected: json!({
            "type": "object",
            "properties": {
                "formality": {
                    "enum": ["default", "more", "less", "prefer_more", "prefer_less"]
                }
            },
            "required": ["text", "target_lang"]
        })
    );

    assert_json_include!(
        actual: tools[1].input_schema.clone(),
        expected: json!({
            "properties": {
                "type": { "enum": ["source", "target", "both"] }
            }
        })
    );

    assert_json_include!(
        actual: tools[3].input_schema.clone(),
        expected: json!({ "required": ["text"] })
    );
}
