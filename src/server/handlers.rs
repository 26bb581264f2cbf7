//! Tool handlers: argument validation, normalization, and response rendering

use serde_json::Value;

use crate::core::client::TranslationProvider;
use crate::core::errors::{Result, TranslationError};
use crate::core::lang::resolve_language_code;
use crate::core::models::{Formality, TranslateRequest};

/// Maximum number of input characters echoed back by detect_language
const EXCERPT_LIMIT: usize = 100;

/// Dummy target used to coax a detected-source report out of the API,
/// which has no dedicated detection endpoint
const DETECT_TARGET_LANG: &str = "EN-US";

/// Extract a required non-empty string argument
fn required_str<'a>(arguments: &'a Value, field: &str) -> Result<&'a str> {
    match arguments.get(field).and_then(Value::as_str) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(TranslationError::MissingParameter {
            field: field.to_string(),
        }),
    }
}

/// Handle translation request
pub async fn handle_translate(
    provider: &dyn TranslationProvider,
    arguments: &Value,
) -> Result<String> {
    // `text` is checked before `target_lang`
    let text = required_str(arguments, "text")?;
    let target_lang = required_str(arguments, "target_lang")?;
    let target_lang = resolve_language_code(target_lang, false);

    let mut request = TranslateRequest::new(text, &target_lang);

    if let Some(source_lang) = arguments.get("source_lang").and_then(Value::as_str) {
        if !source_lang.is_empty() {
            request = request.with_source_lang(resolve_language_code(source_lang, true));
        }
    }

    if let Some(value) = arguments.get("formality").and_then(Value::as_str) {
        let formality =
            Formality::parse(value).ok_or_else(|| TranslationError::InvalidParameter {
                field: "formality".to_string(),
                message: format!(
                    "'{}' is not one of default, more, less, prefer_more, prefer_less",
                    value
                ),
            })?;

        // "default" means no preference and is never forwarded
        if formality != Formality::Default {
            request = request.with_formality(formality);
        }
    }

    if let Some(preserve) = arguments.get("preserve_formatting").and_then(Value::as_bool) {
        request = request.with_preserve_formatting(preserve);
    }

    let result = provider.translate(&request).await?;

    let detected_source = result
        .detected_source_lang
        .unwrap_or_else(|| "unknown".to_string());

    Ok(format!(
        "**Translated Text:**\n\n{}\n\n---\n*Source language: {}*\n*Target language: {}*",
        result.text, detected_source, target_lang
    ))
}

/// Handle get supported languages request
pub async fn handle_get_languages(
    provider: &dyn TranslationProvider,
    arguments: &Value,
) -> Result<String> {
    let lang_type = arguments
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("both");

    let mut lines: Vec<String> = Vec::new();

    if matches!(lang_type, "source" | "both") {
        let mut languages = provider.source_languages().await?;
        languages.sort_by(|a, b| a.name.cmp(&b.name));

        lines.push("## Source Languages (translate from)".to_string());
        lines.push(String::new());
        for language in &languages {
            lines.push(format!("- **{}** (`{}`)", language.name, language.code));
        }
        lines.push(String::new());
    }

    if matches!(lang_type, "target" | "both") {
        let mut languages = provider.target_languages().await?;
        languages.sort_by(|a, b| a.name.cmp(&b.name));

        lines.push("## Target Languages (translate to)".to_string());
        lines.push(String::new());
        for language in &languages {
            let formality_info = if language.supports_formality {
                " - supports formality"
            } else {
                ""
            };
            lines.push(format!(
                "- **{}** (`{}`){}",
                language.name, language.code, formality_info
            ));
        }
    }

    // A `type` outside {source, target, both} matches neither branch and
    // renders empty rather than failing
    Ok(lines.join("\n"))
}

/// Handle get usage request
pub async fn handle_get_usage(provider: &dyn TranslationProvider) -> Result<String> {
    let usage = provider.usage().await?;

    let mut lines = vec!["## DeepL API Usage".to_string(), String::new()];

    if let Some(character) = &usage.character {
        let percentage = match character.limit {
            Some(limit) if limit > 0 => character.count as f64 / limit as f64 * 100.0,
            _ => 0.0,
        };

        lines.push(format!(
            "**Characters Used:** {}",
            format_thousands(character.count)
        ));
        match character.limit {
            Some(limit) => lines.push(format!("**Character Limit:** {}", format_thousands(limit))),
            None => lines.push("**Character Limit:** Unlimited".to_string()),
        }
        match character.limit {
            Some(limit) => lines.push(format!(
                "**Remaining:** {}",
                format_thousands(limit.saturating_sub(character.count))
            )),
            None => lines.push("**Remaining:** unlimited".to_string()),
        }
        lines.push(format!("**Usage:** {:.1}%", percentage));
    }

    if let Some(document) = &usage.document {
        lines.push(String::new());
        lines.push("### Document Translation".to_string());
        lines.push(format!(
            "**Documents Used:** {}",
            format_thousands(document.count)
        ));
        match document.limit {
            Some(limit) => lines.push(format!("**Document Limit:** {}", format_thousands(limit))),
            None => lines.push("**Document Limit:** Unlimited".to_string()),
        }
    }

    Ok(lines.join("\n"))
}

/// Handle language detection request
pub async fn handle_detect_language(
    provider: &dyn TranslationProvider,
    arguments: &Value,
) -> Result<String> {
    let text = required_str(arguments, "text")?;

    // Translate to a dummy target and read the detected source language off
    // the result; the translated text itself is discarded
    let request = TranslateRequest::new(text, DETECT_TARGET_LANG);
    let result = provider.translate(&request).await?;

    let detected = result
        .detected_source_lang
        .unwrap_or_else(|| "unknown".to_string());

    // Resolve the human-readable name, falling back to the raw code
    let source_languages = provider.source_languages().await?;
    let name = source_languages
        .iter()
        .find(|language| language.code.eq_ignore_ascii_case(&detected))
        .map(|language| language.name.clone())
        .unwrap_or_else(|| detected.clone());

    let excerpt: String = text.chars().take(EXCERPT_LIMIT).collect();
    let ellipsis = if text.chars().count() > EXCERPT_LIMIT {
        "..."
    } else {
        ""
    };

    Ok(format!(
        "**Detected Language:** {} (`{}`)\n\n*Text analyzed: \"{}{}\"*",
        name, detected, excerpt, ellipsis
    ))
}

/// Render an integer with thousands separators
fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}
