//! Tool catalog and dispatch for the MCP surface

use serde_json::Value;
use tracing::error;

use crate::core::client::TranslationProvider;
use crate::core::errors::{ErrorCategory, TranslationError};
use crate::server::handlers;
use crate::server::protocol::{TextContent, ToolDescriptor};

/// List the tools advertised through `tools/list`.
///
/// The order is stable and matches declaration order. The schemas are
/// advisory metadata for callers; handlers re-validate independently.
pub fn list_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: "translate".to_string(),
            description: "Translate text using DeepL API. \
                          Supports 30+ languages with high-quality neural machine translation. \
                          You can use language names (e.g., 'Japanese', 'English') or \
                          language codes (e.g., 'JA', 'EN-US')."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "text": {
                        "type": "string",
                        "description": "The text to translate"
                    },
                    "target_lang": {
                        "type": "string",
                        "description": "Target language. Examples: 'Japanese', 'JA', \
                                        'English', 'EN-US', 'German', 'DE'"
                    },
                    "source_lang": {
                        "type": "string",
                        "description": "Source language (optional, auto-detected if not specified). \
                                        Examples: 'English', 'EN', 'Japanese', 'JA'"
                    },
                    "formality": {
                        "type": "string",
                        "enum": ["default", "more", "less", "prefer_more", "prefer_less"],
                        "description": "Formality level (optional). \
                                        'more' for formal, 'less' for informal. \
                                        'prefer_more'/'prefer_less' are softer preferences. \
                                        Not all languages support formality."
                    },
                    "preserve_formatting": {
                        "type": "boolean",
                        "description": "Whether to preserve formatting (optional, default: true)"
                    }
                },
                "required": ["text", "target_lang"]
            }),
        },
        ToolDescriptor {
            name: "get_supported_languages".to_string(),
            description: "Get list of languages supported by DeepL for translation. \
                          Returns both source and target languages with their codes."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "type": {
                        "type": "string",
                        "enum": ["source", "target", "both"],
                        "description": "Type of languages to retrieve. \
                                        'source' for languages you can translate from, \
                                        'target' for languages you can translate to, \
                                        'both' for all (default: 'both')"
                    }
                },
                "required": []
            }),
        },
        ToolDescriptor {
            name: "get_usage".to_string(),
            description: "Get DeepL API usage statistics. \
                          Shows character count and limits for your API plan."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        },
        ToolDescriptor {
            name: "detect_language".to_string(),
            description: "Detect the language of the given text using DeepL. \
                          Useful when you need to know the source language before translation."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "text": {
                        "type": "string",
                        "description": "The text to detect language for"
                    }
                },
                "required": ["text"]
            }),
        },
    ]
}

/// Dispatch a `tools/call` request to the matching handler.
///
/// Always produces exactly one text block. Handler failures are rendered
/// through the error envelope; an unrecognized tool name is a normal
/// informational response, not an error.
pub async fn call_tool(
    name: &str,
    arguments: &Value,
    provider: &dyn TranslationProvider,
) -> TextContent {
    let result = match name {
        "translate" => handlers::handle_translate(provider, arguments).await,
        "get_supported_languages" => handlers::handle_get_languages(provider, arguments).await,
        "get_usage" => handlers::handle_get_usage(provider).await,
        "detect_language" => handlers::handle_detect_language(provider, arguments).await,
        _ => return TextContent::new(format!("Unknown tool: {}", name)),
    };

    match result {
        Ok(text) => TextContent::new(text),
        Err(e) => TextContent::new(render_error(&e)),
    }
}

/// Render a failure into the single-line labeled form returned to callers.
///
/// Provider failures, local validation failures, and unexpected failures
/// each carry a distinct prefix.
pub fn render_error(error: &TranslationError) -> String {
    match error.category() {
        ErrorCategory::Provider => {
            error!("DeepL API error: {}", error);
            format!("DeepL API error: {}", error)
        }
        ErrorCategory::Validation => {
            error!("Validation error: {}", error);
            format!("Error: {}", error)
        }
        ErrorCategory::Unexpected => {
            error!("Unexpected error: {}", error);
            format!("Unexpected error: {}", error)
        }
    }
}
