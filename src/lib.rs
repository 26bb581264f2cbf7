//! DeepL MCP Server - translation tools over the Model Context Protocol
//!
//! This library exposes DeepL translation, language listing, usage reporting
//! and language detection as MCP tools served over stdio.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;
pub mod server;

// Re-export key types for convenience
pub use crate::core::{
    client::{DeepLClient, TranslationProvider},
    config::TranslatorConfig,
    errors::{ErrorCategory, TranslationError},
    lang::resolve_language_code,
    models::{
        Formality, Language, MeteredUsage, TargetLanguage, TranslateRequest, TranslationResult,
        UsageSnapshot,
    },
};

pub use crate::server::{
    protocol::{CallToolResult, TextContent, ToolDescriptor},
    stdio::McpServer,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
