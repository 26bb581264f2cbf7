//! CLI command definitions and handlers

use clap::Subcommand;

use crate::core::client::DeepLClient;
use crate::server::stdio::McpServer;
use crate::server::tools;

/// Commands for the DeepL MCP server
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the MCP server on stdio (default when no command is given)
    Serve,

    /// Translate a single text from the command line
    Translate {
        /// Text to translate
        text: String,

        /// Target language name or code (e.g. "Japanese", "JA", "EN-US")
        #[arg(short, long)]
        target_lang: String,

        /// Source language (auto-detected if not specified)
        #[arg(long)]
        source_lang: Option<String>,

        /// Formality level: default, more, less, prefer_more, prefer_less
        #[arg(long)]
        formality: Option<String>,
    },
}

/// Handle the serve command
pub async fn handle_serve() -> anyhow::Result<()> {
    let server = McpServer::new();
    server.run().await
}

/// Handle one-shot translation from the command line.
///
/// Goes through the same dispatch path as `tools/call`, so output and error
/// rendering match what an MCP client would see.
pub async fn handle_translate(
    text: String,
    target_lang: String,
    source_lang: Option<String>,
    formality: Option<String>,
) -> anyhow::Result<()> {
    let client = DeepLClient::from_env()?;

    let mut arguments = serde_json::json!({
        "text": text,
        "target_lang": target_lang,
    });
    if let Some(source_lang) = source_lang {
        arguments["source_lang"] = serde_json::json!(source_lang);
    }
    if let Some(formality) = formality {
        arguments["formality"] = serde_json::json!(formality);
    }

    let content = tools::call_tool("translate", &arguments, &client).await;
    println!("{}", content.text);

    Ok(())
}
