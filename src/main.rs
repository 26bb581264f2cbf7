//! Main entry point for the DeepL MCP server

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deepl_mcp::cli::commands::{self, Commands};

/// DeepL MCP Server - translation tools over the Model Context Protocol
#[derive(Parser, Debug)]
#[command(name = "deepl-mcp", version, about, long_about = None)]
struct Args {
    /// API key for DeepL (optional, defaults to DEEPL_API_KEY env var)
    #[arg(long)]
    api_key: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Override config with CLI args if provided
    if let Some(api_key) = args.api_key {
        std::env::set_var("DEEPL_API_KEY", api_key);
    }

    // Initialize logging; stdout carries the protocol, so logs go to stderr
    let default_level = if args.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("deepl_mcp={}", default_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Execute command
    match args.command {
        Some(Commands::Translate {
            text,
            target_lang,
            source_lang,
            formality,
        }) => {
            commands::handle_translate(text, target_lang, source_lang, formality).await?;
        }
        Some(Commands::Serve) | None => {
            commands::handle_serve().await?;
        }
    }

    Ok(())
}
