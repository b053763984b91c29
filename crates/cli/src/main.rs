//! docqa CLI
//!
//! Main entry point for the docqa command-line tool.
//! Answers questions about a folder of documents with an extractive QA engine.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ChatCommand, CorpusCommand, SplitCommand};
use docqa_core::{
    config::{AppConfig, ConfigOverrides},
    logging, AppResult,
};
use std::path::PathBuf;

/// docqa - ask questions about your documents
#[derive(Parser, Debug)]
#[command(name = "docqa")]
#[command(about = "Ask questions about a folder of documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "DOCQA_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "DOCQA_CONFIG")]
    config: Option<PathBuf>,

    /// Documents folder (default: docs, relative to the workspace)
    #[arg(short, long, global = true, env = "DOCQA_DOCS")]
    docs: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Answer engine provider (lexical, huggingface, http)
    #[arg(short, long, global = true, env = "DOCQA_PROVIDER")]
    provider: Option<String>,

    /// Model identifier for HTTP engines
    #[arg(short, long, global = true, env = "DOCQA_MODEL")]
    model: Option<String>,

    /// Chunk size in characters
    #[arg(long, global = true, env = "DOCQA_CHUNK_SIZE")]
    chunk_size: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer a single question
    Ask(AskCommand),

    /// Answer questions interactively
    Chat(ChatCommand),

    /// Show what was extracted from the documents folder
    Corpus(CorpusCommand),

    /// Show how a question is split into sub-questions
    Split(SplitCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.workspace, cli.config)?.with_overrides(ConfigOverrides {
        docs_dir: cli.docs,
        provider: cli.provider,
        model: cli.model,
        chunk_size: cli.chunk_size,
        log_level: cli.log_level,
        verbose: cli.verbose,
        no_color: cli.no_color,
    });

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("docqa starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Documents: {:?}", config.docs_path());
    tracing::debug!("Provider: {} (model: {})", config.provider, config.model);

    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Chat(_) => "chat",
        Commands::Corpus(_) => "corpus",
        Commands::Split(_) => "split",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Chat(cmd) => cmd.execute(&config).await,
        Commands::Corpus(cmd) => cmd.execute(&config),
        Commands::Split(cmd) => cmd.execute(),
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
