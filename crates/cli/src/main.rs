//! SmartDoc CLI: the main entry point.
//!
//! Commands:
//! - `chunk`    Split a document and list its chunks
//! - `context`  Assemble the context window for a query
//! - `prompt`   Print the grounded prompt for a question
//! - `config`   Show the effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "smartdoc",
    about = "SmartDoc: grounded Q&A over your documents",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ~/.smartdoc/config.toml)
    #[arg(short, long, global = true, env = "SMARTDOC_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a document into chunks
    Chunk {
        /// PDF or TXT file
        file: PathBuf,

        /// Target chunk size in characters
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Characters shared by consecutive chunks
        #[arg(long)]
        overlap: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Select the most relevant chunks for a query within a token budget
    Context {
        file: PathBuf,

        #[arg(short, long)]
        query: String,

        /// Token budget (defaults to retrieval.max_context_tokens)
        #[arg(long)]
        max_tokens: Option<usize>,

        #[arg(long)]
        json: bool,
    },

    /// Print the prompt that would be sent to answer a question
    Prompt {
        file: PathBuf,

        #[arg(short, long)]
        question: String,

        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config {
        /// Print a default config file instead
        #[arg(long)]
        init: bool,

        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Chunk {
            file,
            chunk_size,
            overlap,
            json,
        } => commands::chunk::run(config_path, &file, chunk_size, overlap, json)?,
        Commands::Context {
            file,
            query,
            max_tokens,
            json,
        } => commands::context::run(config_path, &file, &query, max_tokens, json)?,
        Commands::Prompt {
            file,
            question,
            json,
        } => commands::prompt::run(config_path, &file, &question, json)?,
        Commands::Config { init, json } => {
            if init {
                commands::config_cmd::init()?
            } else {
                commands::config_cmd::show(config_path, json).await?
            }
        }
    }

    Ok(())
}
