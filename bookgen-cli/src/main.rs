//! Bookgen CLI - builds a multi-page and single-page HTML book

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bookgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the book configuration
    #[arg(short, long, global = true, default_value = "book.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every chapter page and the combined single page
    Build {
        /// Write to this directory instead of the configured output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check the configuration, templates and chapter sources without writing
    Check,

    /// List chapters in order with their resolved titles
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "bookgen_cli=debug,bookgen_core=debug"
    } else {
        "bookgen_cli=info,bookgen_core=warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Build { output } => commands::build(&cli.config, output).await,
        Commands::Check => commands::check(&cli.config).await,
        Commands::List { json } => commands::list(&cli.config, json),
    }
}
