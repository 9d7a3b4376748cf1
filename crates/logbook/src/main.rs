//! Logbook CLI - technical journal engine.
//!
//! Provides commands for:
//! - `tree`: Print the navigation tree
//! - `post <slug>`: Resolve a slug into its navigation payload
//! - `list`: Print the home listing, optionally filtered
//! - `tags`: Print the tags of listed posts
//! - `render <slug>`: Render a post to HTML
//!
//! Payloads are printed to stdout as JSON; logs and messages go to stderr.

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CommonArgs, ListArgs, PostArgs, RenderArgs};
use output::Output;

/// Logbook - technical journal engine.
#[derive(Parser, Debug)]
#[command(name = "logbook", version, about)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the whole-corpus navigation tree.
    Tree,
    /// Resolve a slug into breadcrumbs, sub-articles and headings.
    Post(PostArgs),
    /// List top-level posts, newest first.
    List(ListArgs),
    /// List tags of top-level posts.
    Tags,
    /// Render a post to HTML.
    Render(RenderArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to ERROR
    let filter = if cli.common.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Tree => commands::tree::execute(&cli.common),
        Commands::Post(args) => args.execute(&cli.common),
        Commands::List(args) => args.execute(&cli.common),
        Commands::Tags => commands::tags::execute(&cli.common),
        Commands::Render(args) => args.execute(&cli.common),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
