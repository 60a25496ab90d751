//! Capture CLI - Command-line interface
//!
//! Commands:
//! - play: Play games between two teams on a layout
//! - explain: Show how one agent scores its legal actions

mod explain;
mod play_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "capture")]
#[command(about = "Reactive capture-the-flag agents")]
struct Cli {
    /// Random seed for reproducibility
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play games between a red and a blue team
    Play(play_cmd::PlayArgs),
    /// Print features and scores of one agent's legal actions
    Explain(explain::ExplainArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Explain(args) => explain::run(args, cli.seed),
    }
}
