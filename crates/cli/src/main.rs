//! Developer tools for the movement rules.
//!
//! Run with: `march <command>`

mod commands;
mod content;

use anyhow::Result;
use clap::Parser;
use commands::{PathCommand, SimulateCommand};

/// Route planning and order simulation over content files
#[derive(Parser)]
#[command(name = "march")]
#[command(about = "Route planning and order simulation", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Compute and print a route for a unit type
    Path(PathCommand),

    /// Issue a goto and run turns of order processing
    Simulate(SimulateCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let cli = Cli::parse();
    match cli.command {
        Command::Path(cmd) => cmd.execute(),
        Command::Simulate(cmd) => cmd.execute().await,
    }
}

/// Logs go to stderr so `--json` output on stdout stays machine-readable.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
