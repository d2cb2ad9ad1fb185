mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::error::AppResult;

const LOG_FILTER_ENV: &str = "STANDUP_LOG";

#[derive(Parser)]
#[command(
    name = "standup",
    author,
    version,
    about = "Summarize your recent GitHub commits for standup"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage stored credentials and settings.
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    tokio::select! {
        result = run(cli) => {
            if let Err(error) = result {
                eprintln!("Error: {error}");
                std::process::exit(1);
            }
        }
        Ok(()) = tokio::signal::ctrl_c() => {
            println!("\n\nExiting. . .");
            std::process::exit(0);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> AppResult<()> {
    match cli.command {
        Some(Commands::Config(args)) => config_cmd::run(args.command).await,
        None => cmd::standup::run().await,
    }
}
