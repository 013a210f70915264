mod api;
mod cli;
mod config;
mod report;
mod sheets;
mod transfer;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = cli::Cli::parse();

    match cli.command {
        cli::Commands::Sync(args) => cli::commands::sync::handle_sync_command(args).await,
        cli::Commands::Report(args) => cli::commands::report::handle_report_command(args).await,
    }
}
