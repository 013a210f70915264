//! CLI surface: argument definitions and command dispatch

pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bios-cli",
    version,
    about = "Synchronize BLU spreadsheet records to the Kemenkeu BIOS reporting API"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract spreadsheet rows and deliver them to the BIOS API
    Sync(commands::sync::SyncArgs),
    /// Render a static HTML report of rows the API has accepted
    Report(commands::report::ReportArgs),
}
