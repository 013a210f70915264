//! Sync command handler

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::*;

use crate::api::BiosClient;
use crate::config::{self, Config, Secrets};
use crate::sheets::SheetsClient;
use crate::transfer::{RunSummary, run_sync};

#[derive(Args)]
pub struct SyncArgs {
    /// Config file overriding the built-in category wiring
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Worksheet to read from every source spreadsheet
    #[arg(long)]
    pub sheet_name: Option<String>,
}

pub async fn handle_sync_command(args: SyncArgs) -> Result<()> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(sheet_name) = args.sheet_name {
        config.worksheet = sheet_name;
    }

    let secrets = Secrets::from_env()?;
    let credentials = config::google_credentials_from_env()?;

    println!("{}", "Starting synchronization...".bold());

    let sheets = SheetsClient::connect(&credentials)
        .await
        .context("Failed to authenticate against the spreadsheet provider")?;

    // No token, no run: every delivery call needs it
    let bios = BiosClient::connect(&config.token_url, &secrets.satker, &secrets.api_key)
        .await
        .context("Failed to acquire BIOS API token")?;

    let summary = run_sync(&config, &sheets, &bios).await;
    print_summary(&summary);

    println!("{}", "Synchronization finished".bold());
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("{}", "Summary".bold());

    for category in &summary.categories {
        let counts = format!("{}/{}", category.delivered, category.total);
        let line = if category.total == 0 {
            format!("{:24} {}", category.category.to_string(), "skipped (no data)".yellow())
        } else if category.is_complete() {
            format!("{:24} {}", category.category.to_string(), counts.green())
        } else {
            let failure = category
                .failure
                .as_ref()
                .map(|f| format!("stopped at record {}: {}", f.record, f.message))
                .unwrap_or_default();
            format!(
                "{:24} {}  {}",
                category.category.to_string(),
                counts.red(),
                failure.red()
            )
        };
        println!("  {}", line);
    }

    println!(
        "  {:24} {}",
        "total",
        format!("{}/{}", summary.total_delivered(), summary.total_records()).bold()
    );
}
