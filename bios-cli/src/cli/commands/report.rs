//! Report command handler

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use colored::*;

use crate::api::BiosClient;
use crate::config::{Config, Secrets};
use crate::report;

#[derive(Args)]
pub struct ReportArgs {
    /// Config file overriding the built-in category wiring
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory receiving index.html and the .nojekyll marker
    #[arg(long, default_value = "public")]
    pub output_dir: PathBuf,
}

pub async fn handle_report_command(args: ReportArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let secrets = Secrets::from_env()?;

    let bios = BiosClient::connect(&config.token_url, &secrets.satker, &secrets.api_key)
        .await
        .context("Failed to acquire BIOS API token")?;

    let sections = report::collect(&config, &bios).await;
    let html = report::render(&sections, Local::now());
    let index = report::write_report(&args.output_dir, &html)?;

    println!(
        "Report with {} categories written to {}",
        sections.len().to_string().bold(),
        index.display().to_string().green()
    );
    Ok(())
}
