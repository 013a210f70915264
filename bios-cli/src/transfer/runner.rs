//! Batch orchestration over the fixed category order
//!
//! Per category: extract, skip when empty, otherwise normalize and deliver
//! each record in sequence. Policy: the first failing record stops the
//! remainder of its category, sibling categories still run. Categories are
//! independent domains; later records of a failed category must not be
//! written ahead of a human-reviewed correction.

use async_trait::async_trait;
use chrono::{Local, NaiveDate};

use crate::api::{BiosClient, SendOutcome};
use crate::config::{CategoryConfig, Config};
use crate::sheets::SheetsClient;

use super::normalize::normalize;
use super::record::Record;

/// Source of raw records for one category
#[async_trait]
pub trait RecordSource {
    async fn fetch(&self, sheet_id: &str, worksheet: &str) -> Vec<Record>;
}

/// Destination for normalized records
#[async_trait]
pub trait RecordSink {
    async fn deliver(&self, endpoint: &str, record: &Record) -> SendOutcome;
}

#[async_trait]
impl RecordSource for SheetsClient {
    async fn fetch(&self, sheet_id: &str, worksheet: &str) -> Vec<Record> {
        self.fetch_records(sheet_id, worksheet).await
    }
}

#[async_trait]
impl RecordSink for BiosClient {
    async fn deliver(&self, endpoint: &str, record: &Record) -> SendOutcome {
        self.send_record(endpoint, record).await
    }
}

/// Result of one category's pass
#[derive(Debug, Clone)]
pub struct CategorySummary {
    pub category: crate::config::Category,
    /// Records extracted from the source
    pub total: usize,
    /// Records accepted by the API
    pub delivered: usize,
    /// First failure, if the category was stopped early
    pub failure: Option<CategoryFailure>,
}

/// The failure that stopped a category
#[derive(Debug, Clone)]
pub struct CategoryFailure {
    /// 1-based index of the failing record
    pub record: usize,
    pub message: String,
}

impl CategorySummary {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none() && self.delivered == self.total
    }
}

/// Result of a full run across every configured category
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub categories: Vec<CategorySummary>,
}

impl RunSummary {
    pub fn total_delivered(&self) -> usize {
        self.categories.iter().map(|c| c.delivered).sum()
    }

    pub fn total_records(&self) -> usize {
        self.categories.iter().map(|c| c.total).sum()
    }
}

/// Drive every configured category through extract, normalize, deliver
pub async fn run_sync(
    config: &Config,
    source: &dyn RecordSource,
    sink: &dyn RecordSink,
) -> RunSummary {
    let today = Local::now().date_naive();
    let mut summary = RunSummary::default();

    for category in &config.categories {
        summary
            .categories
            .push(run_category(category, &config.worksheet, source, sink, today).await);
    }

    summary
}

async fn run_category(
    config: &CategoryConfig,
    worksheet: &str,
    source: &dyn RecordSource,
    sink: &dyn RecordSink,
    today: NaiveDate,
) -> CategorySummary {
    let category = config.category;
    log::info!("Processing {}...", category);

    let records = source.fetch(&config.sheet_id, worksheet).await;
    if records.is_empty() {
        log::info!("{}: no records found, skipping", category);
        return CategorySummary {
            category,
            total: 0,
            delivered: 0,
            failure: None,
        };
    }

    let total = records.len();
    log::info!("{}: found {} records", category, total);

    let mut delivered = 0;
    let mut failure = None;

    for (idx, record) in records.iter().enumerate() {
        let number = idx + 1;
        log::debug!("{}: sending record {}/{}", category, number, total);

        let normalized = match normalize(record, today) {
            Ok(normalized) => normalized,
            Err(e) => {
                log::error!(
                    "{}: record {}/{} rejected on field {}: {}",
                    category,
                    number,
                    total,
                    e.field(),
                    e
                );
                failure = Some(CategoryFailure {
                    record: number,
                    message: e.to_string(),
                });
                break;
            }
        };

        match sink.deliver(&config.endpoint, &normalized).await {
            SendOutcome::Accepted => {
                delivered += 1;
                log::info!("{}: record {}/{} delivered", category, number, total);
            }
            SendOutcome::Rejected(message) => {
                log::error!(
                    "{}: record {}/{} failed, stopping category: {}",
                    category,
                    number,
                    total,
                    message
                );
                failure = Some(CategoryFailure {
                    record: number,
                    message,
                });
                break;
            }
        }
    }

    log::info!("{}: {}/{} delivered", category, delivered, total);

    CategorySummary {
        category,
        total,
        delivered,
        failure,
    }
}
