//! Worksheet extraction via the Sheets v4 values endpoint
//!
//! The first row supplies field names, every following row becomes one
//! record. Source trouble (missing worksheet, empty sheet, transport
//! errors after connect) yields an empty batch so the caller can skip the
//! category without aborting the run.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::transfer::{FieldValue, Record};

use super::auth::{self, parse_service_account};

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Read-only Google Sheets client holding an access token for the run
pub struct SheetsClient {
    http: reqwest::Client,
    access_token: String,
}

impl SheetsClient {
    /// Parse the credential blob and obtain an access token; both failure
    /// modes are fatal for the run
    pub async fn connect(raw_credentials: &str) -> Result<Self> {
        let key = parse_service_account(raw_credentials)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;

        let access_token = auth::access_token(&http, &key).await?;
        log::info!("Authenticated Sheets access as {}", key.client_email);

        Ok(SheetsClient { http, access_token })
    }

    /// Fetch every data row of a worksheet as records
    ///
    /// Never fails: a missing worksheet, an empty sheet, or a transport
    /// error is logged and reported as zero records.
    pub async fn fetch_records(&self, sheet_id: &str, worksheet: &str) -> Vec<Record> {
        match self.fetch_values(sheet_id, worksheet).await {
            Ok(values) => {
                let records = records_from_values(values);
                if records.is_empty() {
                    log::warn!("No data found in sheet {}/{}", sheet_id, worksheet);
                }
                records
            }
            Err(e) => {
                log::warn!("Could not read sheet {}/{}: {:#}", sheet_id, worksheet, e);
                Vec::new()
            }
        }
    }

    async fn fetch_values(
        &self,
        sheet_id: &str,
        worksheet: &str,
    ) -> Result<Vec<Vec<serde_json::Value>>> {
        let url = format!(
            "https://sheets.googleapis.com/v4/spreadsheets/{}/values/{}",
            sheet_id, worksheet
        );

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?
            .error_for_status()?;

        let range = response.json::<ValueRange>().await?;
        Ok(range.values)
    }
}

/// Turn a raw value range into records, header row first
///
/// Short rows are padded with empty cells; columns past the header row are
/// dropped, matching how the sheet provider reports ragged data.
fn records_from_values(values: Vec<Vec<serde_json::Value>>) -> Vec<Record> {
    let mut rows = values.into_iter();
    let Some(header) = rows.next() else {
        return Vec::new();
    };

    let fields: Vec<String> = header.iter().map(cell_to_string).collect();

    rows.map(|row| {
        fields
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let value = row
                    .get(i)
                    .map(|cell| FieldValue::parse(&cell_to_string(cell)))
                    .unwrap_or(FieldValue::Empty);
                (name.clone(), value)
            })
            .collect()
    })
    .collect()
}

fn cell_to_string(cell: &serde_json::Value) -> String {
    match cell {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
