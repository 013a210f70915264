//! Authenticated BIOS client: per-record delivery and read-back queries

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::StatusCode;
use serde_json::json;

use crate::transfer::Record;

use super::auth::acquire_token;
use super::models::{DeliveryResponse, ReadBackResponse, SUCCESS_MARKER};

/// Outcome of delivering one record
///
/// Delivery never raises past this boundary; every failure mode collapses
/// into a message the orchestrator can log and count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Accepted,
    Rejected(String),
}

impl SendOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SendOutcome::Accepted)
    }
}

/// BIOS API client holding the run's bearer token
pub struct BiosClient {
    http: reqwest::Client,
    token: String,
    satker: String,
    api_key: String,
}

impl BiosClient {
    /// Build an HTTP client and acquire the run token; fatal if the token
    /// endpoint refuses or the transport fails
    pub async fn connect(token_url: &str, satker: &str, api_key: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;

        let token = acquire_token(&http, token_url, satker, api_key).await?;
        log::info!("Acquired BIOS API token");

        Ok(BiosClient {
            http,
            token,
            satker: satker.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// POST one normalized record to a category endpoint
    ///
    /// Exactly one network write per call, no idempotency key, no retry.
    pub async fn send_record(&self, endpoint: &str, record: &Record) -> SendOutcome {
        let response = match self
            .http
            .post(endpoint)
            .bearer_auth(&self.token)
            .json(record)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return SendOutcome::Rejected(format!("request to {} failed: {}", endpoint, e)),
        };

        let status = response.status();
        let body = response.json::<DeliveryResponse>().await.ok();
        evaluate_delivery(status, body.as_ref())
    }

    /// Fetch previously-accepted rows from a read-back endpoint
    ///
    /// Errors here are recoverable; report generation skips the category.
    pub async fn fetch_accepted(&self, endpoint: &str) -> Result<Vec<serde_json::Value>> {
        let body = json!({
            "satker": self.satker,
            "key": self.api_key,
        });

        let response = self
            .http
            .post(endpoint)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Read-back endpoint {} unreachable", endpoint))?;

        let status = response.status();
        if !status.is_success() {
            bail!("Read-back endpoint {} returned HTTP {}", endpoint, status);
        }

        let parsed = response
            .json::<ReadBackResponse>()
            .await
            .with_context(|| format!("Read-back response from {} was not JSON", endpoint))?;

        match parsed.data {
            Some(rows) => Ok(rows),
            None => bail!("Read-back response from {} carried no data field", endpoint),
        }
    }
}

/// Decide whether a delivery response means the record was accepted
///
/// Acceptance requires both a 2xx transport status and the documented
/// success marker in the payload.
pub fn evaluate_delivery(status: StatusCode, body: Option<&DeliveryResponse>) -> SendOutcome {
    if !status.is_success() {
        return SendOutcome::Rejected(format!("endpoint returned HTTP {}", status));
    }

    match body {
        Some(b) if b.status.as_deref() == Some(SUCCESS_MARKER) => SendOutcome::Accepted,
        Some(b) => {
            let detail = b
                .message
                .clone()
                .or_else(|| b.status.clone())
                .unwrap_or_else(|| "no status in response body".to_string());
            SendOutcome::Rejected(format!("API rejected record: {}", detail))
        }
        None => SendOutcome::Rejected("response body had no status field".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(status: Option<&str>, message: Option<&str>) -> DeliveryResponse {
        DeliveryResponse {
            status: status.map(String::from),
            message: message.map(String::from),
        }
    }

    #[test]
    fn test_accepted_requires_2xx_and_marker() {
        let outcome = evaluate_delivery(StatusCode::OK, Some(&body(Some(SUCCESS_MARKER), None)));
        assert_eq!(outcome, SendOutcome::Accepted);
    }

    #[test]
    fn test_marker_without_2xx_is_rejected() {
        let outcome = evaluate_delivery(
            StatusCode::BAD_GATEWAY,
            Some(&body(Some(SUCCESS_MARKER), None)),
        );
        assert!(matches!(outcome, SendOutcome::Rejected(msg) if !msg.is_empty()));
    }

    #[test]
    fn test_2xx_without_marker_is_rejected_with_api_message() {
        let outcome = evaluate_delivery(
            StatusCode::OK,
            Some(&body(Some("MSG40002"), Some("duplikat tanggal transaksi"))),
        );
        match outcome {
            SendOutcome::Rejected(msg) => assert!(msg.contains("duplikat tanggal transaksi")),
            SendOutcome::Accepted => panic!("should be rejected"),
        }
    }

    #[test]
    fn test_unparseable_body_is_rejected() {
        let outcome = evaluate_delivery(StatusCode::OK, None);
        assert!(matches!(outcome, SendOutcome::Rejected(msg) if !msg.is_empty()));
    }
}
