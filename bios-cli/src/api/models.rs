//! Wire models for the BIOS API

use serde::Deserialize;

/// Payload status code the API returns for an accepted record
pub const SUCCESS_MARKER: &str = "MSG20001";

/// Response of the token endpoint
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: Option<String>,
}

/// Response body of a delivery POST
///
/// The API reports acceptance in `status` independently of the HTTP status
/// line; `message` carries the human explanation on rejection.
#[derive(Debug, Default, Deserialize)]
pub struct DeliveryResponse {
    pub status: Option<String>,
    pub message: Option<String>,
}

/// Response of a read-back endpoint
#[derive(Debug, Deserialize)]
pub struct ReadBackResponse {
    pub data: Option<Vec<serde_json::Value>>,
}
