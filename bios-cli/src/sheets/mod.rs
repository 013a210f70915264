//! Google Sheets source: service-account auth plus worksheet extraction

pub mod auth;
pub mod client;

pub use auth::{ServiceAccountKey, parse_service_account};
pub use client::SheetsClient;
