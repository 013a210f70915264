//! Client for the Kemenkeu BIOS reporting API
//!
//! Covers the three calls the pipeline makes: the token exchange, the
//! per-record delivery POST, and the read-back query used by report
//! generation.

pub mod auth;
pub mod client;
pub mod models;

pub use auth::acquire_token;
pub use client::{BiosClient, SendOutcome};
pub use models::{DeliveryResponse, ReadBackResponse, TokenResponse, SUCCESS_MARKER};
