//! Token acquisition against the BIOS token endpoint
//!
//! One form-encoded POST per run; there is no refresh or retry. A run that
//! cannot obtain a token is aborted by the caller before any category is
//! touched.

use anyhow::{Context, Result, bail};
use reqwest::StatusCode;

use super::models::TokenResponse;

/// Exchange the satker id and API key for a bearer token
pub async fn acquire_token(
    http: &reqwest::Client,
    token_url: &str,
    satker: &str,
    key: &str,
) -> Result<String> {
    let params = [("satker", satker), ("key", key)];

    let response = http
        .post(token_url)
        .form(&params)
        .send()
        .await
        .with_context(|| format!("Token endpoint {} unreachable", token_url))?;

    let status = response.status();
    let body = response.json::<TokenResponse>().await.ok();

    token_from_response(status, body)
}

/// Extract the token from the endpoint's response, if it granted one
fn token_from_response(status: StatusCode, body: Option<TokenResponse>) -> Result<String> {
    if !status.is_success() {
        bail!("Token endpoint returned HTTP {}", status);
    }
    match body.and_then(|b| b.token) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => bail!("Token endpoint response carried no token field"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_extracted_on_success() {
        let body = TokenResponse {
            token: Some("abc123".into()),
        };
        let token = token_from_response(StatusCode::OK, Some(body)).unwrap();
        assert_eq!(token, "abc123");
    }

    #[test]
    fn test_non_success_status_fails() {
        let body = TokenResponse {
            token: Some("abc123".into()),
        };
        assert!(token_from_response(StatusCode::UNAUTHORIZED, Some(body)).is_err());
    }

    #[test]
    fn test_missing_token_field_fails() {
        assert!(token_from_response(StatusCode::OK, Some(TokenResponse { token: None })).is_err());
        assert!(token_from_response(StatusCode::OK, None).is_err());
    }
}
