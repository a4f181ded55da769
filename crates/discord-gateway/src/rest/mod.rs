//! Gateway URL discovery
//!
//! The single REST route the client needs: `GET /gateway` returns the
//! WebSocket URL to connect to. Everything else about the REST API is an
//! external collaborator.

use reqwest::header::AUTHORIZATION;
use serde::Deserialize;

/// Discovery errors; each failed discovery counts against the reconnect
/// budget
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Request failed before a response arrived
    #[error("gateway discovery request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("gateway discovery returned status {0}")]
    Status(reqwest::StatusCode),

    /// Body was not `{"url": "..."}`
    #[error("gateway discovery body missing url field")]
    MalformedBody,
}

#[derive(Debug, Deserialize)]
struct GatewayResponse {
    #[serde(default)]
    url: Option<String>,
}

/// Fetch the gateway WebSocket URL
///
/// # Errors
/// Returns a discovery error on transport failure, non-2xx status, or a
/// body without a `url` field.
pub async fn fetch_gateway_url(
    http: &reqwest::Client,
    base_url: &str,
    token: &str,
) -> Result<String, RestError> {
    let response = http
        .get(format!("{base_url}/gateway"))
        .header(AUTHORIZATION, token)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(RestError::Status(status));
    }

    let body = response.text().await?;
    parse_gateway_body(&body)
}

/// Parse the discovery response body
fn parse_gateway_body(body: &str) -> Result<String, RestError> {
    let parsed: GatewayResponse =
        serde_json::from_str(body).map_err(|_| RestError::MalformedBody)?;
    parsed.url.ok_or(RestError::MalformedBody)
}
