//! HTTP utilities for Atlas Admin API calls

use super::error::AtlasApiError;
use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::Value;

/// Versioned media type of the Atlas Admin API v2 resources we speak
pub const ATLAS_MEDIA_TYPE: &str = "application/vnd.atlas.2023-10-01+json";

/// Search index endpoints are versioned separately
pub const ATLAS_SEARCH_MEDIA_TYPE: &str = "application/vnd.atlas.2023-01-01+json";

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP client wrapper for Atlas API calls
#[derive(Clone)]
pub struct AtlasHttpClient {
    client: Client,
}

impl AtlasHttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("atlas-cfn/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Access the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Make a GET request to the Atlas API
    pub async fn get(&self, url: &str, token: &str, media_type: &str) -> Result<Value> {
        self.send(Method::GET, url, token, media_type, None).await
    }

    /// Make a POST request to the Atlas API
    pub async fn post(&self, url: &str, token: &str, media_type: &str, body: &Value) -> Result<Value> {
        self.send(Method::POST, url, token, media_type, Some(body)).await
    }

    /// Make a PATCH request to the Atlas API
    pub async fn patch(&self, url: &str, token: &str, media_type: &str, body: &Value) -> Result<Value> {
        self.send(Method::PATCH, url, token, media_type, Some(body)).await
    }

    /// Make a DELETE request to the Atlas API
    pub async fn delete(&self, url: &str, token: &str, media_type: &str) -> Result<Value> {
        self.send(Method::DELETE, url, token, media_type, None).await
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        token: &str,
        media_type: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, url)
            .bearer_auth(token)
            .header(ACCEPT, media_type);

        if let Some(body) = body {
            let payload = serde_json::to_vec(body).context("Failed to encode request body")?;
            request = request.header(CONTENT_TYPE, media_type).body(payload);
        }

        let response = request.send().await.context("Failed to send request")?;

        let status = response.status();
        let response_body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&response_body));
            return Err(AtlasApiError::from_response(status.as_u16(), &response_body).into());
        }

        // Handle empty response (DELETE returns 202/204 with no body)
        if response_body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&response_body).context("Failed to parse response JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.starts_with(&"x".repeat(200)));
        assert!(sanitized.contains("500 bytes total"));
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("a\nb\tc"), "abc");
    }
}
