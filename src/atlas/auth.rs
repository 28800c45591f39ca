//! Atlas Authentication
//!
//! Handles authentication with either a pre-issued access token or an Atlas
//! service account (OAuth 2.0 client credentials grant).

use crate::config::ProfileConfig;
use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Token endpoint, relative to the Atlas base URL
pub const TOKEN_PATH: &str = "/api/oauth/token";

/// Token expiry buffer - refresh tokens this much before they actually expire
const TOKEN_EXPIRY_BUFFER: Duration = Duration::from_secs(60);

/// Default token TTL if the token endpoint omits `expires_in`
const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// Where access tokens come from
#[derive(Clone)]
enum TokenSource {
    /// Token supplied as-is by the profile or environment
    Static(String),
    /// Service account exchanged at the token endpoint
    ClientCredentials {
        client_id: String,
        client_secret: String,
        token_url: String,
    },
}

/// Atlas credentials holder with token caching
#[derive(Clone)]
pub struct AtlasCredentials {
    source: TokenSource,
    http: reqwest::Client,
    token_cache: Arc<RwLock<Option<CachedToken>>>,
}

#[derive(Clone)]
struct CachedToken {
    token: String,
    /// When this token expires (with buffer applied)
    expires_at: Instant,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

impl AtlasCredentials {
    /// Build credentials from a resolved profile
    pub fn from_profile(profile: &ProfileConfig, http: reqwest::Client) -> Result<Self> {
        let source = if let Some(token) = profile.access_token.as_ref().filter(|t| !t.is_empty()) {
            TokenSource::Static(token.clone())
        } else {
            match (&profile.client_id, &profile.client_secret) {
                (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => {
                    TokenSource::ClientCredentials {
                        client_id: id.clone(),
                        client_secret: secret.clone(),
                        token_url: format!("{}{}", profile.base_url().trim_end_matches('/'), TOKEN_PATH),
                    }
                }
                _ => {
                    return Err(anyhow::anyhow!(
                        "No Atlas credentials configured. Set MONGODB_ATLAS_ACCESS_TOKEN or a service account client id and secret"
                    ))
                }
            }
        };

        Ok(Self {
            source,
            http,
            token_cache: Arc::new(RwLock::new(None)),
        })
    }

    /// Get an access token for API calls
    pub async fn get_token(&self) -> Result<String> {
        let (client_id, client_secret, token_url) = match &self.source {
            TokenSource::Static(token) => return Ok(token.clone()),
            TokenSource::ClientCredentials {
                client_id,
                client_secret,
                token_url,
            } => (client_id, client_secret, token_url),
        };

        {
            let cache = self.token_cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.is_valid() {
                    return Ok(cached.token.clone());
                }
                tracing::debug!("Cached token expired, fetching new token");
            }
        }

        let response = self
            .http
            .post(token_url)
            .basic_auth(client_id, Some(client_secret))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await
            .context("Failed to request access token")?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Token request failed: {}", status);
            return Err(anyhow::anyhow!("Failed to get access token: {}", status));
        }

        let token: TokenResponse = response
            .json()
            .await
            .context("Failed to parse token response")?;

        let ttl = token
            .expires_in
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TOKEN_TTL);
        let expires_at = Instant::now() + ttl.saturating_sub(TOKEN_EXPIRY_BUFFER);

        {
            let mut cache = self.token_cache.write().await;
            *cache = Some(CachedToken {
                token: token.access_token.clone(),
                expires_at,
            });
        }

        tracing::debug!(
            "New token cached, expires in ~{} minutes",
            ttl.saturating_sub(TOKEN_EXPIRY_BUFFER).as_secs() / 60
        );

        Ok(token.access_token)
    }
}
