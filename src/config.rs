//! Configuration Management
//!
//! Handles persistent profile storage for atlas-cfn. A profile names the
//! Atlas endpoint and credentials a resource model is provisioned with.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Public Atlas endpoint
pub const DEFAULT_BASE_URL: &str = "https://cloud.mongodb.com";

/// Profile used when neither the model nor the command line names one
pub const DEFAULT_PROFILE: &str = "default";

pub const ENV_BASE_URL: &str = "MONGODB_ATLAS_BASE_URL";
pub const ENV_CLIENT_ID: &str = "MONGODB_ATLAS_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "MONGODB_ATLAS_CLIENT_SECRET";
pub const ENV_ACCESS_TOKEN: &str = "MONGODB_ATLAS_ACCESS_TOKEN";

/// Connection settings of one named profile
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProfileConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Service account client id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    /// Pre-issued bearer token, takes precedence over the service account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl ProfileConfig {
    /// Effective base URL (profile > public endpoint)
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    /// Overlay environment variables on top of the stored profile
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_BASE_URL) {
            self.base_url = Some(v);
        }
        if let Some(v) = lookup(ENV_CLIENT_ID) {
            self.client_id = Some(v);
        }
        if let Some(v) = lookup(ENV_CLIENT_SECRET) {
            self.client_secret = Some(v);
        }
        if let Some(v) = lookup(ENV_ACCESS_TOKEN) {
            self.access_token = Some(v);
        }
        self
    }
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Profile used when none is requested
    #[serde(default)]
    pub default_profile: Option<String>,
    #[serde(default)]
    pub profiles: HashMap<String, ProfileConfig>,
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("atlas-cfn").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from an explicit path, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Name of the profile to use (model/CLI > config default > "default")
    pub fn effective_profile_name(&self, requested: Option<&str>) -> String {
        requested
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
    }

    /// Resolve a profile by name and apply environment overrides
    pub fn resolve_profile(&self, requested: Option<&str>) -> ProfileConfig {
        let name = self.effective_profile_name(requested);
        let stored = self.profiles.get(&name).cloned().unwrap_or_else(|| {
            tracing::debug!("Profile '{}' not found in config, using environment only", name);
            ProfileConfig::default()
        });
        stored.with_env(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
    }

    /// Store a profile and save
    pub fn set_profile(&mut self, name: &str, profile: ProfileConfig) -> Result<()> {
        self.profiles.insert(name.to_string(), profile);
        self.save()
    }
}
