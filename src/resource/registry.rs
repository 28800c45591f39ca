//! Resource Registry - Load resource type definitions from JSON
//!
//! The provider's resource types are described in an embedded JSON file and
//! looked up by key (`cluster`) or by CloudFormation type name
//! (`MongoDB::Atlas::Cluster`).

use clap::ValueEnum;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Embedded resource JSON files (compiled into the binary)
const RESOURCE_FILES: &[&str] = &[include_str!("../resources/atlas.json")];

/// Resource types handled by this provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ResourceKind {
    Cluster,
    SearchIndex,
    RestoreJob,
}

impl ResourceKind {
    /// Registry key of this kind
    pub fn key(&self) -> &'static str {
        match self {
            Self::Cluster => "cluster",
            Self::SearchIndex => "search-index",
            Self::RestoreJob => "restore-job",
        }
    }

    pub fn all() -> [ResourceKind; 3] {
        [Self::Cluster, Self::SearchIndex, Self::RestoreJob]
    }

    /// Resolve a registry key or a CloudFormation type name
    pub fn parse(name: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|kind| kind.key() == name || kind.definition().type_name == name)
    }

    pub fn definition(&self) -> &'static ResourceDef {
        get_registry()
            .resources
            .get(self.key())
            .unwrap_or_else(|| panic!("Resource {} missing from embedded registry", self.key()))
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Handler actions of the provider contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    List,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::List => "list",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource definition from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceDef {
    pub type_name: String,
    /// Model properties that together address one resource
    pub primary_identifier: Vec<String>,
    #[serde(default)]
    pub create_only_properties: Vec<String>,
    #[serde(default)]
    pub read_only_properties: Vec<String>,
    pub handlers: Vec<Action>,
}

impl ResourceDef {
    pub fn supports(&self, action: Action) -> bool {
        self.handlers.contains(&action)
    }

    /// `Key=value` pairs of the primary identifier present in a model, for logs
    pub fn identifier_of(&self, model: &Value) -> String {
        self.primary_identifier
            .iter()
            .filter_map(|key| {
                model
                    .get(key)
                    .and_then(Value::as_str)
                    .map(|v| format!("{}={}", key, v))
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Root structure of resources/*.json
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceConfig {
    #[serde(default)]
    pub resources: HashMap<String, ResourceDef>,
}

/// Global registry loaded from JSON
static REGISTRY: OnceLock<ResourceConfig> = OnceLock::new();

/// Get the resource registry (loads from embedded JSON on first access)
pub fn get_registry() -> &'static ResourceConfig {
    REGISTRY.get_or_init(|| {
        let mut final_config = ResourceConfig {
            resources: HashMap::new(),
        };

        for content in RESOURCE_FILES {
            let partial: ResourceConfig = serde_json::from_str(content)
                .unwrap_or_else(|e| panic!("Failed to parse embedded resource JSON: {}", e));
            final_config.resources.extend(partial.resources);
        }

        final_config
    })
}

/// Get a resource definition by key
pub fn get_resource(key: &str) -> Option<&'static ResourceDef> {
    get_registry().resources.get(key)
}

/// Get all resource keys, sorted
pub fn get_all_resource_keys() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = get_registry()
        .resources
        .keys()
        .map(|s| s.as_str())
        .collect();
    keys.sort_unstable();
    keys
}
