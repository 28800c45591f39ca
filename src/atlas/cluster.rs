//! Atlas cluster API shapes
//!
//! Request and response bodies of the `/groups/{groupId}/clusters` endpoints.
//! Every field is optional so that an unset value is omitted from the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedClusterDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bi_connector: Option<BiConnector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_type: Option<String>,
    /// Read-only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_strings: Option<ClusterConnectionStrings>,
    /// Read-only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_date: Option<DateTime<Utc>>,
    #[serde(rename = "diskSizeGB", default, skip_serializing_if = "Option::is_none")]
    pub disk_size_gb: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_at_rest_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<ComponentLabel>>,
    #[serde(rename = "mongoDBMajorVersion", default, skip_serializing_if = "Option::is_none")]
    pub mongodb_major_version: Option<String>,
    /// Read-only
    #[serde(rename = "mongoDBVersion", default, skip_serializing_if = "Option::is_none")]
    pub mongodb_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pit_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_specs: Option<Vec<ReplicationSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_cert_type: Option<String>,
    /// Read-only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<ResourceTag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termination_protection_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_release_system: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiConnector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_preference: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterConnectionStrings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_endpoint: Option<Vec<PrivateEndpointConnectionString>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_srv: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_srv: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivateEndpointConnectionString {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srv_connection_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srv_shard_optimized_connection_string: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub endpoint_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicationSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_shards: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_configs: Option<Vec<CloudRegionConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudRegionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics_auto_scaling: Option<AdvancedAutoScalingSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics_specs: Option<DedicatedHardwareSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_scaling: Option<AdvancedAutoScalingSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backing_provider_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electable_specs: Option<HardwareSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only_specs: Option<DedicatedHardwareSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
}

/// Node sizing of one node role
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareSpec {
    #[serde(rename = "diskIOPS", default, skip_serializing_if = "Option::is_none")]
    pub disk_iops: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ebs_volume_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_count: Option<i32>,
}

/// Analytics and read-only nodes share the electable wire shape
pub type DedicatedHardwareSpec = HardwareSpec;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedAutoScalingSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute: Option<AdvancedComputeAutoScaling>,
    #[serde(rename = "diskGB", default, skip_serializing_if = "Option::is_none")]
    pub disk_gb: Option<DiskGbAutoScaling>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedComputeAutoScaling {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_instance_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_instance_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_down_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskGbAutoScaling {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentLabel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Body of `/clusters/{name}/processArgs`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDescriptionProcessArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_read_concern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_write_concern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_index_key_too_long: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javascript_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_enabled_tls_protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_table_scan: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oplog_min_retention_hours: Option<f64>,
    #[serde(rename = "oplogSizeMB", default, skip_serializing_if = "Option::is_none")]
    pub oplog_size_mb: Option<i32>,
    #[serde(
        rename = "sampleRefreshIntervalBIConnector",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sample_refresh_interval_bi_connector: Option<i32>,
    #[serde(rename = "sampleSizeBIConnector", default, skip_serializing_if = "Option::is_none")]
    pub sample_size_bi_connector: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_lifetime_limit_seconds: Option<i64>,
}
