//! `MongoDB::Atlas::Cluster` resource model
//!
//! Field names follow the resource schema. Every property is optional so an
//! unset property never reaches Atlas.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClusterModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced_settings: Option<ProcessArgs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bi_connector: Option<BiConnector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_type: Option<String>,
    /// Read-only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    /// Read-only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_strings: Option<ConnectionStrings>,
    #[serde(rename = "DiskSizeGB", default, skip_serializing_if = "Option::is_none")]
    pub disk_size_gb: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_at_rest_provider: Option<String>,
    /// Name of the credentials profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Label>>,
    #[serde(rename = "MongoDBMajorVersion", default, skip_serializing_if = "Option::is_none")]
    pub mongodb_major_version: Option<String>,
    /// Read-only
    #[serde(rename = "MongoDBVersion", default, skip_serializing_if = "Option::is_none")]
    pub mongodb_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pit_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_specs: Option<Vec<AdvancedReplicationSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_cert_type: Option<String>,
    /// Read-only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_release_system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termination_protection_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProcessArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_read_concern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_write_concern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_index_key_too_long: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javascript_enabled: Option<bool>,
    #[serde(rename = "MinimumEnabledTLSProtocol", default, skip_serializing_if = "Option::is_none")]
    pub minimum_enabled_tls_protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_table_scan: Option<bool>,
    #[serde(rename = "OplogSizeMB", default, skip_serializing_if = "Option::is_none")]
    pub oplog_size_mb: Option<i32>,
    #[serde(rename = "SampleSizeBIConnector", default, skip_serializing_if = "Option::is_none")]
    pub sample_size_bi_connector: Option<i32>,
    #[serde(
        rename = "SampleRefreshIntervalBIConnector",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sample_refresh_interval_bi_connector: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oplog_min_retention_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_lifetime_limit_seconds: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BiConnector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_preference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConnectionStrings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_srv: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_srv: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_endpoints: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_endpoints_srv: Option<Vec<String>>,
    #[serde(
        rename = "SRVShardOptimizedConnectionString",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub srv_shard_optimized_connection_string: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdvancedReplicationSpec {
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_shards: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced_region_configs: Option<Vec<AdvancedRegionConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdvancedRegionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics_auto_scaling: Option<AdvancedAutoScaling>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_scaling: Option<AdvancedAutoScaling>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backing_provider_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics_specs: Option<Specs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electable_specs: Option<Specs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only_specs: Option<Specs>,
}

/// Hardware of one node role. Disk IOPS is text in the schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Specs {
    #[serde(rename = "DiskIOPS", default, skip_serializing_if = "Option::is_none")]
    pub disk_iops: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ebs_volume_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_count: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdvancedAutoScaling {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute: Option<Compute>,
    #[serde(rename = "DiskGB", default, skip_serializing_if = "Option::is_none")]
    pub disk_gb: Option<DiskGb>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Compute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_down_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_instance_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_instance_size: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DiskGb {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Label {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Label {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: Some(key.to_string()),
            value: Some(value.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_property_names() {
        let model: ClusterModel = serde_json::from_value(json!({
            "ProjectId": "p1",
            "Name": "c0",
            "DiskSizeGB": 20,
            "MongoDBMajorVersion": "7",
            "AdvancedSettings": {"OplogSizeMB": 1024, "MinimumEnabledTLSProtocol": "TLS1_2"},
            "ReplicationSpecs": [{
                "ID": "rs1",
                "NumShards": 1,
                "AdvancedRegionConfigs": [{
                    "RegionName": "US_EAST_1",
                    "ElectableSpecs": {"DiskIOPS": "3000", "InstanceSize": "M10", "NodeCount": 3},
                    "AutoScaling": {"DiskGB": {"Enabled": true}}
                }]
            }]
        }))
        .unwrap();

        assert_eq!(model.project_id.as_deref(), Some("p1"));
        assert_eq!(model.disk_size_gb, Some(20.0));
        assert_eq!(model.mongodb_major_version.as_deref(), Some("7"));
        assert_eq!(model.advanced_settings.as_ref().unwrap().oplog_size_mb, Some(1024));

        let spec = &model.replication_specs.as_ref().unwrap()[0];
        assert_eq!(spec.id.as_deref(), Some("rs1"));
        let region = &spec.advanced_region_configs.as_ref().unwrap()[0];
        assert_eq!(region.electable_specs.as_ref().unwrap().disk_iops.as_deref(), Some("3000"));
    }

    #[test]
    fn test_unset_properties_are_omitted() {
        let model = ClusterModel {
            name: Some("c0".to_string()),
            backup_enabled: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&model).unwrap(),
            json!({"Name": "c0", "BackupEnabled": false})
        );
    }
}
