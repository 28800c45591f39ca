//! Cluster model <-> Atlas cluster mappings
//!
//! `expand_*` functions build Atlas request shapes from the resource model,
//! `flatten_*` functions rebuild model pieces from Atlas responses. None of
//! them fail: absent inputs map to absent outputs and malformed numeric text
//! degrades to zero.

use super::model::{
    AdvancedAutoScaling, AdvancedRegionConfig, AdvancedReplicationSpec, BiConnector, ClusterModel,
    Compute, ConnectionStrings, DiskGb, Label, ProcessArgs, Specs, Tag,
};
use crate::atlas::cluster as admin;
use crate::resource::progress::ProgressEvent;
use crate::resource::util::{format_timestamp, parse_int_lossy, present_string};

/// Provider used when a region config names none
pub const DEFAULT_PROVIDER: &str = "AWS";

/// Label every cluster created through this provider carries
pub const DEFAULT_LABEL_KEY: &str = "Infrastructure Tool";
pub const DEFAULT_LABEL_VALUE: &str = "MongoDB Atlas CloudFormation Provider";

// =============================================================================
// Request orchestration
// =============================================================================

/// Build the cluster create/update request from a model.
///
/// The returned event is a placeholder: it is always `NotEvaluated` until the
/// request has actually been sent.
pub fn set_cluster_request(
    current: &ClusterModel,
) -> (admin::AdvancedClusterDescription, ProgressEvent<ClusterModel>) {
    let request = admin::AdvancedClusterDescription {
        name: current.name.clone(),
        replication_specs: current
            .replication_specs
            .as_deref()
            .map(expand_replication_specs),
        encryption_at_rest_provider: current.encryption_at_rest_provider.clone(),
        cluster_type: current.cluster_type.clone(),
        backup_enabled: current.backup_enabled,
        bi_connector: current.bi_connector.as_ref().map(expand_bi_connector),
        disk_size_gb: current.disk_size_gb,
        labels: current
            .labels
            .as_deref()
            .filter(|labels| !labels.is_empty())
            .map(expand_labels),
        mongodb_major_version: current
            .mongodb_major_version
            .as_deref()
            .map(format_mongodb_major_version),
        pit_enabled: current.pit_enabled,
        paused: current.paused,
        version_release_system: current.version_release_system.clone(),
        root_cert_type: current.root_cert_type.clone(),
        tags: current.tags.as_deref().and_then(expand_tags),
        termination_protection_enabled: current.termination_protection_enabled,
        ..Default::default()
    };

    tracing::debug!(
        "cluster request: name={:?} replication_specs={}",
        request.name,
        request.replication_specs.as_ref().map_or(0, Vec::len)
    );

    (request, ProgressEvent::default())
}

// =============================================================================
// Expand
// =============================================================================

/// Normalise a major version: `"6"` becomes `"6.0"`, dotted values are kept
pub fn format_mongodb_major_version(version: &str) -> String {
    let trimmed = version.trim();
    if trimmed.contains('.') {
        return trimmed.to_string();
    }
    match trimmed.parse::<u32>() {
        Ok(major) => format!("{}.0", major),
        Err(_) => trimmed.to_string(),
    }
}

pub fn expand_bi_connector(bi_connector: &BiConnector) -> admin::BiConnector {
    admin::BiConnector {
        enabled: bi_connector.enabled,
        read_preference: bi_connector.read_preference.clone(),
    }
}

pub fn expand_replication_specs(specs: &[AdvancedReplicationSpec]) -> Vec<admin::ReplicationSpec> {
    specs.iter().map(expand_replication_spec).collect()
}

pub fn expand_replication_spec(spec: &AdvancedReplicationSpec) -> admin::ReplicationSpec {
    admin::ReplicationSpec {
        id: present_string(&spec.id),
        num_shards: spec.num_shards,
        region_configs: spec.advanced_region_configs.as_deref().map(expand_region_configs),
        zone_name: spec.zone_name.clone(),
    }
}

pub fn expand_region_configs(configs: &[AdvancedRegionConfig]) -> Vec<admin::CloudRegionConfig> {
    configs.iter().map(expand_region_config).collect()
}

pub fn expand_region_config(config: &AdvancedRegionConfig) -> admin::CloudRegionConfig {
    admin::CloudRegionConfig {
        provider_name: Some(
            config
                .provider_name
                .clone()
                .unwrap_or_else(|| DEFAULT_PROVIDER.to_string()),
        ),
        region_name: Some(config.region_name.clone().unwrap_or_default()),
        priority: config.priority,
        auto_scaling: config.auto_scaling.as_ref().map(expand_auto_scaling),
        analytics_auto_scaling: config.analytics_auto_scaling.as_ref().map(expand_auto_scaling),
        electable_specs: config.electable_specs.as_ref().map(expand_hardware_spec),
        analytics_specs: config.analytics_specs.as_ref().map(expand_hardware_spec),
        read_only_specs: config.read_only_specs.as_ref().map(expand_hardware_spec),
        backing_provider_name: config.backing_provider_name.clone(),
    }
}

pub fn expand_auto_scaling(scaling: &AdvancedAutoScaling) -> admin::AdvancedAutoScalingSettings {
    admin::AdvancedAutoScalingSettings {
        compute: scaling.compute.as_ref().map(|compute| admin::AdvancedComputeAutoScaling {
            enabled: compute.enabled,
            scale_down_enabled: compute.scale_down_enabled,
            min_instance_size: present_string(&compute.min_instance_size),
            max_instance_size: present_string(&compute.max_instance_size),
        }),
        disk_gb: scaling.disk_gb.as_ref().map(|disk| admin::DiskGbAutoScaling {
            enabled: disk.enabled,
        }),
    }
}

/// Disk IOPS text that fails to parse is sent as 0
pub fn expand_hardware_spec(spec: &Specs) -> admin::HardwareSpec {
    admin::HardwareSpec {
        disk_iops: spec
            .disk_iops
            .as_deref()
            .map(|iops| parse_int_lossy("DiskIOPS", iops)),
        ebs_volume_type: spec.ebs_volume_type.clone(),
        instance_size: spec.instance_size.clone(),
        node_count: spec.node_count,
    }
}

/// Labels always go out as complete pairs
pub fn expand_labels(labels: &[Label]) -> Vec<admin::ComponentLabel> {
    labels
        .iter()
        .map(|label| admin::ComponentLabel {
            key: Some(label.key.clone().unwrap_or_default()),
            value: Some(label.value.clone().unwrap_or_default()),
        })
        .collect()
}

/// An empty tag list is left out of the request
pub fn expand_tags(tags: &[Tag]) -> Option<Vec<admin::ResourceTag>> {
    if tags.is_empty() {
        return None;
    }
    Some(
        tags.iter()
            .map(|tag| admin::ResourceTag {
                key: tag.key.clone(),
                value: tag.value.clone(),
            })
            .collect(),
    )
}

pub fn expand_advanced_settings(args: &ProcessArgs) -> admin::ClusterDescriptionProcessArgs {
    admin::ClusterDescriptionProcessArgs {
        default_read_concern: args.default_read_concern.clone(),
        default_write_concern: args.default_write_concern.clone(),
        fail_index_key_too_long: args.fail_index_key_too_long,
        javascript_enabled: args.javascript_enabled,
        minimum_enabled_tls_protocol: args.minimum_enabled_tls_protocol.clone(),
        no_table_scan: args.no_table_scan,
        oplog_size_mb: args.oplog_size_mb,
        sample_size_bi_connector: args.sample_size_bi_connector,
        sample_refresh_interval_bi_connector: args.sample_refresh_interval_bi_connector,
        oplog_min_retention_hours: args.oplog_min_retention_hours,
        transaction_lifetime_limit_seconds: args.transaction_lifetime_limit_seconds,
    }
}

// =============================================================================
// Flatten
// =============================================================================

pub fn flatten_bi_connector(bi_connector: Option<&admin::BiConnector>) -> Option<BiConnector> {
    bi_connector.map(|bi| BiConnector {
        read_preference: bi.read_preference.clone(),
        enabled: bi.enabled,
    })
}

pub fn flatten_auto_scaling(
    scaling: Option<&admin::AdvancedAutoScalingSettings>,
) -> Option<AdvancedAutoScaling> {
    scaling.map(|scaling| AdvancedAutoScaling {
        compute: scaling.compute.as_ref().map(|compute| Compute {
            enabled: compute.enabled,
            scale_down_enabled: compute.scale_down_enabled,
            min_instance_size: present_string(&compute.min_instance_size),
            max_instance_size: present_string(&compute.max_instance_size),
        }),
        disk_gb: scaling.disk_gb.as_ref().map(|disk| DiskGb { enabled: disk.enabled }),
    })
}

pub fn flatten_hardware_spec(spec: Option<&admin::HardwareSpec>) -> Option<Specs> {
    spec.map(|spec| Specs {
        disk_iops: spec.disk_iops.map(|iops| iops.to_string()),
        ebs_volume_type: spec.ebs_volume_type.clone(),
        instance_size: spec.instance_size.clone(),
        node_count: spec.node_count,
    })
}

pub fn flatten_replication_specs(specs: &[admin::ReplicationSpec]) -> Vec<AdvancedReplicationSpec> {
    specs
        .iter()
        .map(|spec| AdvancedReplicationSpec {
            id: spec.id.clone(),
            num_shards: spec.num_shards,
            zone_name: spec.zone_name.clone(),
            advanced_region_configs: spec.region_configs.as_deref().map(flatten_region_configs),
        })
        .collect()
}

pub fn flatten_region_configs(configs: &[admin::CloudRegionConfig]) -> Vec<AdvancedRegionConfig> {
    configs.iter().map(flatten_region_config).collect()
}

pub fn flatten_region_config(config: &admin::CloudRegionConfig) -> AdvancedRegionConfig {
    AdvancedRegionConfig {
        auto_scaling: flatten_auto_scaling(config.auto_scaling.as_ref()),
        analytics_auto_scaling: flatten_auto_scaling(config.analytics_auto_scaling.as_ref()),
        region_name: config.region_name.clone(),
        provider_name: config.provider_name.clone(),
        backing_provider_name: config.backing_provider_name.clone(),
        priority: config.priority,
        electable_specs: flatten_hardware_spec(config.electable_specs.as_ref()),
        analytics_specs: flatten_hardware_spec(config.analytics_specs.as_ref()),
        read_only_specs: flatten_hardware_spec(config.read_only_specs.as_ref()),
    }
}

/// Private endpoint strings are collected per kind, skipping empty entries.
/// The lists are always present when connection strings are.
pub fn flatten_connection_strings(
    strings: Option<&admin::ClusterConnectionStrings>,
) -> Option<ConnectionStrings> {
    let strings = strings?;

    let mut private_endpoints = Vec::new();
    let mut private_endpoints_srv = Vec::new();
    let mut srv_shard_optimized = Vec::new();

    for endpoint in strings.private_endpoint.iter().flatten() {
        if let Some(s) = present_string(&endpoint.connection_string) {
            private_endpoints.push(s);
        }
        if let Some(s) = present_string(&endpoint.srv_connection_string) {
            private_endpoints_srv.push(s);
        }
        if let Some(s) = present_string(&endpoint.srv_shard_optimized_connection_string) {
            srv_shard_optimized.push(s);
        }
    }

    Some(ConnectionStrings {
        standard: strings.standard.clone(),
        standard_srv: strings.standard_srv.clone(),
        private: strings.private.clone(),
        private_srv: strings.private_srv.clone(),
        private_endpoints: Some(private_endpoints),
        private_endpoints_srv: Some(private_endpoints_srv),
        srv_shard_optimized_connection_string: Some(srv_shard_optimized),
    })
}

pub fn flatten_process_args(args: Option<&admin::ClusterDescriptionProcessArgs>) -> Option<ProcessArgs> {
    args.map(|p| ProcessArgs {
        default_read_concern: p.default_read_concern.clone(),
        default_write_concern: p.default_write_concern.clone(),
        fail_index_key_too_long: p.fail_index_key_too_long,
        javascript_enabled: p.javascript_enabled,
        minimum_enabled_tls_protocol: p.minimum_enabled_tls_protocol.clone(),
        no_table_scan: p.no_table_scan,
        oplog_size_mb: p.oplog_size_mb,
        sample_size_bi_connector: p.sample_size_bi_connector,
        sample_refresh_interval_bi_connector: p.sample_refresh_interval_bi_connector,
        oplog_min_retention_hours: p.oplog_min_retention_hours,
        transaction_lifetime_limit_seconds: p.transaction_lifetime_limit_seconds,
    })
}

/// A present label list always flattens to a present (possibly empty) list
pub fn flatten_labels(labels: Option<&[admin::ComponentLabel]>) -> Vec<Label> {
    labels
        .unwrap_or_default()
        .iter()
        .map(|label| Label {
            key: label.key.clone(),
            value: label.value.clone(),
        })
        .collect()
}

pub fn flatten_tags(tags: Option<&[admin::ResourceTag]>) -> Option<Vec<Tag>> {
    tags.map(|tags| {
        tags.iter()
            .map(|tag| Tag {
                key: tag.key.clone(),
                value: tag.value.clone(),
            })
            .collect()
    })
}

/// Take the response value only if the caller already had one for the field
fn merge_if_set<T: Clone>(prior: &Option<T>, from_response: Option<T>) -> Option<T> {
    if prior.is_some() {
        from_response
    } else {
        None
    }
}

/// Merge an Atlas cluster into the model the caller supplied.
///
/// Read-only properties (connection strings, created date, MongoDB version,
/// state) are always taken from the response, as are the identity
/// properties, tags and termination protection. Every other property is
/// only refreshed when `prior` already had it set. A missing response leaves
/// the model untouched.
pub fn merge_cluster(
    prior: &ClusterModel,
    cluster: Option<&admin::AdvancedClusterDescription>,
) -> ClusterModel {
    let Some(cluster) = cluster else {
        return prior.clone();
    };

    ClusterModel {
        profile: prior.profile.clone(),
        advanced_settings: prior.advanced_settings.clone(),

        project_id: cluster.group_id.clone(),
        name: cluster.name.clone(),
        id: cluster.id.clone(),

        connection_strings: flatten_connection_strings(cluster.connection_strings.as_ref()),
        created_date: cluster.create_date.as_ref().map(format_timestamp),
        mongodb_version: cluster.mongodb_version.clone(),
        state_name: cluster.state_name.clone(),

        backup_enabled: merge_if_set(&prior.backup_enabled, cluster.backup_enabled),
        bi_connector: merge_if_set(
            &prior.bi_connector,
            flatten_bi_connector(cluster.bi_connector.as_ref()),
        ),
        cluster_type: merge_if_set(&prior.cluster_type, cluster.cluster_type.clone()),
        disk_size_gb: merge_if_set(&prior.disk_size_gb, cluster.disk_size_gb),
        encryption_at_rest_provider: merge_if_set(
            &prior.encryption_at_rest_provider,
            cluster.encryption_at_rest_provider.clone(),
        ),
        labels: merge_if_set(&prior.labels, Some(flatten_labels(cluster.labels.as_deref()))),
        mongodb_major_version: merge_if_set(
            &prior.mongodb_major_version,
            cluster.mongodb_major_version.clone(),
        ),
        paused: merge_if_set(&prior.paused, cluster.paused),
        pit_enabled: merge_if_set(&prior.pit_enabled, cluster.pit_enabled),
        root_cert_type: merge_if_set(&prior.root_cert_type, cluster.root_cert_type.clone()),
        replication_specs: merge_if_set(
            &prior.replication_specs,
            cluster
                .replication_specs
                .as_deref()
                .map(flatten_replication_specs),
        ),
        version_release_system: merge_if_set(
            &prior.version_release_system,
            cluster.version_release_system.clone(),
        ),

        termination_protection_enabled: cluster.termination_protection_enabled,
        tags: flatten_tags(cluster.tags.as_deref()),
    }
}

/// Full-overwrite conversion used when listing clusters
pub fn cluster_to_model(cluster: &admin::AdvancedClusterDescription) -> ClusterModel {
    ClusterModel {
        id: cluster.id.clone(),
        project_id: cluster.group_id.clone(),
        name: cluster.name.clone(),
        backup_enabled: cluster.backup_enabled,
        bi_connector: flatten_bi_connector(cluster.bi_connector.as_ref()),
        connection_strings: flatten_connection_strings(cluster.connection_strings.as_ref()),
        cluster_type: cluster.cluster_type.clone(),
        created_date: cluster.create_date.as_ref().map(format_timestamp),
        disk_size_gb: cluster.disk_size_gb,
        encryption_at_rest_provider: cluster.encryption_at_rest_provider.clone(),
        labels: Some(flatten_labels(cluster.labels.as_deref())),
        mongodb_major_version: cluster.mongodb_major_version.clone(),
        mongodb_version: cluster.mongodb_version.clone(),
        paused: cluster.paused,
        pit_enabled: cluster.pit_enabled,
        root_cert_type: cluster.root_cert_type.clone(),
        replication_specs: cluster
            .replication_specs
            .as_deref()
            .map(flatten_replication_specs),
        state_name: cluster.state_name.clone(),
        version_release_system: cluster.version_release_system.clone(),
        termination_protection_enabled: cluster.termination_protection_enabled,
        tags: flatten_tags(cluster.tags.as_deref()),
        ..Default::default()
    }
}

// =============================================================================
// Labels
// =============================================================================

pub fn default_label() -> Label {
    Label::new(DEFAULT_LABEL_KEY, DEFAULT_LABEL_VALUE)
}

/// True if `list` holds `item` or another label with the same key
pub fn contains_label_or_key(list: &[Label], item: &Label) -> bool {
    list.iter()
        .any(|label| label == item || (item.key.is_some() && label.key == item.key))
}

/// Append the provider label unless its key is already used
pub fn with_default_label(mut labels: Vec<Label>) -> Vec<Label> {
    let label = default_label();
    if !contains_label_or_key(&labels, &label) {
        labels.push(label);
    }
    labels
}

/// Drop the provider label so the model shows what the template declared
pub fn without_default_label(labels: Vec<Label>) -> Vec<Label> {
    let label = default_label();
    labels.into_iter().filter(|l| *l != label).collect()
}
