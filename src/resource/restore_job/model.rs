//! `MongoDB::Atlas::CloudBackUpRestoreJobs` resource model

use serde::{Deserialize, Serialize};

pub const INSTANCE_TYPE_CLUSTER: &str = "cluster";
pub const INSTANCE_TYPE_SERVERLESS: &str = "serverless";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RestoreJobModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// `cluster` or `serverless`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_url: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expired: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
    /// Integer carried as text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op_log_ts: Option<String>,
    /// Integer carried as text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op_log_inc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_in_time_utc_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_cluster_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_synchronous_creation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synchronous_creation_options: Option<SynchronousCreationOptions>,
}

impl RestoreJobModel {
    pub fn is_serverless(&self) -> bool {
        self.instance_type.as_deref() == Some(INSTANCE_TYPE_SERVERLESS)
    }

    pub fn is_synchronous(&self) -> bool {
        self.enable_synchronous_creation == Some(true)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Link {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SynchronousCreationOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_out_in_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_delay_seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_success_if_time_out: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_model() {
        let model: RestoreJobModel = serde_json::from_value(json!({
            "ProjectId": "p1",
            "InstanceType": "serverless",
            "InstanceName": "s0",
            "OpLogTs": "1700000000",
            "EnableSynchronousCreation": true,
            "SynchronousCreationOptions": {"TimeOutInSeconds": 600, "CallbackDelaySeconds": 30}
        }))
        .unwrap();

        assert!(model.is_serverless());
        assert!(model.is_synchronous());
        assert_eq!(model.op_log_ts.as_deref(), Some("1700000000"));
        let options = model.synchronous_creation_options.unwrap();
        assert_eq!(options.time_out_in_seconds, Some(600));
        assert_eq!(options.return_success_if_time_out, None);
    }
}
