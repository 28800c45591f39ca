//! Restore job Model <-> Atlas conversions

use super::model::{Link, RestoreJobModel};
use crate::atlas::restore_job::{DiskBackupSnapshotRestoreJob, Link as AtlasLink};
use crate::resource::util::{format_timestamp, parse_int_lossy, present_string};

/// Build the restore request. Only the fields Atlas accepts on create are
/// sent; job status fields stay unset.
pub fn expand_restore_job(model: &RestoreJobModel) -> DiskBackupSnapshotRestoreJob {
    DiskBackupSnapshotRestoreJob {
        delivery_type: present_string(&model.delivery_type),
        snapshot_id: present_string(&model.snapshot_id),
        target_group_id: present_string(&model.target_project_id),
        target_cluster_name: present_string(&model.target_cluster_name),
        oplog_ts: model
            .op_log_ts
            .as_deref()
            .map(|v| parse_int_lossy("OpLogTs", v)),
        oplog_inc: model
            .op_log_inc
            .as_deref()
            .map(|v| parse_int_lossy("OpLogInc", v)),
        point_in_time_utc_seconds: model.point_in_time_utc_seconds,
        ..Default::default()
    }
}

pub fn flatten_links(links: &[AtlasLink]) -> Vec<Link> {
    links
        .iter()
        .map(|l| Link {
            rel: l.rel.clone(),
            href: l.href.clone(),
        })
        .collect()
}

/// Merge a job into the prior model. Status fields are read-only and are
/// always taken from the job; addressing and sync options stay as declared.
pub fn merge_restore_job(prior: &RestoreJobModel, job: &DiskBackupSnapshotRestoreJob) -> RestoreJobModel {
    let mut model = prior.clone();

    model.id = job.id.clone().or(model.id);
    model.cancelled = job.cancelled;
    model.expired = job.expired;
    model.delivery_url = job.delivery_url.clone();
    model.expires_at = job.expires_at.as_ref().map(format_timestamp);
    model.finished_at = job.finished_at.as_ref().map(format_timestamp);
    model.timestamp = job.timestamp.as_ref().map(format_timestamp);
    model.links = job.links.as_deref().map(flatten_links);

    if let Some(v) = &job.delivery_type {
        model.delivery_type = Some(v.clone());
    }
    if let Some(v) = &job.snapshot_id {
        model.snapshot_id = Some(v.clone());
    }
    if let Some(v) = &job.target_group_id {
        model.target_project_id = Some(v.clone());
    }
    if let Some(v) = &job.target_cluster_name {
        model.target_cluster_name = Some(v.clone());
    }
    if let Some(v) = job.oplog_ts {
        model.op_log_ts = Some(v.to_string());
    }
    if let Some(v) = job.oplog_inc {
        model.op_log_inc = Some(v.to_string());
    }
    if let Some(v) = job.point_in_time_utc_seconds {
        model.point_in_time_utc_seconds = Some(v);
    }

    model
}
