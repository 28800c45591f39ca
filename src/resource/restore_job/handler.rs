//! Restore job resource handlers
//!
//! A restore job cannot be changed once submitted, so there is no update
//! handler. Create optionally waits for the job to finish when
//! `EnableSynchronousCreation` is set; the host drives the wait by invoking
//! create again with the returned context.

use super::mappings::{expand_restore_job, merge_restore_job};
use super::model::{RestoreJobModel, INSTANCE_TYPE_CLUSTER, INSTANCE_TYPE_SERVERLESS};
use crate::atlas::client::AtlasClient;
use crate::resource::progress::{CallbackContext, HandlerErrorCode, ProgressEvent};
use crate::resource::util::{format_timestamp, present_string};
use chrono::Utc;

pub const DEFAULT_CALLBACK_DELAY_SECONDS: u32 = 30;
pub const DEFAULT_TIMEOUT_SECONDS: i64 = 1200;

const STATE_RESTORING: &str = "RESTORING";

type Event = ProgressEvent<RestoreJobModel>;

/// Where a job lives: project, instance name, serverless or not
struct Target {
    project_id: String,
    instance: String,
    serverless: bool,
}

fn target(model: &RestoreJobModel) -> Result<Target, Event> {
    let (Some(project_id), Some(instance)) = (
        present_string(&model.project_id),
        present_string(&model.instance_name),
    ) else {
        return Err(Event::failed(
            HandlerErrorCode::InvalidRequest,
            "ProjectId and InstanceName are required",
        ));
    };

    match model.instance_type.as_deref() {
        None | Some(INSTANCE_TYPE_CLUSTER) | Some(INSTANCE_TYPE_SERVERLESS) => {}
        Some(other) => {
            return Err(Event::failed(
                HandlerErrorCode::InvalidRequest,
                format!("InstanceType must be cluster or serverless, got {}", other),
            ))
        }
    }

    Ok(Target {
        project_id,
        instance,
        serverless: model.is_serverless(),
    })
}

fn job_id(model: &RestoreJobModel) -> Result<String, Event> {
    present_string(&model.id)
        .ok_or_else(|| Event::failed(HandlerErrorCode::InvalidRequest, "Id is required"))
}

pub async fn create(
    client: &AtlasClient,
    current: &RestoreJobModel,
    context: Option<&CallbackContext>,
) -> Event {
    let target = match target(current) {
        Ok(t) => t,
        Err(event) => return event,
    };

    if let Some(context) = context {
        return wait_for_job(client, current, &target, context).await;
    }

    tracing::info!(
        "Creating restore job for {} in project {}",
        target.instance,
        target.project_id
    );

    let request = expand_restore_job(current);
    let job = match client
        .create_restore_job(&target.project_id, &target.instance, target.serverless, &request)
        .await
    {
        Ok(job) => job,
        Err(err) => return Event::from_error(&err),
    };

    let mut model = merge_restore_job(current, &job);
    model.created_at = Some(format_timestamp(&Utc::now()));

    if !current.is_synchronous() || job.is_terminal() {
        return Event::success(model, "Create complete");
    }

    Event::in_progress(
        model,
        callback_delay(current),
        CallbackContext::new(STATE_RESTORING),
        "Restore job in progress",
    )
}

pub async fn read(client: &AtlasClient, current: &RestoreJobModel) -> Event {
    let target = match target(current) {
        Ok(t) => t,
        Err(event) => return event,
    };
    let id = match job_id(current) {
        Ok(id) => id,
        Err(event) => return event,
    };

    match client
        .get_restore_job(&target.project_id, &target.instance, target.serverless, &id)
        .await
    {
        Ok(job) => Event::success(merge_restore_job(current, &job), "Read complete"),
        Err(err) => Event::from_error(&err),
    }
}

/// Cancel an unfinished cluster restore. Serverless restores cannot be
/// cancelled and are left to run.
pub async fn delete(client: &AtlasClient, current: &RestoreJobModel) -> Event {
    let target = match target(current) {
        Ok(t) => t,
        Err(event) => return event,
    };
    let id = match job_id(current) {
        Ok(id) => id,
        Err(event) => return event,
    };

    let job = match client
        .get_restore_job(&target.project_id, &target.instance, target.serverless, &id)
        .await
    {
        Ok(job) => job,
        Err(err) => return Event::from_error(&err),
    };

    if job.is_terminal() || target.serverless {
        tracing::debug!("Restore job {} needs no cancellation", id);
        return Event::completed("Delete complete");
    }

    tracing::info!("Cancelling restore job {}", id);

    match client
        .cancel_restore_job(&target.project_id, &target.instance, &id)
        .await
    {
        Ok(()) => Event::completed("Delete complete"),
        Err(err) => Event::from_error(&err),
    }
}

pub async fn list(client: &AtlasClient, current: &RestoreJobModel) -> Event {
    let target = match target(current) {
        Ok(t) => t,
        Err(event) => return event,
    };

    match client
        .list_restore_jobs(&target.project_id, &target.instance, target.serverless)
        .await
    {
        Ok(jobs) => {
            let base = RestoreJobModel {
                project_id: current.project_id.clone(),
                instance_type: current.instance_type.clone(),
                instance_name: current.instance_name.clone(),
                profile: current.profile.clone(),
                ..Default::default()
            };
            let models = jobs.iter().map(|job| merge_restore_job(&base, job)).collect();
            Event::success_list(models)
        }
        Err(err) => Event::from_error(&err),
    }
}

fn callback_delay(model: &RestoreJobModel) -> u32 {
    model
        .synchronous_creation_options
        .as_ref()
        .and_then(|o| o.callback_delay_seconds)
        .unwrap_or(DEFAULT_CALLBACK_DELAY_SECONDS)
}

fn timeout_seconds(model: &RestoreJobModel) -> i64 {
    model
        .synchronous_creation_options
        .as_ref()
        .and_then(|o| o.time_out_in_seconds)
        .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
}

/// Poll step of a synchronous create
async fn wait_for_job(
    client: &AtlasClient,
    current: &RestoreJobModel,
    target: &Target,
    context: &CallbackContext,
) -> Event {
    let id = match job_id(current) {
        Ok(id) => id,
        Err(event) => return event,
    };

    let job = match client
        .get_restore_job(&target.project_id, &target.instance, target.serverless, &id)
        .await
    {
        Ok(job) => job,
        Err(err) => return Event::from_error(&err),
    };

    let model = merge_restore_job(current, &job);
    if job.is_terminal() {
        return Event::success(model, "Create complete");
    }

    let started_at = context.started_at.unwrap_or_else(|| Utc::now().timestamp());
    let elapsed = Utc::now().timestamp() - started_at;
    if elapsed >= timeout_seconds(current) {
        let return_success = current
            .synchronous_creation_options
            .as_ref()
            .and_then(|o| o.return_success_if_time_out)
            .unwrap_or(false);

        tracing::warn!("Restore job {} still running after {}s", id, elapsed);
        return if return_success {
            Event::success(model, "Restore job still running, timeout reached")
        } else {
            Event::failed(
                HandlerErrorCode::GeneralServiceException,
                format!("Restore job {} did not finish within {}s", id, elapsed),
            )
        };
    }

    Event::in_progress(
        model,
        callback_delay(current),
        CallbackContext {
            state_name: Some(STATE_RESTORING.to_string()),
            started_at: Some(started_at),
        },
        "Restore job in progress",
    )
}
