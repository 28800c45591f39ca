//! Resource Dispatch
//!
//! Routes untyped model documents to the typed mappers and handlers of each
//! resource kind. Input and output are `serde_json::Value` so the CLI and
//! library callers share one entry point.

use super::cluster::{self, mappings::merge_cluster, mappings::set_cluster_request, ClusterModel};
use super::progress::{CallbackContext, HandlerErrorCode, ProgressEvent};
use super::registry::{Action, ResourceKind};
use super::restore_job::{self, mappings::expand_restore_job, mappings::merge_restore_job, RestoreJobModel};
use super::search_index::{
    self, mappings::expand_search_index, mappings::merge_search_index, SearchIndexModel,
};
use crate::atlas::client::AtlasClient;
use crate::atlas::cluster::AdvancedClusterDescription;
use crate::atlas::restore_job::DiskBackupSnapshotRestoreJob;
use crate::atlas::search_index::ClusterSearchIndex;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

fn parse<T: DeserializeOwned>(value: &Value, what: &str) -> Result<T> {
    serde_json::from_value(value.clone()).with_context(|| format!("Invalid {}", what))
}

fn to_value<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).context("Failed to serialize result")
}

/// Build the Atlas request body for a model
pub fn expand(kind: ResourceKind, model: &Value) -> Result<Value> {
    tracing::debug!("expand: resource={}", kind);

    match kind {
        ResourceKind::Cluster => {
            let model: ClusterModel = parse(model, "cluster model")?;
            let (request, _) = set_cluster_request(&model);
            to_value(&request)
        }
        ResourceKind::SearchIndex => {
            let model: SearchIndexModel = parse(model, "search index model")?;
            to_value(&expand_search_index(&model)?)
        }
        ResourceKind::RestoreJob => {
            let model: RestoreJobModel = parse(model, "restore job model")?;
            to_value(&expand_restore_job(&model))
        }
    }
}

/// Merge an Atlas response body into a model
pub fn flatten(kind: ResourceKind, model: &Value, response: &Value) -> Result<Value> {
    tracing::debug!("flatten: resource={}", kind);

    match kind {
        ResourceKind::Cluster => {
            let prior: ClusterModel = parse(model, "cluster model")?;
            let cluster: Option<AdvancedClusterDescription> = if response.is_null() {
                None
            } else {
                Some(parse(response, "cluster response")?)
            };
            to_value(&merge_cluster(&prior, cluster.as_ref()))
        }
        ResourceKind::SearchIndex => {
            let prior: SearchIndexModel = parse(model, "search index model")?;
            let index: ClusterSearchIndex = parse(response, "search index response")?;
            to_value(&merge_search_index(&prior, &index))
        }
        ResourceKind::RestoreJob => {
            let prior: RestoreJobModel = parse(model, "restore job model")?;
            let job: DiskBackupSnapshotRestoreJob = parse(response, "restore job response")?;
            to_value(&merge_restore_job(&prior, &job))
        }
    }
}

/// Run one handler step and return the progress event as JSON.
///
/// A model that does not deserialize, or an action the resource does not
/// support, yields a failed event rather than an error.
pub async fn invoke(
    kind: ResourceKind,
    action: Action,
    client: &AtlasClient,
    model: &Value,
    context: Option<&CallbackContext>,
) -> Result<Value> {
    let def = kind.definition();
    tracing::info!(
        "invoke: type={}, action={}, id=[{}]",
        def.type_name,
        action,
        def.identifier_of(model)
    );

    if !def.supports(action) {
        let code = if action == Action::Update {
            HandlerErrorCode::NotUpdatable
        } else {
            HandlerErrorCode::InvalidRequest
        };
        let event: ProgressEvent<Value> =
            ProgressEvent::failed(code, format!("{} does not support {}", def.type_name, action));
        return to_value(&event);
    }

    match kind {
        ResourceKind::Cluster => {
            let model: ClusterModel = match parse(model, "cluster model") {
                Ok(m) => m,
                Err(err) => return invalid_model::<ClusterModel>(&err),
            };
            let event = match action {
                Action::Create => cluster::handler::create(client, &model, context).await,
                Action::Read => cluster::handler::read(client, &model).await,
                Action::Update => cluster::handler::update(client, &model, context).await,
                Action::Delete => cluster::handler::delete(client, &model, context).await,
                Action::List => cluster::handler::list(client, &model).await,
            };
            to_value(&event)
        }
        ResourceKind::SearchIndex => {
            let model: SearchIndexModel = match parse(model, "search index model") {
                Ok(m) => m,
                Err(err) => return invalid_model::<SearchIndexModel>(&err),
            };
            let event = match action {
                Action::Create => search_index::handler::create(client, &model, context).await,
                Action::Read => search_index::handler::read(client, &model).await,
                Action::Update => search_index::handler::update(client, &model, context).await,
                Action::Delete => search_index::handler::delete(client, &model).await,
                Action::List => search_index::handler::list(client, &model).await,
            };
            to_value(&event)
        }
        ResourceKind::RestoreJob => {
            let model: RestoreJobModel = match parse(model, "restore job model") {
                Ok(m) => m,
                Err(err) => return invalid_model::<RestoreJobModel>(&err),
            };
            let event = match action {
                Action::Create => restore_job::handler::create(client, &model, context).await,
                Action::Read => restore_job::handler::read(client, &model).await,
                Action::Delete => restore_job::handler::delete(client, &model).await,
                Action::List => restore_job::handler::list(client, &model).await,
                Action::Update => ProgressEvent::failed(
                    HandlerErrorCode::NotUpdatable,
                    "Restore jobs cannot be updated",
                ),
            };
            to_value(&event)
        }
    }
}

fn invalid_model<M: Serialize>(err: &anyhow::Error) -> Result<Value> {
    let event: ProgressEvent<M> =
        ProgressEvent::failed(HandlerErrorCode::InvalidRequest, format!("{:#}", err));
    to_value(&event)
}
