//! Cluster resource handlers
//!
//! Each handler runs one step of the provider contract and reports the
//! outcome as a [`ProgressEvent`]. Long-running steps return `InProgress`
//! with a callback context; the host invokes the same handler again with it.

use super::mappings::{
    cluster_to_model, expand_advanced_settings, flatten_process_args, merge_cluster,
    set_cluster_request, with_default_label, without_default_label,
};
use super::model::ClusterModel;
use crate::atlas::client::AtlasClient;
use crate::atlas::cluster::AdvancedClusterDescription;
use crate::atlas::error::api_error;
use crate::resource::progress::{CallbackContext, HandlerErrorCode, ProgressEvent};
use futures::future::join_all;

/// Seconds the host should wait before polling a changing cluster
pub const CALLBACK_DELAY_SECONDS: u32 = 10;

/// Atlas state of a cluster that is ready
const STATE_IDLE: &str = "IDLE";
const STATE_DELETING: &str = "DELETING";

type Event = ProgressEvent<ClusterModel>;

/// Project id and name are needed to address a cluster
fn identity(model: &ClusterModel) -> Result<(String, String), Event> {
    match (&model.project_id, &model.name) {
        (Some(project), Some(name)) if !project.is_empty() && !name.is_empty() => {
            Ok((project.clone(), name.clone()))
        }
        _ => Err(Event::failed(
            HandlerErrorCode::InvalidRequest,
            "ProjectId and Name are required",
        )),
    }
}

/// Cluster request carrying the provider label next to the declared ones
fn labelled_request(current: &ClusterModel) -> AdvancedClusterDescription {
    let mut model = current.clone();
    model.labels = Some(with_default_label(model.labels.take().unwrap_or_default()));
    let (request, _) = set_cluster_request(&model);
    request
}

pub async fn create(
    client: &AtlasClient,
    current: &ClusterModel,
    context: Option<&CallbackContext>,
) -> Event {
    let (project_id, name) = match identity(current) {
        Ok(id) => id,
        Err(event) => return event,
    };

    if context.is_some() {
        return wait_for_idle(client, current, &project_id, &name, "Create", true).await;
    }

    tracing::info!("Creating cluster {} in project {}", name, project_id);

    let request = labelled_request(current);

    match client.create_cluster(&project_id, &request).await {
        Ok(cluster) => {
            let merged = merged_model(current, &cluster);
            let state = cluster.state_name.as_deref().unwrap_or("CREATING");
            Event::in_progress(
                merged,
                CALLBACK_DELAY_SECONDS,
                CallbackContext::new(state),
                "Create cluster in progress",
            )
        }
        Err(err) => Event::from_error(&err),
    }
}

pub async fn read(client: &AtlasClient, current: &ClusterModel) -> Event {
    let (project_id, name) = match identity(current) {
        Ok(id) => id,
        Err(event) => return event,
    };

    match read_model(client, current, &project_id, &name).await {
        Ok(model) => Event::success(model, "Read complete"),
        Err(err) => Event::from_error(&err),
    }
}

pub async fn update(
    client: &AtlasClient,
    current: &ClusterModel,
    context: Option<&CallbackContext>,
) -> Event {
    let (project_id, name) = match identity(current) {
        Ok(id) => id,
        Err(event) => return event,
    };

    if context.is_some() {
        return wait_for_idle(client, current, &project_id, &name, "Update", false).await;
    }

    tracing::info!("Updating cluster {} in project {}", name, project_id);

    let request = labelled_request(current);
    let cluster = match client.update_cluster(&project_id, &name, &request).await {
        Ok(cluster) => cluster,
        Err(err) => return Event::from_error(&err),
    };

    let mut merged = merged_model(current, &cluster);
    if let Some(settings) = &current.advanced_settings {
        match client
            .update_process_args(&project_id, &name, &expand_advanced_settings(settings))
            .await
        {
            Ok(args) => merged.advanced_settings = flatten_process_args(Some(&args)),
            Err(err) => return Event::from_error(&err),
        }
    }

    let state = cluster.state_name.as_deref().unwrap_or("UPDATING");
    Event::in_progress(
        merged,
        CALLBACK_DELAY_SECONDS,
        CallbackContext::new(state),
        "Update cluster in progress",
    )
}

pub async fn delete(
    client: &AtlasClient,
    current: &ClusterModel,
    context: Option<&CallbackContext>,
) -> Event {
    let (project_id, name) = match identity(current) {
        Ok(id) => id,
        Err(event) => return event,
    };

    if context.is_none() {
        tracing::info!("Deleting cluster {} in project {}", name, project_id);
        if let Err(err) = client.delete_cluster(&project_id, &name).await {
            return Event::from_error(&err);
        }
        return Event::in_progress(
            current.clone(),
            CALLBACK_DELAY_SECONDS,
            CallbackContext::new(STATE_DELETING),
            "Delete cluster in progress",
        );
    }

    match client.get_cluster(&project_id, &name).await {
        Ok(cluster) => {
            let merged = merged_model(current, &cluster);
            Event::in_progress(
                merged,
                CALLBACK_DELAY_SECONDS,
                CallbackContext {
                    state_name: cluster.state_name.clone(),
                    ..context.cloned().unwrap_or_default()
                },
                "Delete cluster in progress",
            )
        }
        Err(err) if api_error(&err).is_some_and(|e| e.is_not_found()) => {
            Event::completed("Delete complete")
        }
        Err(err) => Event::from_error(&err),
    }
}

/// List every cluster of the project, advanced settings included
pub async fn list(client: &AtlasClient, current: &ClusterModel) -> Event {
    let Some(project_id) = current.project_id.clone().filter(|p| !p.is_empty()) else {
        return Event::failed(HandlerErrorCode::InvalidRequest, "ProjectId is required");
    };

    let clusters = match client.list_clusters(&project_id).await {
        Ok(clusters) => clusters,
        Err(err) => return Event::from_error(&err),
    };

    let settings = join_all(clusters.iter().map(|cluster| {
        let name = cluster.name.clone().unwrap_or_default();
        let project_id = project_id.clone();
        async move {
            match client.get_process_args(&project_id, &name).await {
                Ok(args) => Some(args),
                Err(err) => {
                    tracing::warn!("Skipping advanced settings of {}: {:#}", name, err);
                    None
                }
            }
        }
    }))
    .await;

    let models = clusters
        .iter()
        .zip(settings)
        .map(|(cluster, args)| {
            let mut model = cluster_to_model(cluster);
            model.profile = current.profile.clone();
            model.advanced_settings = flatten_process_args(args.as_ref());
            model.labels = model.labels.map(without_default_label);
            model
        })
        .collect();

    Event::success_list(models)
}

/// Merge a response and hide the provider label from the model
fn merged_model(current: &ClusterModel, cluster: &AdvancedClusterDescription) -> ClusterModel {
    let mut model = merge_cluster(current, Some(cluster));
    model.labels = model.labels.map(without_default_label);
    model
}

/// Read the cluster and merge it, including advanced settings when tracked
async fn read_model(
    client: &AtlasClient,
    current: &ClusterModel,
    project_id: &str,
    name: &str,
) -> anyhow::Result<ClusterModel> {
    let cluster = client.get_cluster(project_id, name).await?;
    let mut model = merged_model(current, &cluster);

    if current.advanced_settings.is_some() {
        let args = client.get_process_args(project_id, name).await?;
        model.advanced_settings = flatten_process_args(Some(&args));
    }

    Ok(model)
}

/// Poll step shared by create and update. Advanced settings can only be
/// applied once a new cluster is idle.
async fn wait_for_idle(
    client: &AtlasClient,
    current: &ClusterModel,
    project_id: &str,
    name: &str,
    operation: &str,
    apply_settings: bool,
) -> Event {
    let cluster = match client.get_cluster(project_id, name).await {
        Ok(cluster) => cluster,
        Err(err) => return Event::from_error(&err),
    };

    let state = cluster.state_name.clone().unwrap_or_default();
    tracing::debug!("{} cluster {}: state {}", operation, name, state);

    if state != STATE_IDLE {
        return Event::in_progress(
            merged_model(current, &cluster),
            CALLBACK_DELAY_SECONDS,
            CallbackContext {
                state_name: Some(state),
                started_at: None,
            },
            &format!("{} cluster in progress", operation),
        );
    }

    if let Some(settings) = current.advanced_settings.as_ref().filter(|_| apply_settings) {
        if let Err(err) = client
            .update_process_args(project_id, name, &expand_advanced_settings(settings))
            .await
        {
            return Event::from_error(&err);
        }
    }

    match read_model(client, current, project_id, name).await {
        Ok(model) => Event::success(model, &format!("{} complete", operation)),
        Err(err) => Event::from_error(&err),
    }
}
