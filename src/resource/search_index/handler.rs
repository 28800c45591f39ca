//! Search index resource handlers

use super::mappings::{expand_search_index, merge_search_index};
use super::model::SearchIndexModel;
use crate::atlas::client::AtlasClient;
use crate::resource::progress::{CallbackContext, HandlerErrorCode, ProgressEvent};
use crate::resource::util::present_string;

pub const CALLBACK_DELAY_SECONDS: u32 = 20;

const STATUS_STEADY: &str = "STEADY";
const STATUS_FAILED: &str = "FAILED";

type Event = ProgressEvent<SearchIndexModel>;

fn cluster_identity(model: &SearchIndexModel) -> Result<(String, String), Event> {
    match (present_string(&model.group_id), present_string(&model.cluster_name)) {
        (Some(group), Some(cluster)) => Ok((group, cluster)),
        _ => Err(Event::failed(
            HandlerErrorCode::InvalidRequest,
            "GroupId and ClusterName are required",
        )),
    }
}

fn index_identity(model: &SearchIndexModel) -> Result<(String, String, String), Event> {
    let (group, cluster) = cluster_identity(model)?;
    match present_string(&model.index_id) {
        Some(index_id) => Ok((group, cluster, index_id)),
        None => Err(Event::failed(HandlerErrorCode::InvalidRequest, "IndexId is required")),
    }
}

/// Unwrap an identity or return its failed event
macro_rules! try_event {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(event) => return event,
        }
    };
}

pub async fn create(
    client: &AtlasClient,
    current: &SearchIndexModel,
    context: Option<&CallbackContext>,
) -> Event {
    if context.is_some() {
        return wait_for_steady(client, current, "Create").await;
    }

    let (group_id, cluster) = try_event!(cluster_identity(current));
    let request = match expand_search_index(current) {
        Ok(request) => request,
        Err(err) => return Event::failed(HandlerErrorCode::InvalidRequest, format!("{:#}", err)),
    };

    tracing::info!("Creating search index on cluster {} in project {}", cluster, group_id);

    match client.create_search_index(&group_id, &cluster, &request).await {
        Ok(index) => progress_or_done(merge_search_index(current, &index), "Create"),
        Err(err) => Event::from_error(&err),
    }
}

pub async fn read(client: &AtlasClient, current: &SearchIndexModel) -> Event {
    let (group_id, cluster, index_id) = try_event!(index_identity(current));

    match client.get_search_index(&group_id, &cluster, &index_id).await {
        Ok(index) => Event::success(merge_search_index(current, &index), "Read complete"),
        Err(err) => Event::from_error(&err),
    }
}

pub async fn update(
    client: &AtlasClient,
    current: &SearchIndexModel,
    context: Option<&CallbackContext>,
) -> Event {
    if context.is_some() {
        return wait_for_steady(client, current, "Update").await;
    }

    let (group_id, cluster, index_id) = try_event!(index_identity(current));
    let request = match expand_search_index(current) {
        Ok(request) => request,
        Err(err) => return Event::failed(HandlerErrorCode::InvalidRequest, format!("{:#}", err)),
    };

    tracing::info!("Updating search index {} on cluster {}", index_id, cluster);

    match client
        .update_search_index(&group_id, &cluster, &index_id, &request)
        .await
    {
        Ok(index) => progress_or_done(merge_search_index(current, &index), "Update"),
        Err(err) => Event::from_error(&err),
    }
}

pub async fn delete(client: &AtlasClient, current: &SearchIndexModel) -> Event {
    let (group_id, cluster, index_id) = try_event!(index_identity(current));

    tracing::info!("Deleting search index {} on cluster {}", index_id, cluster);

    match client.delete_search_index(&group_id, &cluster, &index_id).await {
        Ok(()) => Event::completed("Delete complete"),
        Err(err) => Event::from_error(&err),
    }
}

/// Indexes of one collection
pub async fn list(client: &AtlasClient, current: &SearchIndexModel) -> Event {
    let (group_id, cluster) = try_event!(cluster_identity(current));
    let (Some(database), Some(collection)) = (
        present_string(&current.database),
        present_string(&current.collection_name),
    ) else {
        return Event::failed(
            HandlerErrorCode::InvalidRequest,
            "Database and CollectionName are required",
        );
    };

    match client
        .list_search_indexes(&group_id, &cluster, &database, &collection)
        .await
    {
        Ok(indexes) => {
            let base = SearchIndexModel {
                group_id: Some(group_id),
                cluster_name: Some(cluster),
                profile: current.profile.clone(),
                ..Default::default()
            };
            let models = indexes
                .iter()
                .map(|index| merge_search_index(&base, index))
                .collect();
            Event::success_list(models)
        }
        Err(err) => Event::from_error(&err),
    }
}

/// Report the build state of an index that was just written
fn progress_or_done(model: SearchIndexModel, operation: &str) -> Event {
    match model.status.as_deref() {
        Some(STATUS_STEADY) => Event::success(model, &format!("{} complete", operation)),
        Some(STATUS_FAILED) => Event::failed(
            HandlerErrorCode::GeneralServiceException,
            format!("Search index build failed during {}", operation.to_lowercase()),
        ),
        status => {
            let context = CallbackContext::new(status.unwrap_or("IN_PROGRESS"));
            Event::in_progress(
                model,
                CALLBACK_DELAY_SECONDS,
                context,
                &format!("{} search index in progress", operation),
            )
        }
    }
}

async fn wait_for_steady(client: &AtlasClient, current: &SearchIndexModel, operation: &str) -> Event {
    let (group_id, cluster, index_id) = try_event!(index_identity(current));

    match client.get_search_index(&group_id, &cluster, &index_id).await {
        Ok(index) => {
            tracing::debug!(
                "{} search index {}: status {:?}",
                operation,
                index_id,
                index.status
            );
            progress_or_done(merge_search_index(current, &index), operation)
        }
        Err(err) => Event::from_error(&err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::progress::OperationStatus;

    #[test]
    fn test_index_identity() {
        let mut model = SearchIndexModel {
            group_id: Some("p1".to_string()),
            cluster_name: Some("c0".to_string()),
            ..Default::default()
        };
        assert!(cluster_identity(&model).is_ok());
        let err = index_identity(&model).unwrap_err();
        assert_eq!(err.message, "IndexId is required");

        model.index_id = Some("idx".to_string());
        assert_eq!(
            index_identity(&model).unwrap(),
            ("p1".to_string(), "c0".to_string(), "idx".to_string())
        );
    }

    #[test]
    fn test_progress_or_done() {
        let mut model = SearchIndexModel::default();
        assert_eq!(
            progress_or_done(model.clone(), "Create").operation_status,
            OperationStatus::InProgress
        );

        model.status = Some("STEADY".to_string());
        assert_eq!(
            progress_or_done(model.clone(), "Create").operation_status,
            OperationStatus::Success
        );

        model.status = Some("FAILED".to_string());
        let event = progress_or_done(model, "Update");
        assert_eq!(event.operation_status, OperationStatus::Failed);
        assert_eq!(
            event.handler_error_code,
            Some(HandlerErrorCode::GeneralServiceException)
        );
    }
}
