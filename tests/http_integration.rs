//! Integration tests for the Atlas client and resource handlers using wiremock
//!
//! These tests drive the handlers against mocked Atlas endpoints, checking
//! the requests that go out and the progress events that come back.

use atlas_cfn::atlas::client::AtlasClient;
use atlas_cfn::config::ProfileConfig;
use atlas_cfn::resource::cluster::model::{ClusterModel, Label, ProcessArgs};
use atlas_cfn::resource::progress::{CallbackContext, HandlerErrorCode, OperationStatus};
use atlas_cfn::resource::restore_job::model::SynchronousCreationOptions;
use atlas_cfn::resource::restore_job::RestoreJobModel;
use atlas_cfn::resource::search_index::model::{Mappings, SearchIndexModel};
use atlas_cfn::resource::{cluster, dispatch, restore_job, search_index, Action, ResourceKind};
use serde_json::json;
use wiremock::matchers::{basic_auth, bearer_token, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CLUSTER_PATH: &str = "/api/atlas/v2/groups/p1/clusters/c0";

fn client_for(server: &MockServer) -> AtlasClient {
    let profile = ProfileConfig {
        base_url: Some(server.uri()),
        access_token: Some("test-token".to_string()),
        ..Default::default()
    };
    AtlasClient::new(&profile).expect("client should build")
}

fn cluster_model() -> ClusterModel {
    ClusterModel {
        project_id: Some("p1".to_string()),
        name: Some("c0".to_string()),
        ..Default::default()
    }
}

fn cluster_response(state: &str) -> serde_json::Value {
    json!({
        "id": "cl-1",
        "groupId": "p1",
        "name": "c0",
        "stateName": state,
        "clusterType": "REPLICASET",
        "mongoDBVersion": "7.0.2",
        "createDate": "2024-03-01T12:00:00Z",
        "labels": [
            {"key": "Infrastructure Tool", "value": "MongoDB Atlas CloudFormation Provider"}
        ],
        "connectionStrings": {"standardSrv": "mongodb+srv://c0.example.net"}
    })
}

/// Test module for the raw client
mod atlas_client_tests {
    use super::*;

    /// Requests carry the bearer token and the versioned media type
    #[tokio::test]
    async fn test_get_cluster_sends_token_and_media_type() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(CLUSTER_PATH))
            .and(bearer_token("test-token"))
            .and(header("accept", "application/vnd.atlas.2023-10-01+json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(cluster_response("IDLE")))
            .expect(1)
            .mount(&server)
            .await;

        let cluster = client_for(&server)
            .get_cluster("p1", "c0")
            .await
            .expect("Request should succeed");

        assert_eq!(cluster.state_name.as_deref(), Some("IDLE"));
        assert_eq!(cluster.mongodb_version.as_deref(), Some("7.0.2"));
    }

    /// Paginated listing follows pages until totalCount is reached
    #[tokio::test]
    async fn test_list_clusters_follows_pages() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/atlas/v2/groups/p1/clusters"))
            .and(query_param("pageNum", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"name": "c0"}],
                "totalCount": 2
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/atlas/v2/groups/p1/clusters"))
            .and(query_param("pageNum", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"name": "c1"}],
                "totalCount": 2
            })))
            .mount(&server)
            .await;

        let clusters = client_for(&server)
            .list_clusters("p1")
            .await
            .expect("Request should succeed");

        let names: Vec<_> = clusters.iter().filter_map(|c| c.name.as_deref()).collect();
        assert_eq!(names, vec!["c0", "c1"]);
    }

    /// Service account credentials are exchanged once and cached
    #[tokio::test]
    async fn test_client_credentials_token_is_cached() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/oauth/token"))
            .and(basic_auth("sa-id", "sa-secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "sa-token",
                "expires_in": 3600,
                "token_type": "Bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(CLUSTER_PATH))
            .and(bearer_token("sa-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(cluster_response("IDLE")))
            .expect(2)
            .mount(&server)
            .await;

        let profile = ProfileConfig {
            base_url: Some(server.uri()),
            client_id: Some("sa-id".to_string()),
            client_secret: Some("sa-secret".to_string()),
            ..Default::default()
        };
        let client = AtlasClient::new(&profile).expect("client should build");

        client.get_cluster("p1", "c0").await.expect("first call");
        client.get_cluster("p1", "c0").await.expect("second call");
    }
}

/// Test module for the cluster handlers
mod cluster_handler_tests {
    use super::*;

    /// Create sends the provider label and reports progress
    #[tokio::test]
    async fn test_create_returns_in_progress() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/atlas/v2/groups/p1/clusters"))
            .and(body_partial_json(json!({
                "name": "c0",
                "labels": [
                    {"key": "Infrastructure Tool", "value": "MongoDB Atlas CloudFormation Provider"}
                ]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(cluster_response("CREATING")))
            .expect(1)
            .mount(&server)
            .await;

        let event = cluster::handler::create(&client_for(&server), &cluster_model(), None).await;

        assert_eq!(event.operation_status, OperationStatus::InProgress);
        assert_eq!(event.callback_delay_seconds, Some(10));
        let context = event.callback_context.expect("context");
        assert_eq!(context.state_name.as_deref(), Some("CREATING"));

        let model = event.resource_model.expect("model");
        assert_eq!(model.id.as_deref(), Some("cl-1"));
        assert_eq!(model.state_name.as_deref(), Some("CREATING"));
        assert_eq!(model.created_date.as_deref(), Some("2024-03-01T12:00:00Z"));
        assert_eq!(model.labels, None);
        // Not declared by the caller, so not refreshed
        assert_eq!(model.cluster_type, None);
    }

    /// Declared labels come back without the provider label
    #[tokio::test]
    async fn test_create_strips_default_label_from_model() {
        let server = MockServer::start().await;

        let mut response = cluster_response("CREATING");
        response["labels"] = json!([
            {"key": "env", "value": "dev"},
            {"key": "Infrastructure Tool", "value": "MongoDB Atlas CloudFormation Provider"}
        ]);

        Mock::given(method("POST"))
            .and(path("/api/atlas/v2/groups/p1/clusters"))
            .respond_with(ResponseTemplate::new(201).set_body_json(response))
            .mount(&server)
            .await;

        let mut model = cluster_model();
        model.labels = Some(vec![Label::new("env", "dev")]);

        let event = cluster::handler::create(&client_for(&server), &model, None).await;
        let labels = event.resource_model.expect("model").labels.expect("labels");
        assert_eq!(labels, vec![Label::new("env", "dev")]);
    }

    /// A create poll on an idle cluster applies advanced settings and succeeds
    #[tokio::test]
    async fn test_create_poll_applies_settings_when_idle() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(CLUSTER_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(cluster_response("IDLE")))
            .mount(&server)
            .await;

        Mock::given(method("PATCH"))
            .and(path(format!("{}/processArgs", CLUSTER_PATH)))
            .and(body_partial_json(json!({"javascriptEnabled": false})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"javascriptEnabled": false})),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!("{}/processArgs", CLUSTER_PATH)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "javascriptEnabled": false,
                "noTableScan": false
            })))
            .mount(&server)
            .await;

        let mut model = cluster_model();
        model.advanced_settings = Some(ProcessArgs {
            javascript_enabled: Some(false),
            ..Default::default()
        });

        let context = CallbackContext::new("CREATING");
        let event = cluster::handler::create(&client_for(&server), &model, Some(&context)).await;

        assert_eq!(event.operation_status, OperationStatus::Success);
        let settings = event
            .resource_model
            .expect("model")
            .advanced_settings
            .expect("settings");
        assert_eq!(settings.javascript_enabled, Some(false));
        assert_eq!(settings.no_table_scan, Some(false));
    }

    /// Update keeps polling while the cluster is not idle
    #[tokio::test]
    async fn test_update_poll_waits_for_idle() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(CLUSTER_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(cluster_response("UPDATING")))
            .mount(&server)
            .await;

        let context = CallbackContext::new("UPDATING");
        let event =
            cluster::handler::update(&client_for(&server), &cluster_model(), Some(&context)).await;

        assert_eq!(event.operation_status, OperationStatus::InProgress);
        assert_eq!(
            event.callback_context.and_then(|c| c.state_name).as_deref(),
            Some("UPDATING")
        );
    }

    /// Delete is complete once the cluster is gone
    #[tokio::test]
    async fn test_delete_completes_on_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path(CLUSTER_PATH))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let event = cluster::handler::delete(&client, &cluster_model(), None).await;
        assert_eq!(event.operation_status, OperationStatus::InProgress);
        let context = event.callback_context.expect("context");

        Mock::given(method("GET"))
            .and(path(CLUSTER_PATH))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": 404,
                "errorCode": "CLUSTER_NOT_FOUND",
                "detail": "No cluster named c0 exists in group p1."
            })))
            .mount(&server)
            .await;

        let event = cluster::handler::delete(&client, &cluster_model(), Some(&context)).await;
        assert_eq!(event.operation_status, OperationStatus::Success);
        assert!(event.resource_model.is_none());
    }

    /// Atlas status codes map to handler error codes
    #[tokio::test]
    async fn test_read_error_codes() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(CLUSTER_PATH))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "errorCode": "CLUSTER_NOT_FOUND"
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/atlas/v2/groups/p2/clusters/c0"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let client = client_for(&server);

        let event = cluster::handler::read(&client, &cluster_model()).await;
        assert_eq!(event.operation_status, OperationStatus::Failed);
        assert_eq!(event.handler_error_code, Some(HandlerErrorCode::NotFound));
        assert!(event.message.starts_with("Resource not found"));

        let mut throttled = cluster_model();
        throttled.project_id = Some("p2".to_string());
        let event = cluster::handler::read(&client, &throttled).await;
        assert_eq!(event.handler_error_code, Some(HandlerErrorCode::Throttling));
    }

    /// Creating an existing cluster fails with AlreadyExists
    #[tokio::test]
    async fn test_create_conflict() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/atlas/v2/groups/p1/clusters"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "errorCode": "DUPLICATE_CLUSTER_NAME"
            })))
            .mount(&server)
            .await;

        let event = cluster::handler::create(&client_for(&server), &cluster_model(), None).await;
        assert_eq!(event.handler_error_code, Some(HandlerErrorCode::AlreadyExists));
    }

    /// Listing tolerates a cluster whose advanced settings cannot be read
    #[tokio::test]
    async fn test_list_fetches_settings_per_cluster() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/atlas/v2/groups/p1/clusters"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [cluster_response("IDLE"), {"groupId": "p1", "name": "c1"}],
                "totalCount": 2
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!("{}/processArgs", CLUSTER_PATH)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"noTableScan": true})))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/atlas/v2/groups/p1/clusters/c1/processArgs"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let event = cluster::handler::list(&client_for(&server), &cluster_model()).await;
        assert_eq!(event.operation_status, OperationStatus::Success);

        let models = event.resource_models.expect("models");
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].name.as_deref(), Some("c0"));
        assert_eq!(
            models[0].advanced_settings.as_ref().and_then(|s| s.no_table_scan),
            Some(true)
        );
        assert_eq!(models[0].labels, Some(vec![]));
        assert_eq!(models[1].advanced_settings, None);
    }
}

/// Test module for the search index handlers
mod search_index_handler_tests {
    use super::*;

    const INDEXES_PATH: &str = "/api/atlas/v2/groups/p1/clusters/c0/fts/indexes";

    fn index_model() -> SearchIndexModel {
        SearchIndexModel {
            group_id: Some("p1".to_string()),
            cluster_name: Some("c0".to_string()),
            database: Some("sample".to_string()),
            collection_name: Some("movies".to_string()),
            name: Some("default".to_string()),
            mappings: Some(Mappings {
                dynamic: Some(true),
                fields: None,
            }),
            ..Default::default()
        }
    }

    /// Create reports progress until the index is steady
    #[tokio::test]
    async fn test_create_then_poll_to_steady() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(INDEXES_PATH))
            .and(header("accept", "application/vnd.atlas.2023-01-01+json"))
            .and(body_partial_json(json!({"name": "default", "mappings": {"dynamic": true}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "indexID": "idx-1",
                "name": "default",
                "status": "IN_PROGRESS"
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!("{}/idx-1", INDEXES_PATH)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "indexID": "idx-1",
                "name": "default",
                "status": "STEADY"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let event = search_index::handler::create(&client, &index_model(), None).await;
        assert_eq!(event.operation_status, OperationStatus::InProgress);

        let model = event.resource_model.expect("model");
        assert_eq!(model.index_id.as_deref(), Some("idx-1"));

        let context = event.callback_context.expect("context");
        let event = search_index::handler::create(&client, &model, Some(&context)).await;
        assert_eq!(event.operation_status, OperationStatus::Success);
        assert_eq!(
            event.resource_model.and_then(|m| m.status).as_deref(),
            Some("STEADY")
        );
    }

    /// Malformed field mappings are rejected before any request
    #[tokio::test]
    async fn test_create_rejects_invalid_fields() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(INDEXES_PATH))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut model = index_model();
        model.mappings = Some(Mappings {
            dynamic: Some(false),
            fields: Some("{\"title\": ".to_string()),
        });

        let event = search_index::handler::create(&client_for(&server), &model, None).await;
        assert_eq!(event.operation_status, OperationStatus::Failed);
        assert_eq!(event.handler_error_code, Some(HandlerErrorCode::InvalidRequest));
    }

    /// Listing is scoped to one collection
    #[tokio::test]
    async fn test_list_by_collection() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("{}/sample/movies", INDEXES_PATH)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"indexID": "idx-1", "name": "default", "status": "STEADY"},
                {"indexID": "idx-2", "name": "titles", "status": "IN_PROGRESS"}
            ])))
            .mount(&server)
            .await;

        let event = search_index::handler::list(&client_for(&server), &index_model()).await;
        let models = event.resource_models.expect("models");
        assert_eq!(models.len(), 2);
        assert_eq!(models[1].index_id.as_deref(), Some("idx-2"));
        assert_eq!(models[1].group_id.as_deref(), Some("p1"));
        assert_eq!(models[1].cluster_name.as_deref(), Some("c0"));
    }
}

/// Test module for the restore job handlers
mod restore_job_handler_tests {
    use super::*;

    const JOBS_PATH: &str = "/api/atlas/v2/groups/p1/clusters/c0/backup/restoreJobs";

    fn job_model() -> RestoreJobModel {
        RestoreJobModel {
            project_id: Some("p1".to_string()),
            instance_type: Some("cluster".to_string()),
            instance_name: Some("c0".to_string()),
            delivery_type: Some("automated".to_string()),
            snapshot_id: Some("snap-1".to_string()),
            target_project_id: Some("p1".to_string()),
            target_cluster_name: Some("c1".to_string()),
            ..Default::default()
        }
    }

    /// Asynchronous create succeeds as soon as the job is accepted
    #[tokio::test]
    async fn test_create_without_waiting() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(JOBS_PATH))
            .and(body_partial_json(json!({
                "deliveryType": "automated",
                "snapshotId": "snap-1",
                "targetGroupId": "p1",
                "targetClusterName": "c1"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "job-1",
                "deliveryType": "automated",
                "cancelled": false,
                "expired": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let event = restore_job::handler::create(&client_for(&server), &job_model(), None).await;
        assert_eq!(event.operation_status, OperationStatus::Success);

        let model = event.resource_model.expect("model");
        assert_eq!(model.id.as_deref(), Some("job-1"));
        assert!(model.created_at.is_some());
    }

    /// Synchronous create polls until the job finishes
    #[tokio::test]
    async fn test_synchronous_create_polls() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(JOBS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "job-1"})))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!("{}/job-1", JOBS_PATH)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "job-1",
                "finishedAt": "2024-03-01T13:00:00Z"
            })))
            .mount(&server)
            .await;

        let mut model = job_model();
        model.enable_synchronous_creation = Some(true);

        let client = client_for(&server);
        let event = restore_job::handler::create(&client, &model, None).await;
        assert_eq!(event.operation_status, OperationStatus::InProgress);
        assert_eq!(event.callback_delay_seconds, Some(30));

        let context = event.callback_context.expect("context");
        let model = event.resource_model.expect("model");
        let event = restore_job::handler::create(&client, &model, Some(&context)).await;
        assert_eq!(event.operation_status, OperationStatus::Success);
        assert_eq!(
            event.resource_model.and_then(|m| m.finished_at).as_deref(),
            Some("2024-03-01T13:00:00Z")
        );
    }

    fn synchronous_model(return_success: Option<bool>) -> RestoreJobModel {
        let mut model = job_model();
        model.id = Some("job-1".to_string());
        model.enable_synchronous_creation = Some(true);
        model.synchronous_creation_options = Some(SynchronousCreationOptions {
            time_out_in_seconds: Some(600),
            callback_delay_seconds: Some(15),
            return_success_if_time_out: return_success,
        });
        model
    }

    async fn mount_running_job(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path(format!("{}/job-1", JOBS_PATH)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "job-1",
                "cancelled": false,
                "expired": false
            })))
            .mount(server)
            .await;
    }

    fn context_started(seconds_ago: i64) -> CallbackContext {
        CallbackContext {
            state_name: Some("RESTORING".to_string()),
            started_at: Some(chrono::Utc::now().timestamp() - seconds_ago),
        }
    }

    /// A running job inside the timeout keeps polling with the original start
    #[tokio::test]
    async fn test_synchronous_create_within_timeout_keeps_polling() {
        let server = MockServer::start().await;
        mount_running_job(&server).await;

        let context = context_started(60);
        let event = restore_job::handler::create(
            &client_for(&server),
            &synchronous_model(None),
            Some(&context),
        )
        .await;

        assert_eq!(event.operation_status, OperationStatus::InProgress);
        assert_eq!(event.callback_delay_seconds, Some(15));
        assert_eq!(
            event.callback_context.and_then(|c| c.started_at),
            context.started_at
        );
    }

    /// Timing out fails the create unless success on timeout was requested
    #[tokio::test]
    async fn test_synchronous_create_timeout_fails() {
        let server = MockServer::start().await;
        mount_running_job(&server).await;

        let event = restore_job::handler::create(
            &client_for(&server),
            &synchronous_model(None),
            Some(&context_started(2000)),
        )
        .await;

        assert_eq!(event.operation_status, OperationStatus::Failed);
        assert_eq!(
            event.handler_error_code,
            Some(HandlerErrorCode::GeneralServiceException)
        );
    }

    #[tokio::test]
    async fn test_synchronous_create_timeout_can_succeed() {
        let server = MockServer::start().await;
        mount_running_job(&server).await;

        let event = restore_job::handler::create(
            &client_for(&server),
            &synchronous_model(Some(true)),
            Some(&context_started(2000)),
        )
        .await;

        assert_eq!(event.operation_status, OperationStatus::Success);
        assert_eq!(
            event.resource_model.and_then(|m| m.id).as_deref(),
            Some("job-1")
        );
    }

    /// Delete cancels a running cluster restore
    #[tokio::test]
    async fn test_delete_cancels_running_job() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("{}/job-1", JOBS_PATH)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "job-1"})))
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path(format!("{}/job-1", JOBS_PATH)))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let mut model = job_model();
        model.id = Some("job-1".to_string());

        let event = restore_job::handler::delete(&client_for(&server), &model).await;
        assert_eq!(event.operation_status, OperationStatus::Success);
    }

    /// Serverless restores are never cancelled
    #[tokio::test]
    async fn test_delete_serverless_sends_no_cancel() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/atlas/v2/groups/p1/serverless/s0/backup/restoreJobs/job-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "job-1"})))
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let model = RestoreJobModel {
            project_id: Some("p1".to_string()),
            instance_type: Some("serverless".to_string()),
            instance_name: Some("s0".to_string()),
            id: Some("job-1".to_string()),
            ..Default::default()
        };

        let event = restore_job::handler::delete(&client_for(&server), &model).await;
        assert_eq!(event.operation_status, OperationStatus::Success);
    }
}

/// Test module for the untyped dispatch entry point
mod dispatch_tests {
    use super::*;

    #[tokio::test]
    async fn test_invoke_read_returns_event_json() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(CLUSTER_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(cluster_response("IDLE")))
            .mount(&server)
            .await;

        let event = dispatch::invoke(
            ResourceKind::Cluster,
            Action::Read,
            &client_for(&server),
            &json!({"ProjectId": "p1", "Name": "c0", "Profile": "default"}),
            None,
        )
        .await
        .expect("invoke should succeed");

        assert_eq!(event["operationStatus"], "SUCCESS");
        assert_eq!(event["resourceModel"]["StateName"], "IDLE");
        assert_eq!(event["resourceModel"]["Profile"], "default");
        assert_eq!(
            event["resourceModel"]["ConnectionStrings"]["StandardSrv"],
            "mongodb+srv://c0.example.net"
        );
    }
}
