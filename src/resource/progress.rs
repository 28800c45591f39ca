//! Handler results in the CloudFormation provider vocabulary

use crate::atlas::error::{api_error, format_atlas_error};
use serde::{Deserialize, Serialize};

/// Status of a handler invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OperationStatus {
    /// Request built but nothing sent yet
    #[default]
    #[serde(rename = "")]
    NotEvaluated,
    #[serde(rename = "IN_PROGRESS")]
    InProgress,
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "FAILED")]
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandlerErrorCode {
    InvalidRequest,
    AccessDenied,
    NotFound,
    AlreadyExists,
    NotUpdatable,
    Throttling,
    ServiceInternalError,
    GeneralServiceException,
    InternalFailure,
}

impl HandlerErrorCode {
    /// Map an Atlas HTTP status to the closest handler error code
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::InvalidRequest,
            401 | 403 => Self::AccessDenied,
            404 => Self::NotFound,
            409 => Self::AlreadyExists,
            429 => Self::Throttling,
            _ => Self::ServiceInternalError,
        }
    }
}

/// State carried between invocations of a long-running handler
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_name: Option<String>,
    /// Unix seconds of the first invocation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<i64>,
}

impl CallbackContext {
    pub fn new(state_name: &str) -> Self {
        Self {
            state_name: Some(state_name.to_string()),
            started_at: Some(chrono::Utc::now().timestamp()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent<M> {
    pub operation_status: OperationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler_error_code: Option<HandlerErrorCode>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_delay_seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_context: Option<CallbackContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_model: Option<M>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_models: Option<Vec<M>>,
}

impl<M> Default for ProgressEvent<M> {
    fn default() -> Self {
        Self {
            operation_status: OperationStatus::NotEvaluated,
            handler_error_code: None,
            message: String::new(),
            callback_delay_seconds: None,
            callback_context: None,
            resource_model: None,
            resource_models: None,
        }
    }
}

impl<M> ProgressEvent<M> {
    pub fn success(model: M, message: &str) -> Self {
        Self {
            operation_status: OperationStatus::Success,
            message: message.to_string(),
            resource_model: Some(model),
            ..Default::default()
        }
    }

    /// Success without a model, e.g. after a delete
    pub fn completed(message: &str) -> Self {
        Self {
            operation_status: OperationStatus::Success,
            message: message.to_string(),
            ..Default::default()
        }
    }

    pub fn success_list(models: Vec<M>) -> Self {
        Self {
            operation_status: OperationStatus::Success,
            message: "List complete".to_string(),
            resource_models: Some(models),
            ..Default::default()
        }
    }

    pub fn in_progress(model: M, delay_seconds: u32, context: CallbackContext, message: &str) -> Self {
        Self {
            operation_status: OperationStatus::InProgress,
            message: message.to_string(),
            callback_delay_seconds: Some(delay_seconds),
            callback_context: Some(context),
            resource_model: Some(model),
            ..Default::default()
        }
    }

    pub fn failed(code: HandlerErrorCode, message: impl Into<String>) -> Self {
        Self {
            operation_status: OperationStatus::Failed,
            handler_error_code: Some(code),
            message: message.into(),
            ..Default::default()
        }
    }

    /// Turn a transport error into a failed event
    pub fn from_error(error: &anyhow::Error) -> Self {
        tracing::error!("Handler failed: {:#}", error);
        let code = api_error(error)
            .map(|e| HandlerErrorCode::from_status(e.status))
            .unwrap_or(HandlerErrorCode::InternalFailure);
        Self::failed(code, format_atlas_error(error))
    }

    pub fn is_not_evaluated(&self) -> bool {
        self.operation_status == OperationStatus::NotEvaluated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::error::AtlasApiError;
    use serde_json::json;

    #[test]
    fn test_default_event_is_not_evaluated() {
        let event: ProgressEvent<()> = ProgressEvent::default();
        assert!(event.is_not_evaluated());
        assert_eq!(serde_json::to_value(&event).unwrap(), json!({"operationStatus": ""}));
    }

    #[test]
    fn test_from_error_maps_status() {
        let err = anyhow::Error::new(AtlasApiError::from_response(404, "{}")).context("Failed to get cluster c0");
        let event: ProgressEvent<()> = ProgressEvent::from_error(&err);
        assert_eq!(event.operation_status, OperationStatus::Failed);
        assert_eq!(event.handler_error_code, Some(HandlerErrorCode::NotFound));
    }

    #[test]
    fn test_non_api_error_is_internal_failure() {
        let err = anyhow::anyhow!("Failed to send request");
        let event: ProgressEvent<()> = ProgressEvent::from_error(&err);
        assert_eq!(event.handler_error_code, Some(HandlerErrorCode::InternalFailure));
    }

    #[test]
    fn test_in_progress_serialization() {
        let event = ProgressEvent::in_progress(json!({"Name": "c0"}), 10, CallbackContext {
            state_name: Some("CREATING".to_string()),
            started_at: None,
        }, "Create cluster in progress");

        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "operationStatus": "IN_PROGRESS",
                "message": "Create cluster in progress",
                "callbackDelaySeconds": 10,
                "callbackContext": {"stateName": "CREATING"},
                "resourceModel": {"Name": "c0"}
            })
        );
    }
}
