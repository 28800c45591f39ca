//! Atlas API errors
//!
//! The transport wraps non-2xx responses in [`AtlasApiError`] so handlers can
//! recover the HTTP status from an `anyhow::Error` with `downcast_ref`.

use serde::Deserialize;

/// A failed Atlas Admin API call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Atlas API request failed: {status} {}", .error_code.as_deref().unwrap_or("UNKNOWN"))]
pub struct AtlasApiError {
    pub status: u16,
    /// Atlas error code, e.g. `CLUSTER_NOT_FOUND`
    pub error_code: Option<String>,
    pub detail: Option<String>,
}

/// Error body returned by the Atlas Admin API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

impl AtlasApiError {
    /// Build an error from a response status and its (possibly non-JSON) body
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => Self {
                status,
                error_code: parsed.error_code,
                detail: parsed.detail.or(parsed.reason),
            },
            Err(_) => Self {
                status,
                error_code: None,
                detail: None,
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// Find the Atlas API error inside an error chain, if any
pub fn api_error(error: &anyhow::Error) -> Option<&AtlasApiError> {
    error.chain().find_map(|e| e.downcast_ref::<AtlasApiError>())
}

/// Format an Atlas API error for display
/// Security: avoids echoing raw response bodies back to the user
pub fn format_atlas_error(error: &anyhow::Error) -> String {
    if let Some(api) = api_error(error) {
        let summary = match api.status {
            400 => "Invalid request. Check the resource properties.",
            401 => "Authentication failed. Check the Atlas credentials of the profile.",
            403 => "Permission denied. Check the Atlas project and API key roles.",
            404 => "Resource not found.",
            409 => "Resource conflict. The resource may already exist.",
            429 => "Rate limit exceeded. Please try again later.",
            500..=599 => "Atlas service temporarily unavailable. Please try again.",
            _ => "Atlas request failed.",
        };
        return match &api.detail {
            Some(detail) => format!("{} {}", summary, truncate(detail, 200)),
            None => summary.to_string(),
        };
    }

    truncate(&error.to_string(), 120)
}

fn truncate(text: &str, max: usize) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .collect();
    if cleaned.chars().count() > max {
        format!("{}...", cleaned.chars().take(max).collect::<String>())
    } else {
        cleaned
    }
}
