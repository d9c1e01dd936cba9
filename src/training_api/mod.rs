//! Client for the training backend's configuration and start endpoints.

mod http;

pub use http::HttpTrainingApi;

use serde::Deserialize;

use crate::training::{RunMetrics, TrainingConfiguration};

/// Path of the configuration endpoint, relative to the API base URL.
pub const CONFIG_PATH: &str = "train/config";
/// Path of the run start endpoint, relative to the API base URL.
pub const START_PATH: &str = "train/start";

/// Message shown when the backend cannot be reached at all.
pub const UNREACHABLE_MESSAGE: &str = "Cannot complete request: training server unreachable";

/// Remote operations the console controller depends on.
///
/// Implementations block; the controller calls them from worker threads.
pub trait TrainingApi: Send + Sync {
    /// `GET /train/config`.
    fn fetch_config(&self) -> Result<TrainingConfiguration, ApiError>;
    /// `POST /train/config`.
    fn update_config(&self, config: &TrainingConfiguration) -> Result<(), ApiError>;
    /// `POST /train/start`.
    fn start_training(&self) -> Result<StartAccepted, ApiError>;
}

/// Backend acknowledgement of a start request.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct StartAccepted {
    /// Result figures, when the backend reports them with the acknowledgement.
    #[serde(default)]
    pub metrics: Option<RunMetrics>,
}

/// Failure of a remote call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// No response: connection refused, DNS failure, timeout.
    #[error("HTTP error: {0}")]
    Transport(String),
    /// The backend answered with a non-success status.
    #[error("Rejected with HTTP {status}{}", detail_suffix(.detail))]
    Rejected { status: u16, detail: Option<String> },
    /// A success response whose body could not be used.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Text for the status message, using the backend's reason when it sent one.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Transport(_) => UNREACHABLE_MESSAGE.to_string(),
            Self::Rejected {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Self::Rejected { detail: None, .. } | Self::InvalidResponse(_) => fallback.to_string(),
        }
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|detail| format!(": {detail}"))
        .unwrap_or_default()
}

/// Extract a human readable reason from an error body.
///
/// Accepts `{"detail": "..."}` and the list form
/// `{"detail": [{"msg": "..."}, ...]}` produced by request validation.
pub(crate) fn parse_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body.trim()).ok()?;
    let detail = value.get("detail")?;
    let text = match detail {
        serde_json::Value::String(text) => text.trim().to_string(),
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(|msg| msg.as_str()))
            .collect::<Vec<_>>()
            .join("; "),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}
