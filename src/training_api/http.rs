use url::Url;

use super::{ApiError, CONFIG_PATH, START_PATH, StartAccepted, TrainingApi, parse_detail};
use crate::http_client::{self, Timeouts};
use crate::settings::{ConsoleSettings, SettingsError};
use crate::training::TrainingConfiguration;

const MAX_CONFIG_RESPONSE_BYTES: usize = 64 * 1024;
const MAX_ERROR_RESPONSE_BYTES: usize = 64 * 1024;
const MAX_START_RESPONSE_BYTES: usize = 256 * 1024;

/// [`TrainingApi`] over HTTP with JSON bodies.
pub struct HttpTrainingApi {
    agent: ureq::Agent,
    config_url: Url,
    start_url: Url,
}

impl HttpTrainingApi {
    /// Build a client rooted at `base` (which must end in `/`).
    pub fn new(base: &Url, timeouts: Timeouts) -> Result<Self, url::ParseError> {
        Ok(Self {
            agent: http_client::agent(timeouts),
            config_url: base.join(CONFIG_PATH)?,
            start_url: base.join(START_PATH)?,
        })
    }

    pub fn from_settings(settings: &ConsoleSettings) -> Result<Self, SettingsError> {
        let base = settings.api_base()?;
        Self::new(&base, settings.timeouts()).map_err(|err| SettingsError::InvalidUrl {
            url: settings.api_base_url.clone(),
            reason: err.to_string(),
        })
    }
}

impl TrainingApi for HttpTrainingApi {
    fn fetch_config(&self) -> Result<TrainingConfiguration, ApiError> {
        let response = map_call(
            self.agent
                .get(self.config_url.as_str())
                .set("Accept", "application/json")
                .call(),
        )?;
        let status = response.status();
        if status != 200 {
            return Err(ApiError::Rejected {
                status,
                detail: None,
            });
        }
        let body = http_client::read_response_text(response, MAX_CONFIG_RESPONSE_BYTES)
            .map_err(|err| ApiError::InvalidResponse(err.to_string()))?;
        serde_json::from_str(body.trim())
            .map_err(|err| ApiError::InvalidResponse(format!("{err}: {}", body.trim())))
    }

    fn update_config(&self, config: &TrainingConfiguration) -> Result<(), ApiError> {
        map_call(
            self.agent
                .post(self.config_url.as_str())
                .set("Accept", "application/json")
                .send_json(config),
        )?;
        Ok(())
    }

    fn start_training(&self) -> Result<StartAccepted, ApiError> {
        let response = map_call(
            self.agent
                .post(self.start_url.as_str())
                .set("Accept", "application/json")
                .call(),
        )?;
        // The acknowledgement body is optional; anything unparseable counts
        // as an acceptance without metrics.
        let body = http_client::read_response_text(response, MAX_START_RESPONSE_BYTES)
            .unwrap_or_default();
        Ok(parse_start_body(&body))
    }
}

fn map_call(result: Result<ureq::Response, ureq::Error>) -> Result<ureq::Response, ApiError> {
    match result {
        Ok(response) => Ok(response),
        Err(ureq::Error::Status(status, response)) => {
            let body = http_client::read_response_text(response, MAX_ERROR_RESPONSE_BYTES)
                .unwrap_or_default();
            Err(ApiError::Rejected {
                status,
                detail: parse_detail(&body),
            })
        }
        Err(ureq::Error::Transport(err)) => Err(ApiError::Transport(err.to_string())),
    }
}

fn parse_start_body(body: &str) -> StartAccepted {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return StartAccepted::default();
    }
    match serde_json::from_str(trimmed) {
        Ok(accepted) => accepted,
        Err(err) => {
            tracing::debug!("Ignoring start acknowledgement body: {err}");
            StartAccepted::default()
        }
    }
}
