//! Console settings persisted as TOML in the application directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::app_dirs;
use crate::http_client::Timeouts;

/// Default filename used to store console settings.
pub const SETTINGS_FILE_NAME: &str = "settings.toml";
/// Environment variable that replaces `api_base_url` for one launch.
pub const API_URL_ENV: &str = "TRAINCONSOLE_API_URL";
/// Backend address used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Errors that may occur while loading or saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The application directory could not be prepared.
    #[error(transparent)]
    AppDir(#[from] app_dirs::AppDirError),
    /// Failed to read the settings file.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to write the settings file.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The settings file is not valid TOML for [`ConsoleSettings`].
    #[error("Invalid settings at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Settings could not be serialized.
    #[error("Failed to serialize settings: {0}")]
    SerializeToml(#[from] toml::ser::Error),
    /// The configured backend address is not an absolute http(s) URL.
    #[error("Invalid API base URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// User-editable console settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    /// Base address of the training backend, e.g. `http://localhost:8000`.
    pub api_base_url: String,
    pub connect_timeout_secs: u64,
    /// Read/write timeout for each request.
    pub request_timeout_secs: u64,
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            log_filter: crate::logging::DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ConsoleSettings {
    /// Parse and validate the backend base URL.
    pub fn api_base(&self) -> Result<Url, SettingsError> {
        parse_base_url(&self.api_base_url)
    }

    /// Timeouts for the HTTP agent.
    pub fn timeouts(&self) -> Timeouts {
        let request = Duration::from_secs(self.request_timeout_secs.max(1));
        Timeouts {
            connect: Duration::from_secs(self.connect_timeout_secs.max(1)),
            read: request,
            write: request,
        }
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            self.api_base_url = url.trim().to_string();
        }
        self
    }
}

/// Resolve the settings file path inside the application directory.
pub fn settings_path() -> Result<PathBuf, SettingsError> {
    Ok(app_dirs::app_root_dir()?.join(SETTINGS_FILE_NAME))
}

/// Load settings, writing a default file on first launch.
///
/// Environment overrides are applied after reading and are never persisted.
pub fn load_or_default() -> Result<ConsoleSettings, SettingsError> {
    let path = settings_path()?;
    let settings = if path.exists() {
        load_from(&path)?
    } else {
        let defaults = ConsoleSettings::default();
        save_to_path(&defaults, &path)?;
        tracing::info!("Wrote default settings to {}", path.display());
        defaults
    };
    Ok(settings.with_env_overrides())
}

/// Read settings from a specific file.
pub fn load_from(path: &Path) -> Result<ConsoleSettings, SettingsError> {
    let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| SettingsError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Write settings to a specific file, creating parent directories as needed.
pub fn save_to_path(settings: &ConsoleSettings, path: &Path) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let text = toml::to_string_pretty(settings)?;
    std::fs::write(path, text).map_err(|source| SettingsError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_base_url(raw: &str) -> Result<Url, SettingsError> {
    let invalid = |reason: String| SettingsError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };
    let mut url = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    // Endpoint paths are joined relative to the base, so it must end in '/'.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
