use std::{
    path::PathBuf,
    sync::{Mutex, OnceLock},
};

const CONFIG_HOME_ENV: &str = "TRAINCONSOLE_CONFIG_HOME";
const API_URL_ENV: &str = "TRAINCONSOLE_API_URL";

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Points the console at a scratch config home (and optionally an API URL)
/// for the lifetime of the guard.
pub struct ConsoleEnvGuard {
    previous: Vec<(&'static str, Option<String>)>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl ConsoleEnvGuard {
    pub fn set_config_home(path: PathBuf) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let mut guard = Self {
            previous: Vec::new(),
            _lock: lock,
        };
        guard.set(CONFIG_HOME_ENV, Some(path.to_string_lossy().into_owned()));
        guard.set(API_URL_ENV, None);
        guard
    }

    pub fn with_api_url(mut self, url: &str) -> Self {
        self.set(API_URL_ENV, Some(url.to_string()));
        self
    }

    fn set(&mut self, key: &'static str, value: Option<String>) {
        if !self.previous.iter().any(|(name, _)| *name == key) {
            self.previous.push((key, std::env::var(key).ok()));
        }
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }
}

impl Drop for ConsoleEnvGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            // SAFETY: tests run under a global lock to prevent concurrent env mutations.
            unsafe {
                match value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
