/// Application configuration
///
/// The comparison service base URL used to be hardcoded at every call
/// site; here it is resolved once at startup and injected into the API
/// client. Resolution order: environment variable, then the platform
/// config file, then the built-in default.
use std::path::{Path, PathBuf};

use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Environment variable overriding the service base URL
pub const ENV_API_URL: &str = "FACE_COMPARE_API_URL";

/// Default service location when nothing else is configured
const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the comparison service
    pub api_base_url: Url,
}

/// On-disk shape of the config file
#[derive(Debug, Serialize, Deserialize)]
struct ConfigFile {
    api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        // The default is a compile-time literal; parsing it cannot fail.
        Config {
            api_base_url: Url::parse(DEFAULT_API_URL)
                .expect("built-in default API URL must be valid"),
        }
    }
}

impl Config {
    /// Resolve the configuration from the environment and the config file
    pub fn load() -> Self {
        let env_value = std::env::var(ENV_API_URL).ok();
        let config = Self::from_sources(env_value.as_deref(), Self::config_path().as_deref());
        info!(api_base_url = %config.api_base_url, "configuration resolved");
        config
    }

    /// Path of the config file, e.g. ~/.config/face-compare/config.json
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("face-compare").join("config.json"))
    }

    /// Resolution logic, separated from the ambient environment for testing
    fn from_sources(env_value: Option<&str>, config_path: Option<&Path>) -> Self {
        if let Some(raw) = env_value {
            match Url::parse(raw) {
                Ok(url) => return Config { api_base_url: url },
                Err(e) => warn!("ignoring invalid {ENV_API_URL} value '{raw}': {e}"),
            }
        }

        if let Some(path) = config_path {
            if let Some(config) = Self::from_file(path) {
                return config;
            }
        }

        Config::default()
    }

    /// Try to read and parse the config file; `None` falls through to the
    /// default
    fn from_file(path: &Path) -> Option<Config> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            // A missing file is the normal first-run case.
            Err(_) => return None,
        };

        let file: ConfigFile = match serde_json::from_str(&contents) {
            Ok(file) => file,
            Err(e) => {
                warn!("ignoring malformed config file {}: {e}", path.display());
                return None;
            }
        };

        match Url::parse(&file.api_base_url) {
            Ok(url) => Some(Config { api_base_url: url }),
            Err(e) => {
                warn!(
                    "ignoring invalid api_base_url in {}: {e}",
                    path.display()
                );
                None
            }
        }
    }
}
