//! Runtime configuration.
//!
//! Values come from the environment first and may be overridden by CLI
//! flags in `main`. The API key is not validated up front: a missing or
//! wrong key only shows up as a failed fetch.

use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://api.nytimes.com/svc/search/v2/articlesearch.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_USER_AGENT: &str = "nytbox/0.1 (Rust; TUI)";

pub const ENV_API_KEY: &str = "NYT_API_KEY";
pub const ENV_BASE_URL: &str = "NYT_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "NYTBOX_TIMEOUT_SECS";
pub const ENV_LOG_DIR: &str = "NYTBOX_LOG_DIR";

#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_dir: std::env::temp_dir(),
        }
    }
}

// Hand-written so the key never ends up in a log line.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("log_dir", &self.log_dir)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            api_key: get(ENV_API_KEY).unwrap_or(defaults.api_key),
            base_url: get(ENV_BASE_URL).unwrap_or(defaults.base_url),
            timeout_secs: get(ENV_TIMEOUT_SECS)
                .and_then(|v| v.trim().parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.timeout_secs),
            user_agent: defaults.user_agent,
            log_dir: get(ENV_LOG_DIR).map(PathBuf::from).unwrap_or(defaults.log_dir),
        }
    }
}
