use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_BASE_URL: &str = "https://api.chess.com/pub";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
    pub timeout_secs: u64,
    pub log_file: PathBuf,
    pub data_dir: PathBuf,
    pub load_local: bool,
    pub store_responses: bool,
}

impl Default for Config {
    fn default() -> Self {
        let mut log_file = env::temp_dir();
        log_file.push("gmwiki");
        log_file.push("gmwiki.log");

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            log_file,
            data_dir: PathBuf::from("data"),
            load_local: false,
            store_responses: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            base_url: lookup("GMWIKI_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.base_url),

            timeout_secs: lookup("GMWIKI_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),

            log_file: lookup("GMWIKI_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),

            data_dir: lookup("GMWIKI_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),

            load_local: false,
            store_responses: false,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
