//! Editor configuration
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | WARD_API_URL | http://localhost:8000 | Backend base URL |
//! | WARD_API_TOKEN | (none) | Bearer token |
//! | WARD_REQUEST_TIMEOUT_SECS | 30 | Request timeout |
//! | WARD_SEARCH_DEBOUNCE_MS | 300 | Search quiet period |
//! | WARD_LOG_LEVEL | info | Log level |
//! | WARD_LOG_JSON | false | JSON log lines |
//! | WARD_LOG_DIR | (none) | Daily log file directory |

use std::path::PathBuf;
use std::time::Duration;

use ward_client::ClientConfig;
use ward_client::config::DEFAULT_TIMEOUT_SECS;

#[derive(Debug, Clone)]
pub struct EditorConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub request_timeout_secs: u64,
    pub search_debounce: Duration,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<PathBuf>,
}

impl EditorConfig {
    /// Load from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; unparseable values use defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_url: non_empty("WARD_API_URL").unwrap_or_else(|| "http://localhost:8000".into()),
            token: non_empty("WARD_API_TOKEN"),
            request_timeout_secs: non_empty("WARD_REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            search_debounce: non_empty("WARD_SEARCH_DEBOUNCE_MS")
                .and_then(|v| v.trim().parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(crate::debounce::DEFAULT_QUIET),
            log_level: non_empty("WARD_LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: non_empty("WARD_LOG_JSON")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(false),
            log_dir: non_empty("WARD_LOG_DIR").map(PathBuf::from),
        }
    }

    /// Client configuration for the backend
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(&self.api_url).with_timeout(self.request_timeout_secs);
        match &self.token {
            Some(token) => config.with_token(token),
            None => config,
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.token, None);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.search_debounce, Duration::from_millis(300));
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = EditorConfig::from_lookup(lookup(&[
            ("WARD_API_URL", "https://his.example/api"),
            ("WARD_API_TOKEN", "secret"),
            ("WARD_REQUEST_TIMEOUT_SECS", "5"),
            ("WARD_SEARCH_DEBOUNCE_MS", "150"),
            ("WARD_LOG_JSON", "true"),
            ("WARD_LOG_DIR", "/tmp/ward"),
        ]));
        assert_eq!(config.api_url, "https://his.example/api");
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.search_debounce, Duration::from_millis(150));
        assert!(config.log_json);
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/ward")));

        let client = config.client_config();
        assert_eq!(client.token.as_deref(), Some("secret"));
        assert_eq!(client.timeout, 5);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = EditorConfig::from_lookup(lookup(&[
            ("WARD_REQUEST_TIMEOUT_SECS", "soon"),
            ("WARD_LOG_JSON", "yes please"),
            ("WARD_API_TOKEN", "   "),
        ]));
        assert_eq!(config.request_timeout_secs, 30);
        assert!(!config.log_json);
        assert_eq!(config.token, None);
    }
}
