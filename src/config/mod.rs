use serde::{Deserialize, Serialize};
use tracing::Level;

const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Runtime configuration injected by the host page as `window.ENV`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    #[serde(default)]
    pub log_level: Option<String>,
}

impl EnvConfig {
    pub fn new() -> Self {
        let mut config = Self {
            api_url: DEFAULT_API_URL.to_string(),
            log_level: None,
        };

        // Both `window.ENV.API_URL` (documented) and `window.ENV.api_url` are accepted.
        if let Some(url) = read_env_string(&["API_URL", "api_url"]) {
            config.api_url = normalize_base_url(&url);
        }
        config.log_level = read_env_string(&["LOG_LEVEL", "log_level"]);

        config
    }

    pub fn max_log_level(&self) -> Level {
        self.log_level
            .as_deref()
            .and_then(parse_log_level)
            .unwrap_or(Level::INFO)
    }

    /// Full-page entry point of the backend's Google OAuth flow.
    pub fn oauth_url(&self) -> String {
        format!("{}/auth/google", self.api_url)
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn read_env_string(keys: &[&str]) -> Option<String> {
    let window = web_sys::window()?;
    let env = window.get("ENV")?;
    if env.is_undefined() || !env.is_object() {
        return None;
    }

    keys.iter().find_map(|k| {
        js_sys::Reflect::get(&env, &(*k).into())
            .ok()
            .and_then(|v| v.as_string())
            .filter(|s| !s.trim().is_empty())
    })
}

pub(crate) fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

pub(crate) fn parse_log_level(raw: &str) -> Option<Level> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}
