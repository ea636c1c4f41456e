//! Runtime settings read from the environment.

use std::time::Duration;

/// Knobs for fetching upstream data. Every field has a working default.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL that relative catalog sources are resolved against.
    pub source_base_url: String,
    /// Per-fetch timeout.
    pub fetch_timeout: Duration,
    /// Bound on the whole startup option-population phase.
    pub startup_timeout: Duration,
    /// Feed proxied by the API-endpoint table widget.
    pub llama_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_base_url: datamule_api::DEFAULT_BASE_URL.to_string(),
            fetch_timeout: datamule_api::DEFAULT_TIMEOUT,
            startup_timeout: Duration::from_secs(30),
            llama_url: "https://api.llama.fi/v2/chains".to_string(),
        }
    }
}

impl Settings {
    /// Reads `WIDGETBOARD_*` variables, falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            source_base_url: env_string("WIDGETBOARD_SOURCE_BASE_URL", defaults.source_base_url),
            fetch_timeout: Duration::from_secs(env_u64(
                "WIDGETBOARD_FETCH_TIMEOUT_SECS",
                defaults.fetch_timeout.as_secs(),
            )),
            startup_timeout: Duration::from_secs(env_u64(
                "WIDGETBOARD_STARTUP_TIMEOUT_SECS",
                defaults.startup_timeout.as_secs(),
            )),
            llama_url: env_string("WIDGETBOARD_LLAMA_URL", defaults.llama_url),
        }
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .filter(|val| *val > 0)
        .unwrap_or(default)
}

fn env_string(key: &str, default: String) -> String {
    std::env::var(key)
        .ok()
        .filter(|val| !val.trim().is_empty())
        .unwrap_or(default)
}
