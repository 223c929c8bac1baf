use std::time::Duration;

use tracker_assistant::config::{DEFAULT_API_BASE, DEFAULT_MODEL};
use tracker_assistant::AssistantConfig;
use tracker_client::http::DEFAULT_BASE_URL;
use tracker_events::ToastConfig;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Collection URL of the students REST API.
    pub api_url: String,
    /// Timeout of every persistence request.
    pub request_timeout: Duration,
    pub toast: ToastConfig,
    pub assistant: AssistantConfig,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                            |
    /// |------------------------|----------------------------------------------------|
    /// | `STUDENTS_API_URL`     | `http://localhost:3000/students`                   |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                               |
    /// | `TOAST_TTL_MS`         | `3000`                                             |
    /// | `TOAST_CAPACITY`       | `8`                                                |
    /// | `GEMINI_API_KEY`       | unset (assistant disabled)                         |
    /// | `GEMINI_MODEL`         | `gemini-2.0-flash-exp`                             |
    /// | `GEMINI_API_BASE`      | `https://generativelanguage.googleapis.com/v1beta` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ToastConfig::default();

        let api_url = lookup("STUDENTS_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let request_timeout_secs: u64 = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;
        let ttl_ms: u64 = parse_var(&lookup, "TOAST_TTL_MS", defaults.ttl.as_millis() as u64)?;
        let capacity: usize = parse_var(&lookup, "TOAST_CAPACITY", defaults.capacity)?;

        let assistant = AssistantConfig {
            api_key: lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty()),
            model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
            api_base: lookup("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.into()),
            ..AssistantConfig::default()
        };

        Ok(Self {
            api_url,
            request_timeout: Duration::from_secs(request_timeout_secs),
            toast: ToastConfig {
                ttl: Duration::from_millis(ttl_ms),
                capacity,
            },
            assistant,
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}
