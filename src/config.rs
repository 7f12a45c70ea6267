//! Process configuration: CLI flags plus the `GEMINI_API_KEY` environment
//! variable, read once at startup.

use std::net::SocketAddr;

use secrecy::SecretString;

use crate::providers::google_ai_studio_gemini::GoogleAIStudioCredentials;

pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const DEFAULT_MODEL_NAME: &str = "gemini-2.5-flash";

#[derive(Debug)]
pub struct Config {
    /// Socket address for the API server. Defaults to 0.0.0.0:3000.
    pub bind_address: Option<SocketAddr>,
    /// Gemini model to call, e.g. `gemini-2.5-flash`.
    pub model_name: String,
    /// Socket address for the Prometheus exporter. Defaults to 0.0.0.0:9090.
    pub prometheus_address: Option<SocketAddr>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_address: None,
            model_name: DEFAULT_MODEL_NAME.to_string(),
            prometheus_address: None,
        }
    }
}

/// Reads the Gemini API key from the environment. A missing or empty key is
/// not fatal: the service boots and every model-dependent endpoint returns a
/// "not configured" error instead.
pub fn load_gemini_credentials() -> GoogleAIStudioCredentials {
    match std::env::var(GEMINI_API_KEY_VAR) {
        Ok(key) if !key.trim().is_empty() => {
            GoogleAIStudioCredentials::Static(SecretString::from(key))
        }
        _ => {
            tracing::warn!(
                "Environment variable `{GEMINI_API_KEY_VAR}` is not set. The gateway will start, but all model-dependent endpoints will fail until it is configured."
            );
            GoogleAIStudioCredentials::None
        }
    }
}
