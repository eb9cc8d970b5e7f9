use reqwest::Url;

use crate::error::ConfigError;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Settings the relay needs for its whole lifetime, read once at startup.
#[derive(Clone, Debug)]
pub struct RelayConfig {
    frontend_url: String,
    model_url: String,
    model_name: String,
    bind_addr: String,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let frontend_url = required("FRONTEND_URL")?;
        let model_url = required("AI_MODEL_URL")?;
        let model_name = required("AI_MODEL_NAME")?;

        let frontend_url = parse_http_url("FRONTEND_URL", frontend_url)?;
        let model_url = parse_http_url("AI_MODEL_URL", model_url)?;

        let bind_addr = lookup("RELAY_BIND_ADDR")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            frontend_url,
            model_url,
            model_name,
            bind_addr,
        })
    }

    pub fn frontend_url(&self) -> &str {
        &self.frontend_url
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }

    pub fn chat_endpoint(&self) -> String {
        format!("{}/api/chat", self.model_url)
    }
}

// Origins and base urls are compared and joined textually, so drop any trailing '/'.
fn parse_http_url(key: &'static str, value: String) -> Result<String, ConfigError> {
    let parsed = Url::parse(&value).map_err(|err| ConfigError::InvalidUrl {
        key,
        value: value.clone(),
        reason: err.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            key,
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
            value,
        });
    }

    Ok(value.trim_end_matches('/').to_string())
}
