use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::RelayConfig;
use crate::error::RelayError;

pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize, Debug)]
pub struct UpstreamMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Body of `POST {AI_MODEL_URL}/api/chat`.
#[derive(Serialize, Debug)]
pub struct UpstreamChatPayload<'a> {
    model: &'a str,
    messages: Vec<UpstreamMessage<'a>>,
    stream: bool,
}

impl<'a> UpstreamChatPayload<'a> {
    pub fn single_turn(model: &'a str, prompt: &'a str) -> Self {
        UpstreamChatPayload {
            model,
            messages: vec![UpstreamMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        }
    }
}

// Only the fields the relay reads; anything else the server sends is ignored.
#[derive(Deserialize, Debug)]
pub struct UpstreamChatResponse {
    message: UpstreamReply,
}

#[derive(Deserialize, Debug)]
pub struct UpstreamReply {
    content: String,
}

impl UpstreamChatResponse {
    pub fn into_content(self) -> String {
        self.message.content
    }
}

/// Client for the local inference server. Cloning shares the connection pool.
#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl UpstreamClient {
    pub fn new(config: &RelayConfig) -> reqwest::Result<Self> {
        Self::with_timeout(config, UPSTREAM_TIMEOUT)
    }

    pub fn with_timeout(config: &RelayConfig, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()?;

        Ok(UpstreamClient {
            client,
            endpoint: config.chat_endpoint(),
            model: config.model_name().to_string(),
        })
    }

    pub fn get_endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends `prompt` as a single user turn and returns the reply text as-is.
    pub async fn chat(&self, prompt: &str) -> Result<String, RelayError> {
        let payload = UpstreamChatPayload::single_turn(&self.model, prompt);

        let res = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(RelayError::UpstreamStatus(status));
        }

        let body = res.bytes().await?;
        let reply: UpstreamChatResponse = serde_json::from_slice(&body)
            .map_err(|err| RelayError::MalformedUpstreamResponse(err.to_string()))?;

        Ok(reply.into_content())
    }
}
