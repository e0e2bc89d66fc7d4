//! OpenAI-compatible chat completions judge
//!
//! One [`ChatCompletionsJudge`] per model, all sharing a single
//! `reqwest::Client`. Each invocation is exactly one HTTP request; deadlines
//! and retries are not this adapter's business.

use crate::config::FileConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use veriquorum_application::{JudgeClient, JudgeError};
use veriquorum_domain::{JudgeId, JudgePrompt, core::string::truncate};

/// Maximum length of an error body echoed into a failure reason
const MAX_ERROR_BODY: usize = 200;

/// Connection settings shared by every judge of a panel
#[derive(Debug, Clone)]
pub struct ChatCompletionsSettings {
    pub base_url: String,
    pub api_key: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChatCompletionsSettings {
    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Value,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

/// A judge backed by one model on a chat completions endpoint
pub struct ChatCompletionsJudge {
    id: JudgeId,
    client: reqwest::Client,
    settings: Arc<ChatCompletionsSettings>,
}

impl ChatCompletionsJudge {
    pub fn new(id: JudgeId, client: reqwest::Client, settings: Arc<ChatCompletionsSettings>) -> Self {
        Self {
            id,
            client,
            settings,
        }
    }
}

#[async_trait]
impl JudgeClient for ChatCompletionsJudge {
    fn judge_id(&self) -> &JudgeId {
        &self.id
    }

    async fn invoke(&self, prompt: &JudgePrompt) -> Result<String, JudgeError> {
        let body = ChatRequest {
            model: self.id.as_str(),
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        debug!("Calling judge {}", self.id);

        let response = self
            .client
            .post(self.settings.endpoint())
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JudgeError::RequestFailed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                truncate(body.trim(), MAX_ERROR_BODY)
            )));
        }

        let payload: ChatResponse = response
            .json()
            .await
            .map_err(|e| JudgeError::InvalidResponse(e.to_string()))?;

        let content = extract_content(payload)?;
        debug!("Judge {} answered with {} bytes", self.id, content.len());
        Ok(content)
    }
}

fn map_transport_error(e: reqwest::Error) -> JudgeError {
    if e.is_timeout() {
        JudgeError::Timeout
    } else if e.is_connect() {
        JudgeError::Connection(e.to_string())
    } else {
        JudgeError::RequestFailed(e.to_string())
    }
}

/// Pull `choices[0].message.content` out of a response body
fn extract_content(payload: ChatResponse) -> Result<String, JudgeError> {
    if let Some(error) = payload.error {
        return Err(JudgeError::RequestFailed(error.message));
    }

    let message = payload
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .ok_or_else(|| JudgeError::InvalidResponse("response has no choices".to_string()))?;

    let content = match message.content {
        Value::String(text) => text,
        // Some providers return content as a list of typed parts
        Value::Array(parts) => parts
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join(""),
        Value::Null => String::new(),
        other => other.to_string(),
    };

    if content.trim().is_empty() {
        return Err(JudgeError::EmptyResponse);
    }
    Ok(content)
}

/// Errors building a judge panel from configuration
#[derive(Error, Debug)]
pub enum JudgePanelError {
    #[error("No API key: set {0} or provider.api_key")]
    MissingApiKey(String),

    #[error("judge model name cannot be empty")]
    EmptyModelName,

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// The configured set of HTTP judges
pub struct JudgePanel {
    judges: Vec<Arc<ChatCompletionsJudge>>,
}

impl JudgePanel {
    /// Build one judge per configured model
    pub fn from_config(config: &FileConfig) -> Result<Self, JudgePanelError> {
        let ids = config
            .judges
            .judge_ids()
            .ok_or(JudgePanelError::EmptyModelName)?;

        let provider = &config.provider;
        let api_key = provider
            .resolve_api_key()
            .ok_or_else(|| JudgePanelError::MissingApiKey(provider.api_key_env.clone()))?;

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| JudgePanelError::Client(e.to_string()))?;

        let settings = Arc::new(ChatCompletionsSettings {
            base_url: provider.base_url.clone(),
            api_key,
            temperature: provider.temperature,
            max_tokens: provider.max_tokens,
        });

        Ok(Self::new(ids, client, settings))
    }

    pub fn new(
        ids: Vec<JudgeId>,
        client: reqwest::Client,
        settings: Arc<ChatCompletionsSettings>,
    ) -> Self {
        let judges = ids
            .into_iter()
            .map(|id| {
                Arc::new(ChatCompletionsJudge::new(
                    id,
                    client.clone(),
                    Arc::clone(&settings),
                ))
            })
            .collect();
        Self { judges }
    }

    pub fn len(&self) -> usize {
        self.judges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.judges.is_empty()
    }

    pub fn judge_ids(&self) -> Vec<JudgeId> {
        self.judges.iter().map(|j| j.id.clone()).collect()
    }

    /// The judges as ports, in configuration order
    pub fn clients(&self) -> Vec<Arc<dyn JudgeClient>> {
        self.judges
            .iter()
            .map(|j| Arc::clone(j) as Arc<dyn JudgeClient>)
            .collect()
    }
}
