use std::future::Future;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Default chat-completions endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Configuration for the completion API client
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// API key (from OPENAI_API_KEY env var)
    pub api_key: String,
    /// Model to use (e.g. "gpt-4o-mini")
    pub model: String,
    /// Sampling temperature (0 = fully deterministic)
    pub temperature: f64,
    /// Maximum tokens in the reply
    pub max_tokens: u32,
    /// Chat-completions endpoint; override for compatible gateways
    pub endpoint: String,
}

impl CompletionConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .context("OPENAI_API_KEY environment variable not set")?;

        Ok(Self {
            api_key,
            model: "gpt-4o-mini".to_string(),
            temperature: 0.0,
            max_tokens: 400,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        })
    }

    /// Create with custom settings
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            temperature: 0.0,
            max_tokens: 400,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// Seam over the completion transport so the extraction state machine and
/// the dispatcher can be driven without a live service.
pub trait Completer: Send + Sync {
    /// Send one system+user exchange and return the assistant's text
    fn complete(
        &self,
        system: &str,
        user: &str,
    ) -> impl Future<Output = Result<String, PipelineError>> + Send;
}

/// Completion API client
pub struct CompletionClient {
    client: Client,
    config: CompletionConfig,
}

impl CompletionClient {
    pub fn new(config: CompletionConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Send a system+user exchange to the completion service.
    ///
    /// Transport failures and non-success statuses are `ServiceUnavailable`:
    /// the service did not answer, as opposed to answering badly.
    async fn send_completion(&self, system: &str, user: &str) -> Result<String, PipelineError> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| PipelineError::ServiceUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::ServiceUnavailable(format!(
                "{} - {}",
                status, body
            )));
        }

        let response: ChatResponse = response.json().await.map_err(|e| {
            PipelineError::ServiceUnavailable(format!("bad response envelope: {}", e))
        })?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| PipelineError::ServiceUnavailable("no choices in reply".to_string()))
    }
}

impl Completer for CompletionClient {
    fn complete(
        &self,
        system: &str,
        user: &str,
    ) -> impl Future<Output = Result<String, PipelineError>> + Send {
        self.send_completion(system, user)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    temperature: f64,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ChatReplyMessage {
    content: String,
}
