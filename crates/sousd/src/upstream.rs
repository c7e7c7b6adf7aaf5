//! Upstream model client.
//!
//! One configurable client covering both supported wire shapes, not
//! parallel code paths: `openai-chat` posts system + user messages to
//! `{base_url}/chat/completions`, `completion` posts a single combined
//! input to `base_url` (Hugging-Face-inference shape) with the echoed
//! prompt suppressed. Both return the raw generated text; extraction
//! happens in `extract`.

use crate::config::{UpstreamConfig, UpstreamKind};
use crate::extract::ExtractionMode;
use serde::{Deserialize, Serialize};
use sous_common::SuggestError;
use std::time::Duration;
use tracing::debug;

pub struct UpstreamClient {
    client: reqwest::Client,
    config: UpstreamConfig,
    api_key: String,
}

// ===== openai-chat wire shapes =====

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

// ===== completion wire shapes =====

#[derive(Serialize)]
struct CompletionRequest {
    inputs: String,
    parameters: CompletionParameters,
}

#[derive(Serialize)]
struct CompletionParameters {
    temperature: f32,
    max_new_tokens: u32,
    /// Keep the echoed instructions out of the generated text.
    return_full_text: bool,
}

#[derive(Deserialize)]
struct CompletionResult {
    generated_text: Option<String>,
}

impl UpstreamClient {
    pub fn new(config: UpstreamConfig, api_key: String) -> Result<Self, SuggestError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SuggestError::Http(e.to_string()))?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    pub fn kind(&self) -> UpstreamKind {
        self.config.kind
    }

    /// Extraction strategy matching this upstream's output discipline.
    pub fn extraction_mode(&self) -> ExtractionMode {
        match self.config.kind {
            UpstreamKind::OpenAiChat => ExtractionMode::Strict,
            UpstreamKind::Completion => ExtractionMode::Scan,
        }
    }

    /// Issue one generation request and return the raw model text.
    pub async fn generate(&self, system: &str, prompt: &str) -> Result<String, SuggestError> {
        match self.config.kind {
            UpstreamKind::OpenAiChat => self.generate_chat(system, prompt).await,
            UpstreamKind::Completion => self.generate_completion(system, prompt).await,
        }
    }

    async fn generate_chat(&self, system: &str, prompt: &str) -> Result<String, SuggestError> {
        debug!("Calling chat upstream model: {}", self.config.model);

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SuggestError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SuggestError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|_| SuggestError::MalformedResponse)?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(SuggestError::MalformedResponse)
    }

    async fn generate_completion(&self, system: &str, prompt: &str) -> Result<String, SuggestError> {
        debug!("Calling completion upstream: {}", self.config.base_url);

        let request = CompletionRequest {
            inputs: format!("{}\n\n{}", system, prompt),
            parameters: CompletionParameters {
                temperature: self.config.temperature,
                max_new_tokens: self.config.max_tokens,
                return_full_text: false,
            },
        };

        let response = self
            .client
            .post(&self.config.base_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SuggestError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SuggestError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let results: Vec<CompletionResult> = response
            .json()
            .await
            .map_err(|_| SuggestError::MalformedResponse)?;

        results
            .into_iter()
            .next()
            .and_then(|r| r.generated_text)
            .ok_or(SuggestError::MalformedResponse)
    }
}
