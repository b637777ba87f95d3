// Thin client for an OpenAI-compatible generative API: one chat-completion
// call and one image-generation call, each attempted exactly once. Retries,
// timeouts and streaming are deliberately absent.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to generative API failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("generative API returned status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("generative API returned no message content")]
    NoContent,
    #[error("image API returned no URL")]
    NoImageUrl,
    #[error("image API returned a malformed URL: {0}")]
    MalformedImageUrl(String),
}

// Request/response shapes for POST {api_base}/chat/completions

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessagePayload<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessagePayload<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response-format hint forwarded to the provider.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

impl ResponseFormat {
    /// Ask the provider for a single JSON object instead of free text.
    pub fn json_object() -> Self {
        Self {
            kind: "json_object",
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// Request/response shapes for POST {api_base}/images/generations

#[derive(Serialize)]
struct ImageGenerationRequest<'a> {
    model: &'a str,
    prompt: String,
    n: u8,
    size: &'static str,
    response_format: &'static str,
}

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    #[serde(default)]
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    #[serde(default)]
    url: Option<String>,
}

/// Handle on the upstream provider, shared through axum state.
pub struct GenerativeClient {
    http: Client,
    api_base: String,
    api_key: String,
    chat_model: String,
    image_model: String,
}

impl GenerativeClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            chat_model: config.chat_model.clone(),
            image_model: config.image_model.clone(),
        }
    }

    /// One chat completion. Returns the raw text of the first choice.
    pub async fn complete_chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
        response_format: Option<ResponseFormat>,
    ) -> Result<String, UpstreamError> {
        let url = format!("{}/chat/completions", self.api_base);
        let payload = ChatCompletionRequest {
            model: &self.chat_model,
            messages: vec![
                ChatMessagePayload {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessagePayload {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature,
            response_format,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { status, body });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(UpstreamError::NoContent)?;

        debug!(chars = content.len(), "received chat completion");
        Ok(content)
    }

    /// One image mockup for a concept description. Returns the hosted URL,
    /// which must carry an http(s) scheme to count as well-formed.
    pub async fn generate_image(&self, description: &str) -> Result<String, UpstreamError> {
        let url = format!("{}/images/generations", self.api_base);
        let payload = ImageGenerationRequest {
            model: &self.image_model,
            prompt: format!("T-shirt design: {description}"),
            n: 1,
            size: "1024x1024",
            response_format: "url",
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { status, body });
        }

        let generated: ImageGenerationResponse = response.json().await?;
        let image_url = generated
            .data
            .into_iter()
            .next()
            .and_then(|datum| datum.url)
            .ok_or(UpstreamError::NoImageUrl)?;

        if !image_url.starts_with("http://") && !image_url.starts_with("https://") {
            return Err(UpstreamError::MalformedImageUrl(image_url));
        }

        debug!(url = %image_url, "received generated image");
        Ok(image_url)
    }
}
