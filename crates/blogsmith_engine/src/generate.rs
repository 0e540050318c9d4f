//! Client for the external text and image generation endpoints.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_base: String,
    pub api_key: String,
    pub text_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub image_size: String,
    pub request_timeout: Duration,
}

impl OpenAiConfig {
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            api_key: api_key.into(),
            text_model: "text-davinci-003".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            image_size: "256x256".to_string(),
            request_timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("generation endpoint returned http status {0}")]
    HttpStatus(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("completion returned no text")]
    EmptyCompletion,
    #[error("invalid api base url: {0}")]
    InvalidApiBase(String),
}

#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate the post body for a prompt. Never returns an empty string.
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerateError>;
}

#[async_trait::async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate one image and return its download URL.
    async fn generate_image(&self, prompt: &str) -> Result<String, GenerateError>;
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ImageResponse {
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    url: String,
}

/// Client for an OpenAI-compatible completion and image generation API.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    config: OpenAiConfig,
    http: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, GenerateError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| GenerateError::Network(err.to_string()))?;
        Ok(Self { config, http })
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, GenerateError> {
        let joined = format!("{}/{}", self.config.api_base.trim_end_matches('/'), path);
        reqwest::Url::parse(&joined).map_err(|err| GenerateError::InvalidApiBase(err.to_string()))
    }

    async fn post_json(
        &self,
        path: &str,
        payload: &serde_json::Value,
    ) -> Result<reqwest::Response, GenerateError> {
        let response = self
            .http
            .post(self.endpoint(path)?)
            .bearer_auth(&self.config.api_key)
            .json(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerateError::HttpStatus(status.as_u16()));
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerateError> {
        let payload = serde_json::json!({
            "model": self.config.text_model,
            "prompt": prompt,
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
        });
        let response = self.post_json("completions", &payload).await?;
        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|err| GenerateError::MalformedResponse(err.to_string()))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GenerateError::MalformedResponse("no choices in response".into()))?;
        match choice.text {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(GenerateError::EmptyCompletion),
        }
    }
}

#[async_trait::async_trait]
impl ImageGenerator for OpenAiClient {
    async fn generate_image(&self, prompt: &str) -> Result<String, GenerateError> {
        let payload = serde_json::json!({
            "prompt": prompt,
            "n": 1,
            "size": self.config.image_size,
        });
        let response = self.post_json("images/generations", &payload).await?;
        let images: ImageResponse = response
            .json()
            .await
            .map_err(|err| GenerateError::MalformedResponse(err.to_string()))?;

        images
            .data
            .into_iter()
            .next()
            .map(|datum| datum.url)
            .ok_or_else(|| GenerateError::MalformedResponse("no image url in response".into()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> GenerateError {
    if err.is_timeout() {
        return GenerateError::Network(format!("timeout: {err}"));
    }
    GenerateError::Network(err.to_string())
}
