//! Speech synthesis client.

use bytes::Bytes;
use std::sync::Arc;

use super::types::{
    AudioOutput, SpeechOptions, SpeechRequest, MAX_SPEED, MIN_SPEED, RESPONSE_FORMAT,
    SPEECH_MODEL,
};
use crate::transport::{HttpClient, RequestConfig, ResponseType};
use crate::{Error, ErrorContext, Result};

pub const SPEECH_PATH: &str = "/v1/audio/speech";

/// Posts `input` to `{base_url}/v1/audio/speech` and returns the MP3 bytes.
///
/// Transport failures (including a 401 for a bad key) are returned as-is.
pub async fn speech_api(
    client: &HttpClient,
    base_url: &str,
    api_key: &str,
    input: &str,
    speed: f64,
    voice: &str,
) -> Result<Bytes> {
    let endpoint = format!("{}{}", base_url.trim_end_matches('/'), SPEECH_PATH);
    let body = serde_json::to_value(SpeechRequest {
        model: SPEECH_MODEL,
        voice,
        response_format: RESPONSE_FORMAT,
        input,
        speed,
    })?;
    let config = RequestConfig::new()
        .header("Content-Type", "application/json")
        .bearer_auth(api_key)
        .response_type(ResponseType::Bytes);

    tracing::debug!(endpoint = %endpoint, voice, speed, chars = input.chars().count(), "requesting speech");
    let payload = client.post(&endpoint, body, config).await?;
    Ok(payload.into_bytes())
}

/// Client bound to one provider endpoint and key.
pub struct SpeechClient {
    http: Arc<HttpClient>,
    base_url: String,
    api_key: String,
}

impl SpeechClient {
    pub fn builder() -> SpeechClientBuilder {
        SpeechClientBuilder::new()
    }

    /// Validates the request, then calls [`speech_api`].
    pub async fn synthesize(&self, text: &str, options: &SpeechOptions) -> Result<AudioOutput> {
        if text.trim().is_empty() {
            return Err(Error::invalid_argument_with_context(
                "input text is empty",
                ErrorContext::new()
                    .with_field_path("input")
                    .with_source("speech"),
            ));
        }
        if !(MIN_SPEED..=MAX_SPEED).contains(&options.speed) {
            return Err(Error::invalid_argument_with_context(
                format!("speed {} is out of range", options.speed),
                ErrorContext::new()
                    .with_field_path("speed")
                    .with_details(format!("expected {}..={}", MIN_SPEED, MAX_SPEED))
                    .with_source("speech"),
            ));
        }
        let data = speech_api(
            &self.http,
            &self.base_url,
            &self.api_key,
            text,
            options.speed,
            options.voice.as_str(),
        )
        .await?;
        Ok(AudioOutput { data })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

pub struct SpeechClientBuilder {
    http: Option<Arc<HttpClient>>,
    api_key: Option<String>,
    base_url: Option<String>,
}

impl SpeechClientBuilder {
    pub fn new() -> Self {
        Self {
            http: None,
            api_key: None,
            base_url: None,
        }
    }

    pub fn http_client(mut self, http: Arc<HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn build(self) -> Result<SpeechClient> {
        let http = self
            .http
            .ok_or_else(|| Error::configuration("HTTP client must be provided"))?;
        let api_key = self
            .api_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::configuration("API key required"))?;
        let base_url = self
            .base_url
            .unwrap_or_else(|| "https://api.openai.com".to_string());
        Ok(SpeechClient {
            http,
            base_url,
            api_key,
        })
    }
}

impl Default for SpeechClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
