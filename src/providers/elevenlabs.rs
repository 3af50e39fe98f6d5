use std::time::Duration;
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Serialize, Deserialize};
use reqwest::{Client, header};

use crate::errors::ProviderError;
use super::SpeechProvider;

/// Default ElevenLabs API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.elevenlabs.io";
/// Rachel, the ElevenLabs default voice
pub const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";
pub const DEFAULT_MODEL_ID: &str = "eleven_multilingual_v2";

/// ElevenLabs client for text-to-speech
#[derive(Debug)]
pub struct ElevenLabs {
    /// HTTP client for API requests
    client: Client,
    /// API key sent in the `xi-api-key` header
    api_key: String,
    /// API base URL
    endpoint: String,
    /// Voice parameters applied to every request
    voice: VoiceProfile,
}

/// Fixed voice identity and settings used for a run
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceProfile {
    pub voice_id: String,
    pub model_id: String,
    pub settings: VoiceSettings,
}

impl Default for VoiceProfile {
    fn default() -> Self {
        Self {
            voice_id: DEFAULT_VOICE_ID.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            settings: VoiceSettings::default(),
        }
    }
}

/// Text-to-speech request body
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ElevenLabsRequest {
    /// The text to speak
    pub text: String,
    /// Synthesis model
    pub model_id: String,
    /// Voice identity
    pub voice_id: String,
    /// Voice tuning
    pub voice_settings: VoiceSettings,
}

/// Voice tuning parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct VoiceSettings {
    pub stability: f64,
    pub similarity_boost: f64,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.5,
        }
    }
}

impl ElevenLabsRequest {
    /// Create a request speaking `text` with the given voice
    pub fn new(text: impl Into<String>, voice: &VoiceProfile) -> Self {
        Self {
            text: text.into(),
            model_id: voice.model_id.clone(),
            voice_id: voice.voice_id.clone(),
            voice_settings: voice.settings,
        }
    }
}

impl ElevenLabs {
    /// Create a new ElevenLabs client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, voice: VoiceProfile, timeout_secs: u64) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: if endpoint.is_empty() { DEFAULT_ENDPOINT.to_string() } else { endpoint },
            voice,
        }
    }

    /// Synthesis URL for the configured voice
    pub fn speech_url(&self) -> String {
        format!("{}/v1/text-to-speech/{}", self.endpoint.trim_end_matches('/'), self.voice.voice_id)
    }

    /// Send a synthesis request and return the audio bytes
    pub async fn complete(&self, request: ElevenLabsRequest) -> Result<Bytes, ProviderError> {
        let response = self.client.post(self.speech_url())
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "audio/mpeg")
            .header("xi-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(ProviderError::ParseError("ElevenLabs returned an empty audio stream".to_string()));
        }

        Ok(audio)
    }
}

#[async_trait]
impl SpeechProvider for ElevenLabs {
    async fn synthesize_speech(&self, text: &str) -> Result<Bytes, ProviderError> {
        self.complete(ElevenLabsRequest::new(text, &self.voice)).await
    }
}
