use std::time::Duration;
use async_trait::async_trait;
use serde::{Serialize, Deserialize};
use reqwest::Client;
use url::Url;
use log::debug;

use crate::errors::{ProviderError, TranslationError};
use super::{TranslationClient, TranslationResult};

/// Default Yandex.Dictionary lookup endpoint
pub const DEFAULT_ENDPOINT: &str = "https://dictionary.yandex.net/api/v1/dicservice.json/lookup";

/// Yandex.Dictionary client for word lookups
#[derive(Debug)]
pub struct YandexDictionary {
    /// HTTP client for API requests
    client: Client,
    /// API key sent as the `key` query parameter
    api_key: String,
    /// Lookup endpoint URL
    endpoint: String,
    /// Language pair in the service's `src-dst` form
    lang: String,
}

/// Lookup response
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct DicResult {
    /// Response header, unused
    #[serde(default)]
    pub head: serde_json::Value,

    /// Dictionary entries, one per part of speech
    #[serde(default)]
    pub def: Vec<Definition>,
}

/// One dictionary entry for the looked-up word
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Definition {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub pos: String,
    #[serde(default)]
    pub tr: Vec<Translation>,
}

/// A translation of a dictionary entry
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Translation {
    pub text: String,
    #[serde(default)]
    pub pos: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub syn: Vec<TextItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mean: Vec<TextItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ex: Vec<Example>,
}

/// Synonym or meaning
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct TextItem {
    pub text: String,
}

/// Usage example with its own translations
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Example {
    pub text: String,
    #[serde(default)]
    pub tr: Vec<Translation>,
}

impl DicResult {
    /// First translation of the first sense, or an empty string
    pub fn first_translation(&self) -> &str {
        self.def.first()
            .and_then(|d| d.tr.first())
            .map(|t| t.text.as_str())
            .unwrap_or("")
    }
}

impl YandexDictionary {
    /// Create a new dictionary client
    ///
    /// `lang` is the service's language pair, e.g. `en-ru`. An empty
    /// endpoint selects the public API.
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, lang: impl Into<String>, timeout_secs: u64) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: if endpoint.is_empty() { DEFAULT_ENDPOINT.to_string() } else { endpoint },
            lang: lang.into(),
        }
    }

    /// Build the lookup URL for a word; the word is percent-encoded
    pub fn lookup_url(&self, word: &str) -> Result<Url, ProviderError> {
        Url::parse_with_params(
            &self.endpoint,
            &[("key", self.api_key.as_str()), ("lang", self.lang.as_str()), ("text", word)],
        )
        .map_err(|e| ProviderError::RequestFailed(format!("Invalid dictionary endpoint '{}': {}", self.endpoint, e)))
    }

    /// Perform the raw lookup request
    pub async fn fetch(&self, word: &str) -> Result<DicResult, ProviderError> {
        let url = self.lookup_url(word)?;

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<DicResult>(&body)
            .map_err(|e| ProviderError::ParseError(format!("Invalid dictionary response: {}", e)))
    }
}

#[async_trait]
impl TranslationClient for YandexDictionary {
    async fn lookup(&self, word: &str) -> Result<TranslationResult, TranslationError> {
        let result = self.fetch(word).await
            .map_err(|e| TranslationError::provider(word, e))?;

        let translation = result.first_translation();
        if translation.is_empty() {
            debug!("No dictionary senses for '{}' ({})", word, self.lang);
        }

        Ok(TranslationResult::new(word, translation))
    }
}
