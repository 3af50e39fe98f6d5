/*!
 * Clients for the remote services a word passes through.
 *
 * - Yandex.Dictionary: word translation
 * - ElevenLabs: text-to-speech
 *
 * The pipeline only sees the two traits below, so either service can be
 * replaced with a fake in tests.
 */

use async_trait::async_trait;
use bytes::Bytes;
use std::fmt::Debug;

use crate::errors::{ProviderError, TranslationError};

/// Best-effort translation of one word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    /// The word that was looked up
    pub word: String,
    /// First translation of the first sense, empty when the service knows none
    pub translation: String,
}

impl TranslationResult {
    pub fn new(word: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            translation: translation.into(),
        }
    }
}

/// Dictionary service used for the translation stage
#[async_trait]
pub trait TranslationClient: Send + Sync + Debug {
    /// Look up a single word
    ///
    /// An empty dictionary answer is a successful lookup with an empty
    /// translation; only transport, status and decoding failures are errors.
    async fn lookup(&self, word: &str) -> Result<TranslationResult, TranslationError>;
}

/// Speech service used for the synthesis stage
#[async_trait]
pub trait SpeechProvider: Send + Sync + Debug {
    /// Synthesize `text` and return the encoded audio (MP3)
    async fn synthesize_speech(&self, text: &str) -> Result<Bytes, ProviderError>;
}

pub mod yandex;
pub mod elevenlabs;
