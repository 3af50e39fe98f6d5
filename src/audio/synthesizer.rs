use std::sync::Arc;
use log::info;

use crate::errors::SynthesisError;
use crate::providers::SpeechProvider;
use super::{AudioAsset, AudioCache};

/// Produces pronunciation clips and stores them in the audio cache
#[derive(Debug, Clone)]
pub struct AudioSynthesizer {
    provider: Arc<dyn SpeechProvider>,
    cache: AudioCache,
}

impl AudioSynthesizer {
    pub fn new(provider: Arc<dyn SpeechProvider>, cache: AudioCache) -> Self {
        Self { provider, cache }
    }

    /// Request speech for `word` and write it to the word's clip path
    ///
    /// Callers check the cache first; this always calls the speech service.
    pub async fn synthesize(&self, word: &str) -> Result<AudioAsset, SynthesisError> {
        let audio = self.provider.synthesize_speech(word).await
            .map_err(|e| SynthesisError::provider(word, e))?;

        let asset = self.cache.store(word, &audio)
            .map_err(|e| SynthesisError::storage(word, e))?;

        info!("Created audio file for '{}' ({} bytes)", word, audio.len());
        Ok(asset)
    }
}
