/*!
 * Per-word processing pipeline.
 *
 * Each entry goes through two stages, strictly in order:
 * 1. Translation: dictionary lookup for the word
 * 2. Audio: reuse the cached clip, or synthesize and store a new one
 *
 * A failure in either stage drops that entry only. The run always moves on
 * to the next entry, and emitted rows keep the input order.
 */

use std::fmt;
use std::sync::Arc;
use log::{debug, info, warn};

use crate::audio::{AudioAsset, AudioCache, AudioSynthesizer};
use crate::providers::{SpeechProvider, TranslationClient};
use crate::vocabulary::WordEntry;

/// A finished flashcard row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    pub word: String,
    /// The entry's gloss, unchanged
    pub example: String,
    /// `[sound:<file>]` tag naming the stored clip
    pub sound_reference: String,
    /// May be empty when the dictionary had no senses for the word
    pub translation: String,
}

/// Why an entry produced no row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    TranslationFailed,
    SynthesisFailed,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TranslationFailed => write!(f, "translation failed"),
            Self::SynthesisFailed => write!(f, "synthesis failed"),
        }
    }
}

/// Result of processing one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordOutcome {
    /// Both stages cleared
    Emitted {
        row: OutputRow,
        audio: AudioAsset,
    },
    /// A stage failed; `detail` carries the error message
    Skipped {
        word: String,
        reason: SkipReason,
        detail: String,
    },
}

impl WordOutcome {
    pub fn row(&self) -> Option<&OutputRow> {
        match self {
            Self::Emitted { row, .. } => Some(row),
            Self::Skipped { .. } => None,
        }
    }

    pub fn word(&self) -> &str {
        match self {
            Self::Emitted { row, .. } => &row.word,
            Self::Skipped { word, .. } => word,
        }
    }
}

/// Counters over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    pub emitted: usize,
    pub translation_failures: usize,
    pub synthesis_failures: usize,
    pub cache_hits: usize,
    pub synthesized: usize,
}

impl PipelineSummary {
    pub fn record(&mut self, outcome: &WordOutcome) {
        match outcome {
            WordOutcome::Emitted { audio, .. } => {
                self.emitted += 1;
                if audio.was_cached {
                    self.cache_hits += 1;
                } else {
                    self.synthesized += 1;
                }
            }
            WordOutcome::Skipped { reason: SkipReason::TranslationFailed, .. } => self.translation_failures += 1,
            WordOutcome::Skipped { reason: SkipReason::SynthesisFailed, .. } => self.synthesis_failures += 1,
        }
    }

    pub fn from_outcomes(outcomes: &[WordOutcome]) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            summary.record(outcome);
        }
        summary
    }

    pub fn skipped(&self) -> usize {
        self.translation_failures + self.synthesis_failures
    }
}

/// Orchestrates translation and audio for a sequence of entries
#[derive(Debug, Clone)]
pub struct WordPipeline {
    translator: Arc<dyn TranslationClient>,
    cache: AudioCache,
    synthesizer: AudioSynthesizer,
}

impl WordPipeline {
    /// Build a pipeline; the synthesizer writes into the same cache it is checked against
    pub fn new(translator: Arc<dyn TranslationClient>, speech: Arc<dyn SpeechProvider>, cache: AudioCache) -> Self {
        let synthesizer = AudioSynthesizer::new(speech, cache.clone());
        Self {
            translator,
            cache,
            synthesizer,
        }
    }

    /// Process every entry in order, one at a time
    pub async fn run(&self, entries: &[WordEntry]) -> Vec<WordOutcome> {
        let mut outcomes = Vec::with_capacity(entries.len());
        for entry in entries {
            outcomes.push(self.process_entry(entry).await);
        }

        let summary = PipelineSummary::from_outcomes(&outcomes);
        info!(
            "Processed {} words: {} emitted, {} skipped",
            entries.len(), summary.emitted, summary.skipped()
        );
        outcomes
    }

    /// Run both stages for a single entry
    pub async fn process_entry(&self, entry: &WordEntry) -> WordOutcome {
        let word = entry.word.as_str();

        let translation = match self.translator.lookup(word).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Skipping '{}': {}", word, e);
                return skipped(word, SkipReason::TranslationFailed, e);
            }
        };

        let audio = match self.cache.lookup(word) {
            Some(asset) => {
                debug!("Audio for '{}' already exists, skipping generation", word);
                asset
            }
            None => match self.synthesizer.synthesize(word).await {
                Ok(asset) => asset,
                Err(e) => {
                    warn!("Skipping '{}': {}", word, e);
                    return skipped(word, SkipReason::SynthesisFailed, e);
                }
            },
        };

        WordOutcome::Emitted {
            row: OutputRow {
                word: entry.word.clone(),
                example: entry.gloss.clone(),
                sound_reference: self.cache.sound_tag(word),
                translation: translation.translation,
            },
            audio,
        }
    }
}

fn skipped(word: &str, reason: SkipReason, error: impl fmt::Display) -> WordOutcome {
    WordOutcome::Skipped {
        word: word.to_string(),
        reason,
        detail: error.to_string(),
    }
}
