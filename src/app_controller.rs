use anyhow::{Result, Context};
use log::{error, info};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::{self, Config};
use crate::audio::AudioCache;
use crate::deck::{self, DeckWriter};
use crate::pipeline::{PipelineSummary, WordOutcome, WordPipeline};
use crate::providers::{SpeechProvider, TranslationClient};
use crate::providers::elevenlabs::ElevenLabs;
use crate::providers::yandex::YandexDictionary;
use crate::vocabulary::{self, VocabularyFormat, WordEntry};

// @module: Application controller for deck building

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with a validated configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// Build a deck from the vocabulary file using the configured services
    pub async fn run(&self, input_file: &Path) -> Result<PipelineSummary> {
        let lang = self.config.lang_pair()?;
        let dictionary = &self.config.dictionary;
        let speech = &self.config.speech;

        let translator = Arc::new(YandexDictionary::new(
            dictionary.api_key.clone(),
            dictionary.endpoint.clone(),
            lang,
            dictionary.timeout_secs,
        ));
        let speech_provider = Arc::new(ElevenLabs::new(
            speech.api_key.clone(),
            speech.endpoint.clone(),
            speech.voice_profile(),
            speech.timeout_secs,
        ));

        self.run_with_services(input_file, translator, speech_provider).await
    }

    /// Build a deck with explicit service implementations
    pub async fn run_with_services(
        &self,
        input_file: &Path,
        translator: Arc<dyn TranslationClient>,
        speech: Arc<dyn SpeechProvider>,
    ) -> Result<PipelineSummary> {
        let start_time = Instant::now();

        let format = VocabularyFormat {
            delimiter: app_config::parse_delimiter(&self.config.input.delimiter)?,
            has_header: self.config.input.has_header,
        };
        let entries = vocabulary::read_entries(input_file, format)?;
        info!("Loaded {} vocabulary entries from {:?}", entries.len(), input_file);

        let cache = AudioCache::new(&self.config.output.audio_dir);
        cache.ensure_dir()
            .with_context(|| format!("Failed to create audio directory: {}", self.config.output.audio_dir))?;

        let header = deck::deck_header(&self.config.source_language, &self.config.target_language);
        let mut deck = DeckWriter::create(
            &self.config.output.output_file,
            app_config::parse_delimiter(&self.config.output.delimiter)?,
            &header,
        )?;

        let pipeline = WordPipeline::new(translator, speech, cache);
        let progress_bar = Self::progress_bar(entries.len());
        let summary = write_deck(&pipeline, &entries, &mut deck, &progress_bar).await;
        progress_bar.finish_and_clear();

        let rows_written = deck.rows_written();
        deck.finish()?;

        info!(
            "Processing complete in {}. {} rows written to {}, {} skipped ({} translation, {} synthesis)",
            Self::format_duration(start_time.elapsed()),
            rows_written,
            self.config.output.output_file,
            summary.skipped(),
            summary.translation_failures,
            summary.synthesis_failures,
        );
        info!(
            "Audio files saved to '{}' ({} new, {} reused)",
            self.config.output.audio_dir, summary.synthesized, summary.cache_hits
        );

        Ok(summary)
    }

    fn progress_bar(len: usize) -> ProgressBar {
        let progress_bar = ProgressBar::new(len as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} words ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

/// Drive the pipeline over `entries`, appending each emitted row to `deck` as it is produced
///
/// A row that cannot be written is logged and the run continues.
pub async fn write_deck<W: Write>(
    pipeline: &WordPipeline,
    entries: &[WordEntry],
    deck: &mut DeckWriter<W>,
    progress_bar: &ProgressBar,
) -> PipelineSummary {
    let mut summary = PipelineSummary::default();

    for entry in entries {
        progress_bar.set_message(entry.word.clone());
        let outcome = pipeline.process_entry(entry).await;
        summary.record(&outcome);

        if let WordOutcome::Emitted { row, .. } = &outcome {
            if let Err(e) = deck.write_row(row) {
                error!("Error writing row for '{}': {}", row.word, e);
            }
        }
        progress_bar.inc(1);
    }

    summary
}
