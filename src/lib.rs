/*!
 * # wordcards - vocabulary flashcards with translations and audio
 *
 * Turns a list of vocabulary entries (word + gloss) into flashcard rows:
 * each word is translated through Yandex.Dictionary, pronounced through
 * ElevenLabs text-to-speech, and written to an Anki-ready deck.
 *
 * ## Features
 *
 * - One dictionary lookup and at most one synthesis call per word
 * - Pronunciation clips cached on disk and reused across runs
 * - Per-word failure isolation: a failed word is dropped, the batch goes on
 * - Atomic clip writes, so an interrupted run never leaves a truncated clip
 *
 * ## Architecture
 *
 * - `app_config`: Configuration management
 * - `vocabulary`: Reading entries from a workbook or delimited text
 * - `providers`: Remote service clients:
 *   - `providers::yandex`: Yandex.Dictionary client
 *   - `providers::elevenlabs`: ElevenLabs text-to-speech client
 * - `audio`: Clip cache and synthesizer
 * - `pipeline`: Per-word orchestration
 * - `deck`: Deck file output
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod audio;
pub mod deck;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod pipeline;
pub mod providers;
pub mod vocabulary;

// Re-export main types for easier usage
pub use app_config::Config;
pub use audio::{AudioAsset, AudioCache, AudioSynthesizer};
pub use errors::{AppError, ProviderError, SynthesisError, TranslationError};
pub use pipeline::{OutputRow, PipelineSummary, SkipReason, WordOutcome, WordPipeline};
pub use providers::{SpeechProvider, TranslationClient, TranslationResult};
pub use vocabulary::WordEntry;
