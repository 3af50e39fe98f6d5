use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::AppError;
use crate::language_utils;
use crate::providers::{elevenlabs, yandex};
use crate::providers::elevenlabs::{VoiceProfile, VoiceSettings};

/// Application configuration module
/// This module handles loading, validating and saving the settings for a
/// run. API keys may be left empty in the file and supplied through the
/// environment instead.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language of the vocabulary words (ISO)
    pub source_language: String,

    /// Language of the translations (ISO)
    pub target_language: String,

    /// Dictionary service settings
    #[serde(default)]
    pub dictionary: DictionaryConfig,

    /// Speech service settings
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Vocabulary file settings
    #[serde(default)]
    pub input: InputConfig,

    /// Deck and audio output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Yandex.Dictionary configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DictionaryConfig {
    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Lookup URL
    #[serde(default = "default_dictionary_endpoint")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_dictionary_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// ElevenLabs configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpeechConfig {
    /// API key for the service
    #[serde(default = "String::new")]
    pub api_key: String,

    /// API base URL
    #[serde(default = "default_speech_endpoint")]
    pub endpoint: String,

    /// Voice identity used for every word
    #[serde(default = "default_voice_id")]
    pub voice_id: String,

    /// Synthesis model
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Voice stability (0.0 to 1.0)
    #[serde(default = "default_voice_setting")]
    pub stability: f64,

    /// Voice similarity boost (0.0 to 1.0)
    #[serde(default = "default_voice_setting")]
    pub similarity_boost: f64,

    /// Request timeout in seconds
    #[serde(default = "default_speech_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_speech_endpoint(),
            voice_id: default_voice_id(),
            model_id: default_model_id(),
            stability: default_voice_setting(),
            similarity_boost: default_voice_setting(),
            timeout_secs: default_speech_timeout_secs(),
        }
    }
}

impl SpeechConfig {
    pub fn voice_profile(&self) -> VoiceProfile {
        VoiceProfile {
            voice_id: self.voice_id.clone(),
            model_id: self.model_id.clone(),
            settings: VoiceSettings {
                stability: self.stability,
                similarity_boost: self.similarity_boost,
            },
        }
    }
}

/// Vocabulary file format
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InputConfig {
    /// Column delimiter, a single character or `tab`
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Whether the first row holds column titles
    #[serde(default)]
    pub has_header: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            has_header: false,
        }
    }
}

/// Output locations and format
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    /// Directory holding one clip per word
    #[serde(default = "default_audio_dir")]
    pub audio_dir: String,

    /// Deck file
    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// Column delimiter, a single character or `tab`
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            audio_dir: default_audio_dir(),
            output_file: default_output_file(),
            delimiter: default_delimiter(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for log::LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_speech_timeout_secs() -> u64 {
    60
}

fn default_dictionary_endpoint() -> String {
    yandex::DEFAULT_ENDPOINT.to_string()
}

fn default_speech_endpoint() -> String {
    elevenlabs::DEFAULT_ENDPOINT.to_string()
}

fn default_voice_id() -> String {
    elevenlabs::DEFAULT_VOICE_ID.to_string()
}

fn default_model_id() -> String {
    elevenlabs::DEFAULT_MODEL_ID.to_string()
}

fn default_voice_setting() -> f64 {
    0.5
}

fn default_audio_dir() -> String {
    "audio".to_string()
}

fn default_output_file() -> String {
    "output.csv".to_string()
}

fn default_delimiter() -> String {
    ",".to_string()
}

/// Parse a configured delimiter into the byte the CSV layer expects
pub fn parse_delimiter(value: &str) -> Result<u8, AppError> {
    match value {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ if value.len() == 1 && value.is_ascii() => Ok(value.as_bytes()[0]),
        _ => Err(AppError::Config(format!(
            "Delimiter must be a single ASCII character or 'tab', got '{}'", value
        ))),
    }
}

/// Load `KEY=value` pairs from an env file into the process environment
///
/// Variables already set keep their value. Returns whether the file was loaded.
pub fn load_env_file<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    match dotenvy::from_path(path) {
        Ok(()) => true,
        Err(e) if e.not_found() => {
            warn!("{} file not found, using the existing environment", path.display());
            false
        }
        Err(e) => {
            warn!("Failed to load {}: {}", path.display(), e);
            false
        }
    }
}

impl Config {
    /// Load the configuration file, creating it with defaults when missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        language_utils::dictionary_lang_pair(&self.source_language, &self.target_language)
            .map_err(|e| AppError::Config(e.to_string()))?;

        if self.dictionary.api_key.trim().is_empty() {
            return Err(AppError::Config(
                "Dictionary API key is required (set YANDEX_API_KEY)".to_string()
            ));
        }

        if self.speech.api_key.trim().is_empty() {
            return Err(AppError::Config(
                "Speech API key is required (set ELEVENLABS_API_KEY)".to_string()
            ));
        }

        if self.speech.voice_id.trim().is_empty() || self.speech.model_id.trim().is_empty() {
            return Err(AppError::Config("Speech voice_id and model_id must not be empty".to_string()));
        }

        for (name, value) in [("stability", self.speech.stability), ("similarity_boost", self.speech.similarity_boost)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(AppError::Config(format!("Speech {} must be between 0.0 and 1.0, got {}", name, value)));
            }
        }

        if self.output.audio_dir.trim().is_empty() {
            return Err(AppError::Config("Audio directory must not be empty".to_string()));
        }

        parse_delimiter(&self.input.delimiter)?;
        parse_delimiter(&self.output.delimiter)?;

        Ok(())
    }

    /// Language pair as sent to the dictionary, e.g. `en-ru`
    pub fn lang_pair(&self) -> Result<String, AppError> {
        language_utils::dictionary_lang_pair(&self.source_language, &self.target_language)
            .map_err(|e| AppError::Config(e.to_string()))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "en".to_string(),
            target_language: "ru".to_string(),
            dictionary: DictionaryConfig::default(),
            speech: SpeechConfig::default(),
            input: InputConfig::default(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
