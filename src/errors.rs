/*!
 * Error types for the wordcards application.
 *
 * Per-word failures (`TranslationError`, `SynthesisError`) are recoverable:
 * the pipeline logs them and drops the word. `AppError` covers the fatal
 * conditions that stop a run before any word is processed.
 */

use thiserror::Error;

/// Errors that can occur when talking to a remote service
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when building or sending an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error body returned by the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors from the dictionary lookup stage
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the dictionary service
    #[error("Dictionary lookup for '{word}' failed: {source}")]
    Provider {
        /// Word being looked up
        word: String,
        /// Underlying provider failure
        #[source]
        source: ProviderError,
    },
}

impl TranslationError {
    pub fn provider(word: impl Into<String>, source: ProviderError) -> Self {
        Self::Provider { word: word.into(), source }
    }
}

/// Errors from the speech synthesis stage
#[derive(Error, Debug)]
pub enum SynthesisError {
    /// Error from the speech service
    #[error("Speech synthesis for '{word}' failed: {source}")]
    Provider {
        /// Word being synthesized
        word: String,
        /// Underlying provider failure
        #[source]
        source: ProviderError,
    },

    /// The clip was received but could not be stored
    #[error("Failed to store audio for '{word}': {source}")]
    Storage {
        /// Word being synthesized
        word: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}

impl SynthesisError {
    pub fn provider(word: impl Into<String>, source: ProviderError) -> Self {
        Self::Provider { word: word.into(), source }
    }

    pub fn storage(word: impl Into<String>, source: std::io::Error) -> Self {
        Self::Storage { word: word.into(), source }
    }
}

/// Fatal application errors, raised before or outside per-word processing
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error reading the vocabulary input
    #[error("Input error: {0}")]
    Input(String),
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(error: csv::Error) -> Self {
        Self::Input(error.to_string())
    }
}
