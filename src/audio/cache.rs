/*!
 * Audio clip cache.
 *
 * A clip is cached when a file exists at the word's deterministic path.
 * Content is never inspected; writes go through `FileManager::write_atomic`
 * so a file at that path is always complete.
 */

use std::path::PathBuf;
use std::sync::LazyLock;
use log::debug;
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::file_utils::FileManager;
use super::AudioAsset;

/// Extension of stored clips
pub const AUDIO_EXTENSION: &str = "mp3";

const MAX_STEM_CHARS: usize = 100;

/// Device names Windows refuses as file names, with or without an extension
const RESERVED_STEMS: &[&str] = &[
    "CON", "PRN", "AUX", "NUL",
    "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8", "COM9",
    "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

static UNSAFE_FILE_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[/\\:*?"<>|\x00-\x1F\x7F]"#).expect("valid file name pattern")
});

/// Audio directory and its naming scheme
#[derive(Debug, Clone)]
pub struct AudioCache {
    dir: PathBuf,
}

impl AudioCache {
    /// Create a cache rooted at `dir`. The directory is not touched.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the audio directory if it is missing
    pub fn ensure_dir(&self) -> anyhow::Result<()> {
        FileManager::ensure_dir(&self.dir)
    }

    /// File name (`<stem>.mp3`) used for `word`
    pub fn file_name(&self, word: &str) -> String {
        format!("{}.{}", file_stem(word), AUDIO_EXTENSION)
    }

    /// Full path of the clip for `word`
    pub fn path_for(&self, word: &str) -> PathBuf {
        self.dir.join(self.file_name(word))
    }

    /// Whether a clip for `word` is already stored
    pub fn exists(&self, word: &str) -> bool {
        FileManager::file_exists(self.path_for(word))
    }

    /// The cached asset for `word`, if any
    pub fn lookup(&self, word: &str) -> Option<AudioAsset> {
        if !self.exists(word) {
            return None;
        }

        let path = self.path_for(word);
        debug!("Audio for '{}' already exists at {:?}", word, path);
        Some(AudioAsset {
            word: word.to_string(),
            path,
            was_cached: true,
        })
    }

    /// Store a freshly synthesized clip for `word`
    pub fn store(&self, word: &str, audio: &[u8]) -> std::io::Result<AudioAsset> {
        let path = self.path_for(word);
        FileManager::write_atomic(&path, audio)?;
        Ok(AudioAsset {
            word: word.to_string(),
            path,
            was_cached: false,
        })
    }

    /// Anki sound tag referencing the clip for `word`
    pub fn sound_tag(&self, word: &str) -> String {
        format!("[sound:{}]", self.file_name(word))
    }
}

/// File stem for a word
///
/// Plain words are used verbatim. Anything that had to be rewritten to be a
/// safe file name gets a hash suffix of the original word, so two different
/// words never share a stem. Words with uppercase letters and Windows device
/// names are suffixed too, which keeps stems distinct on case-insensitive
/// file systems.
pub fn file_stem(word: &str) -> String {
    let mut stem = UNSAFE_FILE_CHARS.replace_all(word, "_").into_owned();
    if stem.starts_with('.') {
        stem.replace_range(..1, "_");
    }
    while stem.ends_with(' ') || stem.ends_with('.') {
        stem.pop();
    }
    if stem.chars().count() > MAX_STEM_CHARS {
        stem = stem.chars().take(MAX_STEM_CHARS).collect();
    }
    if is_reserved(&stem) {
        stem.insert(0, '_');
    }

    if stem == word && !stem.is_empty() && !stem.chars().any(char::is_uppercase) {
        return stem;
    }

    let digest = format!("{:x}", Sha256::digest(word.as_bytes()));
    format!("{}-{}", stem, &digest[..8])
}

fn is_reserved(stem: &str) -> bool {
    let base = stem.split('.').next().unwrap_or_default().trim();
    RESERVED_STEMS.iter().any(|name| base.eq_ignore_ascii_case(name))
}
