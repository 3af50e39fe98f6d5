/*!
 * On-disk pronunciation clips.
 *
 * - `cache`: deterministic file naming and the existence check
 * - `synthesizer`: fetches a clip from the speech service and stores it
 *
 * Both halves derive file paths from the same `AudioCache`, so the path
 * checked for a word is always the path written for it.
 */

use std::path::PathBuf;

pub mod cache;
pub mod synthesizer;

pub use cache::AudioCache;
pub use synthesizer::AudioSynthesizer;

/// A pronunciation clip present in the audio directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioAsset {
    /// Word the clip pronounces
    pub word: String,
    /// Location of the clip
    pub path: PathBuf,
    /// True when the clip existed before this run touched it
    pub was_cached: bool,
}
