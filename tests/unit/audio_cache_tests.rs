/*!
 * Tests for the audio cache and synthesizer
 */

use std::fs;
use std::sync::Arc;

use wordcards::audio::{AudioCache, AudioSynthesizer};
use wordcards::errors::SynthesisError;
use wordcards::file_utils::FileManager;

use crate::common::{create_temp_dir, list_files};
use crate::common::mock_providers::MockSpeech;

#[test]
fn test_exists_withMissingFile_shouldReturnFalse() {
    let temp_dir = create_temp_dir().unwrap();
    let cache = AudioCache::new(temp_dir.path());
    assert!(!cache.exists("hello"));
    assert!(cache.lookup("hello").is_none());
}

#[test]
fn test_exists_withZeroByteFile_shouldReturnTrue() {
    let temp_dir = create_temp_dir().unwrap();
    let cache = AudioCache::new(temp_dir.path());
    fs::write(temp_dir.path().join("hello.mp3"), b"").unwrap();

    assert!(cache.exists("hello"));
    let asset = cache.lookup("hello").unwrap();
    assert!(asset.was_cached);
    assert_eq!(asset.word, "hello");
}

#[test]
fn test_exists_withDirectoryAtClipPath_shouldReturnFalse() {
    let temp_dir = create_temp_dir().unwrap();
    let cache = AudioCache::new(temp_dir.path());
    fs::create_dir(temp_dir.path().join("hello.mp3")).unwrap();
    assert!(!cache.exists("hello"));
}

#[test]
fn test_store_shouldWriteAtCheckedPathWithoutLeftovers() {
    let temp_dir = create_temp_dir().unwrap();
    let cache = AudioCache::new(temp_dir.path());

    let asset = cache.store("hello", b"mp3 data").unwrap();

    assert_eq!(asset.path, cache.path_for("hello"));
    assert!(!asset.was_cached);
    assert!(cache.exists("hello"));
    assert_eq!(fs::read(&asset.path).unwrap(), b"mp3 data");
    assert_eq!(list_files(temp_dir.path()), vec!["hello.mp3"]);
}

#[test]
fn test_store_withExistingClip_shouldReplaceContent() {
    let temp_dir = create_temp_dir().unwrap();
    let cache = AudioCache::new(temp_dir.path());
    fs::write(cache.path_for("hello"), b"truncated").unwrap();

    cache.store("hello", b"complete clip").unwrap();

    assert_eq!(fs::read(cache.path_for("hello")).unwrap(), b"complete clip");
}

#[test]
fn test_ensure_dir_withNestedMissingDir_shouldCreateIt() {
    let temp_dir = create_temp_dir().unwrap();
    let audio_dir = temp_dir.path().join("deck").join("audio");
    let cache = AudioCache::new(&audio_dir);

    cache.ensure_dir().unwrap();

    assert!(audio_dir.is_dir());
    assert!(cache.store("hello", b"x").is_ok());
}

#[test]
fn test_ensure_dir_withFileInTheWay_shouldFail() {
    let temp_dir = create_temp_dir().unwrap();
    let blocked = temp_dir.path().join("audio");
    fs::write(&blocked, b"not a directory").unwrap();

    assert!(AudioCache::new(&blocked).ensure_dir().is_err());
}

#[test]
fn test_write_atomic_shouldWriteFullContent() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("clip.mp3");
    FileManager::write_atomic(&path, b"abc").unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"abc");
}

#[tokio::test]
async fn test_synthesize_shouldStoreAtCachePath() {
    let temp_dir = create_temp_dir().unwrap();
    let cache = AudioCache::new(temp_dir.path());
    let speech = Arc::new(MockSpeech::new());
    let synthesizer = AudioSynthesizer::new(speech.clone(), cache.clone());

    let asset = synthesizer.synthesize("bonjour").await.unwrap();

    assert_eq!(asset.path, cache.path_for("bonjour"));
    assert!(cache.exists("bonjour"));
    assert_eq!(fs::read(&asset.path).unwrap(), MockSpeech::audio_for("bonjour"));
    assert_eq!(speech.calls(), vec!["bonjour"]);
}

#[tokio::test]
async fn test_synthesize_withProviderError_shouldLeaveNoFile() {
    let temp_dir = create_temp_dir().unwrap();
    let cache = AudioCache::new(temp_dir.path());
    let synthesizer = AudioSynthesizer::new(Arc::new(MockSpeech::new().failing_on("hello")), cache.clone());

    let result = synthesizer.synthesize("hello").await;

    assert!(matches!(result, Err(SynthesisError::Provider { .. })));
    assert!(!cache.exists("hello"));
    assert!(list_files(temp_dir.path()).is_empty());
}

#[tokio::test]
async fn test_synthesize_withMissingAudioDir_shouldReportStorageError() {
    let temp_dir = create_temp_dir().unwrap();
    let cache = AudioCache::new(temp_dir.path().join("missing"));
    let synthesizer = AudioSynthesizer::new(Arc::new(MockSpeech::new()), cache.clone());

    let result = synthesizer.synthesize("hello").await;

    assert!(matches!(result, Err(SynthesisError::Storage { .. })));
    assert!(!cache.exists("hello"));
}
