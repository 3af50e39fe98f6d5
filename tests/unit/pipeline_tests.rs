/*!
 * Tests for the per-word pipeline
 */

use std::fs;
use std::sync::Arc;

use wordcards::audio::AudioCache;
use wordcards::pipeline::{OutputRow, PipelineSummary, SkipReason, WordOutcome, WordPipeline};

use crate::common::{create_temp_dir, entries};
use crate::common::mock_providers::{MockDictionary, MockSpeech};

fn emitted_rows(outcomes: &[WordOutcome]) -> Vec<OutputRow> {
    outcomes.iter().filter_map(|o| o.row().cloned()).collect()
}

#[tokio::test]
async fn test_run_withFreshWord_shouldEmitRowAndWriteAudio() {
    let temp_dir = create_temp_dir().unwrap();
    let cache = AudioCache::new(temp_dir.path());
    let dictionary = Arc::new(MockDictionary::new().with_translation("hello", "привет"));
    let speech = Arc::new(MockSpeech::new());
    let pipeline = WordPipeline::new(dictionary.clone(), speech.clone(), cache);

    let outcomes = pipeline.run(&entries(&[("hello", "a greeting")])).await;

    assert_eq!(emitted_rows(&outcomes), vec![OutputRow {
        word: "hello".to_string(),
        example: "a greeting".to_string(),
        sound_reference: "[sound:hello.mp3]".to_string(),
        translation: "привет".to_string(),
    }]);

    let audio_path = temp_dir.path().join("hello.mp3");
    assert!(audio_path.is_file());
    assert_eq!(fs::read(&audio_path).unwrap(), MockSpeech::audio_for("hello"));
    assert_eq!(speech.calls(), vec!["hello"]);

    match &outcomes[0] {
        WordOutcome::Emitted { audio, .. } => {
            assert!(!audio.was_cached);
            assert_eq!(audio.path, audio_path);
        }
        other => panic!("Expected emitted outcome, got {:?}", other),
    }
}

#[tokio::test]
async fn test_run_withEmptyDictionaryAnswer_shouldEmitRowWithEmptyTranslation() {
    let temp_dir = create_temp_dir().unwrap();
    let dictionary = Arc::new(MockDictionary::new());
    let speech = Arc::new(MockSpeech::new());
    let pipeline = WordPipeline::new(dictionary, speech.clone(), AudioCache::new(temp_dir.path()));

    let outcomes = pipeline.run(&entries(&[("hello", "a greeting")])).await;

    let rows = emitted_rows(&outcomes);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].translation, "");
    assert_eq!(rows[0].sound_reference, "[sound:hello.mp3]");
    assert_eq!(speech.calls(), vec!["hello"]);
    assert!(temp_dir.path().join("hello.mp3").is_file());
}

#[tokio::test]
async fn test_run_withCachedAudio_shouldNeverCallSynthesizer() {
    let temp_dir = create_temp_dir().unwrap();
    // Zero-byte file still counts as cached
    fs::write(temp_dir.path().join("hello.mp3"), b"").unwrap();

    let dictionary = Arc::new(MockDictionary::new().with_translation("hello", "привет"));
    let speech = Arc::new(MockSpeech::new().failing_on("hello"));
    let pipeline = WordPipeline::new(dictionary, speech.clone(), AudioCache::new(temp_dir.path()));

    let outcomes = pipeline.run(&entries(&[("hello", "a greeting")])).await;

    assert!(speech.calls().is_empty());
    assert_eq!(emitted_rows(&outcomes).len(), 1);
    match &outcomes[0] {
        WordOutcome::Emitted { audio, .. } => assert!(audio.was_cached),
        other => panic!("Expected emitted outcome, got {:?}", other),
    }
    assert_eq!(fs::read(temp_dir.path().join("hello.mp3")).unwrap(), b"");
}

#[tokio::test]
async fn test_run_withSynthesisFailure_shouldSkipWordAndWriteNoAudio() {
    let temp_dir = create_temp_dir().unwrap();
    let dictionary = Arc::new(MockDictionary::new().with_translation("hello", "привет"));
    let speech = Arc::new(MockSpeech::new().failing_on("hello"));
    let pipeline = WordPipeline::new(dictionary, speech, AudioCache::new(temp_dir.path()));

    let outcomes = pipeline.run(&entries(&[("hello", "a greeting")])).await;

    assert!(emitted_rows(&outcomes).is_empty());
    match &outcomes[0] {
        WordOutcome::Skipped { word, reason, detail } => {
            assert_eq!(word, "hello");
            assert_eq!(*reason, SkipReason::SynthesisFailed);
            assert!(detail.contains("401"));
        }
        other => panic!("Expected skipped outcome, got {:?}", other),
    }
    assert!(!temp_dir.path().join("hello.mp3").exists());
}

#[tokio::test]
async fn test_run_withTranslationFailure_shouldSkipBeforeAudioStage() {
    let temp_dir = create_temp_dir().unwrap();
    let dictionary = Arc::new(MockDictionary::new().failing_on("hello"));
    let speech = Arc::new(MockSpeech::new());
    let pipeline = WordPipeline::new(dictionary, speech.clone(), AudioCache::new(temp_dir.path()));

    let outcomes = pipeline.run(&entries(&[("hello", "a greeting")])).await;

    assert_eq!(outcomes.len(), 1);
    assert!(matches!(
        &outcomes[0],
        WordOutcome::Skipped { reason: SkipReason::TranslationFailed, .. }
    ));
    assert!(speech.calls().is_empty());
    assert!(!temp_dir.path().join("hello.mp3").exists());
}

#[tokio::test]
async fn test_run_withMiddleFailures_shouldPreserveOrderOfRemainingRows() {
    let temp_dir = create_temp_dir().unwrap();
    let dictionary = Arc::new(
        MockDictionary::new()
            .with_translation("one", "один")
            .with_translation("three", "три")
            .with_translation("five", "пять")
            .failing_on("two"),
    );
    let speech = Arc::new(MockSpeech::new().failing_on("four"));
    let pipeline = WordPipeline::new(dictionary.clone(), speech.clone(), AudioCache::new(temp_dir.path()));

    let input = entries(&[
        ("one", "1"),
        ("two", "2"),
        ("three", "3"),
        ("four", "4"),
        ("five", "5"),
    ]);
    let outcomes = pipeline.run(&input).await;

    // Every entry is attempted, in order
    assert_eq!(dictionary.calls(), vec!["one", "two", "three", "four", "five"]);
    assert_eq!(speech.calls(), vec!["one", "three", "four", "five"]);

    let words: Vec<&str> = outcomes.iter().map(|o| o.word()).collect();
    assert_eq!(words, vec!["one", "two", "three", "four", "five"]);

    let rows: Vec<String> = emitted_rows(&outcomes).into_iter().map(|r| r.word).collect();
    assert_eq!(rows, vec!["one", "three", "five"]);

    let summary = PipelineSummary::from_outcomes(&outcomes);
    assert_eq!(summary, PipelineSummary {
        emitted: 3,
        translation_failures: 1,
        synthesis_failures: 1,
        cache_hits: 0,
        synthesized: 3,
    });
    assert_eq!(summary.skipped(), 2);
}

#[tokio::test]
async fn test_run_withRepeatedWord_shouldSynthesizeOnlyOnce() {
    let temp_dir = create_temp_dir().unwrap();
    let dictionary = Arc::new(MockDictionary::new());
    let speech = Arc::new(MockSpeech::new());
    let pipeline = WordPipeline::new(dictionary, speech.clone(), AudioCache::new(temp_dir.path()));

    let outcomes = pipeline.run(&entries(&[("run", "to move fast"), ("run", "a score in cricket")])).await;

    assert_eq!(speech.calls(), vec!["run"]);
    let rows = emitted_rows(&outcomes);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].example, "a score in cricket");
    assert_eq!(PipelineSummary::from_outcomes(&outcomes).cache_hits, 1);
}

#[tokio::test]
async fn test_run_withSecondRun_shouldReuseEveryClip() {
    let temp_dir = create_temp_dir().unwrap();
    let input = entries(&[("hello", "a greeting"), ("world", "the earth")]);

    let first_speech = Arc::new(MockSpeech::new());
    let first = WordPipeline::new(Arc::new(MockDictionary::new()), first_speech.clone(), AudioCache::new(temp_dir.path()));
    first.run(&input).await;
    assert_eq!(first_speech.calls().len(), 2);

    let second_speech = Arc::new(MockSpeech::new());
    let second = WordPipeline::new(Arc::new(MockDictionary::new()), second_speech.clone(), AudioCache::new(temp_dir.path()));
    let outcomes = second.run(&input).await;

    assert!(second_speech.calls().is_empty());
    assert_eq!(emitted_rows(&outcomes).len(), 2);
}

#[tokio::test]
async fn test_process_entry_withUnsafeWord_shouldReferenceStoredFile() {
    let temp_dir = create_temp_dir().unwrap();
    let cache = AudioCache::new(temp_dir.path());
    let pipeline = WordPipeline::new(Arc::new(MockDictionary::new()), Arc::new(MockSpeech::new()), cache.clone());

    let outcome = pipeline.process_entry(&entries(&[("and/or", "either")])[0]).await;

    let row = outcome.row().expect("row should be emitted");
    let file_name = cache.file_name("and/or");
    assert_eq!(row.sound_reference, format!("[sound:{}]", file_name));
    assert!(temp_dir.path().join(&file_name).is_file());
    assert!(!file_name.contains('/'));
}
