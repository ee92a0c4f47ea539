//! Transcription submitter behaviour against mock backends.

mod common;

use std::sync::Arc;

use bytes::Bytes;
use common::{MockBackend, Reply};
use parasail_stt::audio::{AudioFormat, AudioMetadata};
use parasail_stt::stt::{Credentials, TranscriptionSubmitter};
use parasail_stt::{Error, ErrorContext, Result, SpeechResult, SpeechResultState, SttModel};
use tokio_stream::StreamExt;

fn chunk_stream(parts: &[&str]) -> impl tokio_stream::Stream<Item = Result<Bytes>> + Unpin {
    let owned: Vec<Result<Bytes>> = parts
        .iter()
        .map(|p| Ok(Bytes::copy_from_slice(p.as_bytes())))
        .collect();
    tokio_stream::iter(owned)
}

fn setup(reply: Reply) -> (Arc<MockBackend>, TranscriptionSubmitter) {
    let backend = Arc::new(MockBackend::new(reply));
    let submitter = TranscriptionSubmitter::new(backend.clone());
    (backend, submitter)
}

fn key() -> Credentials {
    Credentials::new("test-key")
}

#[tokio::test]
async fn test_success_returns_transcript() {
    let (backend, submitter) = setup(Reply::Text("hello world"));
    let result = submitter
        .transcribe(
            &AudioMetadata::wav_pcm_16k_mono(),
            chunk_stream(&["RIFF", "data"]),
            &key(),
            SttModel::default(),
        )
        .await;

    assert_eq!(result, SpeechResult::success("hello world"));
    assert_eq!(result.result, SpeechResultState::Success);
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_empty_stream_skips_network_call() {
    let (backend, submitter) = setup(Reply::Text("should not be returned"));

    for parts in [&[][..], &["", ""][..]] {
        let result = submitter
            .transcribe(
                &AudioMetadata::wav_pcm_16k_mono(),
                chunk_stream(parts),
                &key(),
                SttModel::default(),
            )
            .await;
        assert_eq!(result, SpeechResult::error());
        assert!(result.text.is_empty());
    }
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_request_carries_classified_payload() {
    let (backend, submitter) = setup(Reply::Text("ok"));
    let metadata = AudioMetadata::wav_pcm_16k_mono()
        .with_format(AudioFormat::Ogg)
        .with_language("de");

    submitter
        .transcribe(
            &metadata,
            chunk_stream(&["Og", "gS", "payload"]),
            &key(),
            SttModel::WhisperLargeV3,
        )
        .await;

    let req = backend.last_request().expect("backend was called");
    assert_eq!(&req.audio[..], b"OggSpayload");
    assert_eq!(req.file_name, "audio.ogg");
    assert_eq!(req.content_type, "audio/ogg");
    assert_eq!(req.model, "openai/whisper-large-v3");
    assert_eq!(req.language.as_deref(), Some("de"));
    assert_eq!(req.api_key, "test-key");
}

#[tokio::test]
async fn test_unknown_format_and_long_language_hint() {
    let (backend, submitter) = setup(Reply::Text("ok"));
    let metadata = AudioMetadata::wav_pcm_16k_mono()
        .with_format(AudioFormat::Other("flac".into()))
        .with_language("haw");

    let result = submitter
        .transcribe(&metadata, chunk_stream(&["fLaC"]), &key(), SttModel::default())
        .await;

    assert!(result.is_success());
    let req = backend.last_request().unwrap();
    assert_eq!(req.file_name, "audio.raw");
    assert_eq!(req.content_type, "application/octet-stream");
    assert_eq!(req.language, None);
}

#[tokio::test]
async fn test_every_failure_collapses_to_error() {
    for reply in [
        Reply::Unauthorized,
        Reply::ServerError,
        Reply::Network,
        Reply::Malformed,
        Reply::Panic,
    ] {
        let (backend, submitter) = setup(reply);
        let result = submitter
            .transcribe(
                &AudioMetadata::wav_pcm_16k_mono(),
                chunk_stream(&["RIFF"]),
                &key(),
                SttModel::default(),
            )
            .await;
        assert_eq!(result.result, SpeechResultState::Error);
        assert_eq!(result.text, "");
        assert_eq!(backend.calls(), 1);
    }
}

#[tokio::test]
async fn test_stream_error_is_error_without_network_call() {
    let (backend, submitter) = setup(Reply::Text("unused"));
    let failing = chunk_stream(&["RIFF"]).chain(tokio_stream::once(Err(
        Error::runtime_with_context("pipeline closed", ErrorContext::new()),
    )));

    let result = submitter
        .transcribe(
            &AudioMetadata::wav_pcm_16k_mono(),
            failing,
            &key(),
            SttModel::default(),
        )
        .await;

    assert_eq!(result, SpeechResult::error());
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_silence_may_succeed_with_empty_text() {
    let (_backend, submitter) = setup(Reply::Text(""));
    let result = submitter
        .transcribe(
            &AudioMetadata::wav_pcm_16k_mono(),
            chunk_stream(&["\0\0\0\0"]),
            &key(),
            SttModel::default(),
        )
        .await;
    assert_eq!(result.result, SpeechResultState::Success);
    assert!(result.text.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_transcriptions_keep_buffers_separate() {
    let (backend, submitter) = setup(Reply::Echo);
    let inputs: Vec<Vec<String>> = (0..8)
        .map(|i| (0..5).map(|j| format!("u{i}c{j};")).collect())
        .collect();

    let tasks = inputs.iter().cloned().map(|parts| {
        let submitter = submitter.clone();
        tokio::spawn(async move {
            let refs: Vec<&str> = parts.iter().map(String::as_str).collect();
            submitter
                .transcribe(
                    &AudioMetadata::wav_pcm_16k_mono(),
                    chunk_stream(&refs),
                    &key(),
                    SttModel::default(),
                )
                .await
        })
    });
    let results = futures::future::join_all(tasks).await;

    for (parts, result) in inputs.iter().zip(results) {
        let result = result.expect("task panicked");
        assert!(result.is_success());
        assert_eq!(result.text, parts.concat());
    }
    assert_eq!(backend.calls(), 8);
}
