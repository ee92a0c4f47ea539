//! Buffer, classify, submit, and fold the outcome into a [`SpeechResult`].

use std::sync::Arc;

use bytes::Bytes;
use futures::Stream;
use tracing::{debug, error};

use super::client::TranscriptionBackend;
use super::types::{Credentials, SpeechResult, SubmissionRequest};
use crate::audio::{classify, collect_audio, normalize_language, AudioMetadata};
use crate::models::SttModel;
use crate::{Error, ErrorContext, Result};

/// Turns one audio stream into one transcript.
///
/// Every call owns its buffer; the backend is shared read-only, so any number
/// of transcriptions may run concurrently on the same submitter.
#[derive(Clone)]
pub struct TranscriptionSubmitter {
    backend: Arc<dyn TranscriptionBackend>,
}

impl TranscriptionSubmitter {
    pub fn new(backend: Arc<dyn TranscriptionBackend>) -> Self {
        Self { backend }
    }

    /// Transcribe a finite audio stream.
    ///
    /// Never fails: empty audio, stream errors, transport failures, rejected
    /// credentials and malformed responses all come back as
    /// [`SpeechResult::error`]. Details go to the log.
    pub async fn transcribe<S>(
        &self,
        metadata: &AudioMetadata,
        stream: S,
        credentials: &Credentials,
        model: SttModel,
    ) -> SpeechResult
    where
        S: Stream<Item = Result<Bytes>> + Unpin,
    {
        let language = normalize_language(metadata.language.as_deref());
        let mut received = 0;
        let audio = match collect_audio(stream, &mut received).await {
            Ok(audio) => audio,
            Err(err) => {
                error!(
                    error = %err,
                    format = %metadata.format,
                    language = ?language,
                    model = %model,
                    size = received,
                    "Failed to read audio stream"
                );
                return SpeechResult::error();
            }
        };
        debug!(bytes = audio.len(), "Collected audio data");
        if audio.is_empty() {
            debug!(error = %Error::EmptyAudio, format = %metadata.format, "Skipping transcription");
            return SpeechResult::error();
        }

        let request = SubmissionRequest::new(audio, classify(&metadata.format), model)
            .with_language(language.clone());
        let size = request.audio.len();
        debug!(
            format = %metadata.format,
            language = ?language,
            model = %model,
            size,
            content_type = request.content_type,
            "Transcribing audio"
        );

        match self.submit(credentials.clone(), request).await {
            Ok(text) => {
                debug!(text = %text, "Transcription result");
                SpeechResult::success(text)
            }
            Err(err) => {
                error!(
                    error = %err,
                    code = %err.code(),
                    format = %metadata.format,
                    language = ?language,
                    model = %model,
                    size,
                    "Error during transcription"
                );
                SpeechResult::error()
            }
        }
    }

    /// Run the blocking backend call on the blocking pool.
    pub(crate) async fn submit(
        &self,
        credentials: Credentials,
        request: SubmissionRequest,
    ) -> Result<String> {
        let backend = Arc::clone(&self.backend);
        tokio::task::spawn_blocking(move || backend.transcribe(&credentials, &request))
            .await
            .map_err(|e| {
                Error::runtime_with_context(
                    format!("Transcription worker failed: {}", e),
                    ErrorContext::new().with_source("stt"),
                )
            })?
    }
}

impl std::fmt::Debug for TranscriptionSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscriptionSubmitter").finish_non_exhaustive()
    }
}
