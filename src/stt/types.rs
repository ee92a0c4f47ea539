//! STT (Speech-to-Text) types.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::audio::AudioClassification;
use crate::models::SttModel;

/// Bearer token for the Parasail API. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credentials(String);

impl Credentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self(api_key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credentials(***)")
    }
}

/// Fully assembled upload for one transcription call.
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub audio: Bytes,
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub model: SttModel,
    pub language: Option<String>,
}

impl SubmissionRequest {
    pub fn new(audio: Bytes, classification: AudioClassification, model: SttModel) -> Self {
        Self {
            audio,
            file_name: classification.file_name,
            content_type: classification.content_type,
            model,
            language: None,
        }
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }
}

/// Body of a successful transcription response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TranscriptionResponse {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechResultState {
    Success,
    Error,
}

/// Outcome of one transcription, handed back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechResult {
    pub text: String,
    pub result: SpeechResultState,
}

impl SpeechResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            result: SpeechResultState::Success,
        }
    }

    pub fn error() -> Self {
        Self {
            text: String::new(),
            result: SpeechResultState::Error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.result == SpeechResultState::Success
    }
}
