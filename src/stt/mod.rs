//! STT（语音转文字）模块：缓冲音频流并通过 Parasail API 转录为文本。
//!
//! Speech-to-text submission against the Parasail transcription endpoint.

mod client;
mod submitter;
mod types;

pub use client::{ParasailClient, ParasailClientBuilder, TranscriptionBackend};
pub use submitter::TranscriptionSubmitter;
pub use types::{Credentials, SpeechResult, SpeechResultState, SubmissionRequest};
