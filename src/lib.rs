//! # parasail-stt
//!
//! Parasail 云端语音转文字（STT）后端：缓冲音频流，以 multipart 方式上传，返回转录文本。
//!
//! Parasail cloud speech-to-text backend for home-automation hosts.
//!
//! ## Overview
//!
//! The crate exposes Parasail's OpenAI-compatible Whisper endpoint as a
//! selectable transcription backend. A host hands over one finite audio stream
//! per utterance; the audio is buffered, classified, uploaded as multipart
//! form data, and the transcript comes back as a bounded [`SpeechResult`]
//! that is either `Success` with text or `Error` with empty text.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bytes::Bytes;
//! use parasail_stt::audio::AudioMetadata;
//! use parasail_stt::config::{ConfigEntry, EntryData};
//! use parasail_stt::entity::{async_setup_entry, SpeechToTextEntity};
//! use parasail_stt::registry::EntityRegistry;
//! use parasail_stt::stt::{Credentials, ParasailClient};
//! use parasail_stt::SttModel;
//!
//! #[tokio::main]
//! async fn main() -> parasail_stt::Result<()> {
//!     let backend = Arc::new(ParasailClient::builder().build()?);
//!     let entry = ConfigEntry::new(
//!         "Parasail STT",
//!         EntryData { api_key: Credentials::new("your-api-key"), model: SttModel::default() },
//!     );
//!     let registry = EntityRegistry::new();
//!     let entity = async_setup_entry(&registry, entry, backend).await?;
//!
//!     let chunks: Vec<parasail_stt::Result<Bytes>> = vec![Ok(Bytes::from_static(b"RIFF..."))];
//!     let result = entity
//!         .process_audio_stream(
//!             AudioMetadata::wav_pcm_16k_mono().with_language("en"),
//!             Box::pin(futures::stream::iter(chunks)),
//!         )
//!         .await;
//!     println!("{:?}: {}", result.result, result.text);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`audio`] | Metadata, declared capabilities, buffering, format classification |
//! | [`stt`] | Transcription submitter and the Parasail HTTP client |
//! | [`config`] | Client settings, persisted entries, setup and options flows |
//! | [`entity`] | Host capability contract and the Parasail entity |
//! | [`registry`] | Registry of entities offered to the host |
//! | [`models`] | Model identifiers, endpoint constants, language list |

pub mod audio;
pub mod config;
pub mod entity;
pub mod error_code;
pub mod models;
pub mod registry;
pub mod stt;

pub use models::SttModel;
pub use stt::{SpeechResult, SpeechResultState};

use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A single-pass stream of audio chunks delivered by the host.
pub type AudioStream<'a> = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send + 'a>>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
