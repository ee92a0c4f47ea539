//! Host-facing speech-to-text capability and the Parasail implementation.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use crate::audio::{
    AudioBitRate, AudioCapabilities, AudioChannels, AudioCodec, AudioFormat, AudioMetadata,
    AudioSampleRate,
};
use crate::config::ConfigEntry;
use crate::models::SUPPORTED_LANGUAGES;
use crate::registry::EntityRegistry;
use crate::stt::{SpeechResult, TranscriptionBackend, TranscriptionSubmitter};
use crate::{AudioStream, Result};

/// Contract a transcription backend satisfies to be offered by the host.
#[async_trait]
pub trait SpeechToTextEntity: Send + Sync {
    fn name(&self) -> &str;
    fn unique_id(&self) -> &str;
    fn supported_languages(&self) -> &[&'static str];
    fn supported_formats(&self) -> Vec<AudioFormat>;
    fn supported_codecs(&self) -> Vec<AudioCodec>;
    fn supported_bit_rates(&self) -> Vec<AudioBitRate>;
    fn supported_sample_rates(&self) -> Vec<AudioSampleRate>;
    fn supported_channels(&self) -> Vec<AudioChannels>;

    /// Whether the host may route audio described by `metadata` here.
    fn check_metadata(&self, metadata: &AudioMetadata) -> bool {
        let caps = AudioCapabilities {
            formats: self.supported_formats(),
            codecs: self.supported_codecs(),
            sample_rates: self.supported_sample_rates(),
            channels: self.supported_channels(),
            bit_rates: self.supported_bit_rates(),
        };
        let language_ok = metadata
            .language
            .as_deref()
            .map_or(true, |lang| self.supported_languages().iter().any(|l| *l == lang));
        language_ok && caps.supports(metadata)
    }

    async fn process_audio_stream(
        &self,
        metadata: AudioMetadata,
        stream: AudioStream<'_>,
    ) -> SpeechResult;
}

/// Parasail speech-to-text entity bound to one config entry.
pub struct ParasailSttEntity {
    entry: ConfigEntry,
    name: String,
    submitter: TranscriptionSubmitter,
    capabilities: AudioCapabilities,
}

impl ParasailSttEntity {
    pub fn new(entry: ConfigEntry, backend: Arc<dyn TranscriptionBackend>) -> Self {
        let name = format!("Parasail STT {}", entry.data.model);
        Self {
            entry,
            name,
            submitter: TranscriptionSubmitter::new(backend),
            capabilities: AudioCapabilities::parasail(),
        }
    }
}

#[async_trait]
impl SpeechToTextEntity for ParasailSttEntity {
    fn name(&self) -> &str {
        &self.name
    }

    fn unique_id(&self) -> &str {
        &self.entry.entry_id
    }

    fn supported_languages(&self) -> &[&'static str] {
        SUPPORTED_LANGUAGES
    }

    fn supported_formats(&self) -> Vec<AudioFormat> {
        self.capabilities.formats.clone()
    }

    fn supported_codecs(&self) -> Vec<AudioCodec> {
        self.capabilities.codecs.clone()
    }

    fn supported_bit_rates(&self) -> Vec<AudioBitRate> {
        self.capabilities.bit_rates.clone()
    }

    fn supported_sample_rates(&self) -> Vec<AudioSampleRate> {
        self.capabilities.sample_rates.clone()
    }

    fn supported_channels(&self) -> Vec<AudioChannels> {
        self.capabilities.channels.clone()
    }

    async fn process_audio_stream(
        &self,
        metadata: AudioMetadata,
        stream: AudioStream<'_>,
    ) -> SpeechResult {
        debug!(?metadata, entity = %self.name, "Processing audio stream");
        let model = self.entry.effective_model();
        self.submitter
            .transcribe(&metadata, stream, &self.entry.data.api_key, model)
            .await
    }
}

/// Create the entity for `entry` and register it with the host registry.
pub async fn async_setup_entry(
    registry: &EntityRegistry,
    entry: ConfigEntry,
    backend: Arc<dyn TranscriptionBackend>,
) -> Result<Arc<ParasailSttEntity>> {
    let entity = Arc::new(ParasailSttEntity::new(entry, backend));
    registry.register(entity.clone()).await?;
    info!(entity = %entity.name(), unique_id = %entity.unique_id(), "Set up Parasail STT entity");
    Ok(entity)
}
