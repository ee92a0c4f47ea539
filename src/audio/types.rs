//! Audio metadata and the capability sets declared to the host.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Container format of the incoming stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AudioFormat {
    Wav,
    Ogg,
    /// Any container the integration does not recognise; submitted as raw bytes.
    Other(String),
}

impl AudioFormat {
    pub fn as_str(&self) -> &str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Other(s) => s,
        }
    }

    /// Guess the container from a file extension.
    pub fn from_extension(ext: &str) -> Self {
        Self::from(ext.to_string())
    }
}

impl From<String> for AudioFormat {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "wav" => AudioFormat::Wav,
            "ogg" => AudioFormat::Ogg,
            _ => AudioFormat::Other(s),
        }
    }
}

impl From<AudioFormat> for String {
    fn from(f: AudioFormat) -> Self {
        f.as_str().to_string()
    }
}

impl FromStr for AudioFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCodec {
    Pcm,
    Opus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioSampleRate {
    #[serde(rename = "8000")]
    Hz8000,
    #[serde(rename = "16000")]
    Hz16000,
    #[serde(rename = "22000")]
    Hz22000,
    #[serde(rename = "44000")]
    Hz44000,
    #[serde(rename = "48000")]
    Hz48000,
}

impl AudioSampleRate {
    pub fn hz(&self) -> u32 {
        match self {
            AudioSampleRate::Hz8000 => 8_000,
            AudioSampleRate::Hz16000 => 16_000,
            AudioSampleRate::Hz22000 => 22_000,
            AudioSampleRate::Hz44000 => 44_000,
            AudioSampleRate::Hz48000 => 48_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioChannels {
    Mono,
    Stereo,
}

impl AudioChannels {
    pub fn count(&self) -> u16 {
        match self {
            AudioChannels::Mono => 1,
            AudioChannels::Stereo => 2,
        }
    }
}

/// Bits per sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioBitRate {
    #[serde(rename = "16")]
    Bits16,
    #[serde(rename = "32")]
    Bits32,
}

impl AudioBitRate {
    pub fn bits(&self) -> u16 {
        match self {
            AudioBitRate::Bits16 => 16,
            AudioBitRate::Bits32 => 32,
        }
    }
}

/// Declared properties of one utterance, supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub format: AudioFormat,
    pub codec: AudioCodec,
    pub bit_rate: AudioBitRate,
    pub sample_rate: AudioSampleRate,
    pub channel: AudioChannels,
}

impl AudioMetadata {
    /// 16 kHz mono 16-bit PCM WAV, the host's default voice pipeline format.
    pub fn wav_pcm_16k_mono() -> Self {
        Self {
            language: None,
            format: AudioFormat::Wav,
            codec: AudioCodec::Pcm,
            bit_rate: AudioBitRate::Bits16,
            sample_rate: AudioSampleRate::Hz16000,
            channel: AudioChannels::Mono,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_format(mut self, format: AudioFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_codec(mut self, codec: AudioCodec) -> Self {
        self.codec = codec;
        self
    }
}

/// Capability sets an STT backend declares to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioCapabilities {
    pub formats: Vec<AudioFormat>,
    pub codecs: Vec<AudioCodec>,
    pub sample_rates: Vec<AudioSampleRate>,
    pub channels: Vec<AudioChannels>,
    pub bit_rates: Vec<AudioBitRate>,
}

impl AudioCapabilities {
    /// Everything the Parasail Whisper endpoint is declared to accept.
    pub fn parasail() -> Self {
        Self {
            formats: vec![AudioFormat::Wav, AudioFormat::Ogg],
            codecs: vec![AudioCodec::Pcm, AudioCodec::Opus],
            sample_rates: vec![
                AudioSampleRate::Hz8000,
                AudioSampleRate::Hz16000,
                AudioSampleRate::Hz22000,
                AudioSampleRate::Hz44000,
                AudioSampleRate::Hz48000,
            ],
            channels: vec![AudioChannels::Mono, AudioChannels::Stereo],
            bit_rates: vec![AudioBitRate::Bits16, AudioBitRate::Bits32],
        }
    }

    /// Whether every declared property of `metadata` is in the supported sets.
    /// Language is checked separately against the language list.
    pub fn supports(&self, metadata: &AudioMetadata) -> bool {
        self.formats.contains(&metadata.format)
            && self.codecs.contains(&metadata.codec)
            && self.sample_rates.contains(&metadata.sample_rate)
            && self.channels.contains(&metadata.channel)
            && self.bit_rates.contains(&metadata.bit_rate)
    }
}
