//! Silent WAV clips for the credential probe.

use std::io::Cursor;

use bytes::Bytes;
use hound::{SampleFormat, WavSpec, WavWriter};

use super::{AudioChannels, AudioSampleRate};
use crate::{Error, ErrorContext, Result};

/// Sample rate of the probe clip.
pub const PROBE_SAMPLE_RATE: AudioSampleRate = AudioSampleRate::Hz16000;
/// 0.1 s at 16 kHz.
pub const PROBE_SAMPLE_COUNT: u32 = 1_600;

const BYTES_PER_SAMPLE: u64 = 2;
// RIFF chunk size is a u32 and covers everything after the first 8 bytes.
const MAX_DATA_LEN: u64 = u32::MAX as u64 - 36;

/// 16-bit PCM WAV file of `sample_count` zero-valued frames.
pub fn silent_wav(
    sample_rate: AudioSampleRate,
    channels: AudioChannels,
    sample_count: u32,
) -> Result<Bytes> {
    let data_len = u64::from(sample_count) * u64::from(channels.count()) * BYTES_PER_SAMPLE;
    if data_len > MAX_DATA_LEN {
        return Err(Error::validation_with_context(
            format!("{} frames do not fit in a WAV file", sample_count),
            ErrorContext::new().with_source("wav"),
        ));
    }

    let spec = WavSpec {
        channels: channels.count(),
        sample_rate: sample_rate.hz(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(44 + data_len as usize));
    {
        let mut writer = WavWriter::new(&mut cursor, spec)?;
        for _ in 0..sample_count * u32::from(channels.count()) {
            writer.write_sample(0i16)?;
        }
        writer.finalize()?;
    }

    Ok(Bytes::from(cursor.into_inner()))
}

/// The clip submitted when validating credentials: 0.1 s of mono silence.
pub fn probe_clip() -> Result<Bytes> {
    silent_wav(PROBE_SAMPLE_RATE, AudioChannels::Mono, PROBE_SAMPLE_COUNT)
}
