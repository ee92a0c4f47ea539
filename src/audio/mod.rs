//! 音频模块：元数据、能力声明、流缓冲与格式分类。
//!
//! Audio metadata, declared capabilities, stream buffering, and format
//! classification for uploads.

mod buffer;
mod classify;
mod types;
pub mod wav;

pub use buffer::collect_audio;
pub use classify::{classify, normalize_language, AudioClassification};
pub use types::{
    AudioBitRate, AudioCapabilities, AudioChannels, AudioCodec, AudioFormat, AudioMetadata,
    AudioSampleRate,
};
