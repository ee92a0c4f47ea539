//! Remote model identifiers, endpoint constants, and the language list.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, ErrorContext};

/// Integration domain, used for the store and entity naming.
pub const DOMAIN: &str = "parasail_stt";

/// Base URL of the Parasail OpenAI-compatible API.
pub const PARASAIL_API_BASE: &str = "https://api.parasail.io/v1";

/// Transcription endpoint, relative to the base URL.
pub const TRANSCRIPTIONS_PATH: &str = "/audio/transcriptions";

/// Whisper variants hosted by Parasail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SttModel {
    #[default]
    #[serde(rename = "openai/whisper-large-v3-turbo")]
    WhisperLargeV3Turbo,
    #[serde(rename = "openai/whisper-large-v3")]
    WhisperLargeV3,
}

impl SttModel {
    pub const ALL: [SttModel; 2] = [SttModel::WhisperLargeV3Turbo, SttModel::WhisperLargeV3];

    pub fn as_str(&self) -> &'static str {
        match self {
            SttModel::WhisperLargeV3Turbo => "openai/whisper-large-v3-turbo",
            SttModel::WhisperLargeV3 => "openai/whisper-large-v3",
        }
    }

    /// Identifiers of every offered model, in display order.
    pub fn choices() -> Vec<String> {
        Self::ALL.iter().map(|m| m.as_str().to_string()).collect()
    }
}

impl fmt::Display for SttModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SttModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                Error::validation_with_context(
                    format!("Unknown model '{}'", s),
                    ErrorContext::new()
                        .with_field_path("model")
                        .with_details(format!("expected one of: {}", Self::choices().join(", "))),
                )
            })
    }
}

/// Languages Whisper can transcribe.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "en", "zh", "de", "es", "ru", "ko", "fr", "ja", "pt", "tr", "pl", "ca", "nl", "ar", "sv",
    "it", "id", "hi", "fi", "vi", "he", "uk", "el", "ms", "cs", "ro", "da", "hu", "ta", "no",
    "th", "ur", "hr", "bg", "lt", "la", "mi", "ml", "cy", "sk", "te", "fa", "lv", "bn", "sr",
    "az", "sl", "kn", "et", "mk", "br", "eu", "is", "hy", "ne", "mn", "bs", "kk", "sq", "sw",
    "gl", "mr", "pa", "si", "km", "sn", "yo", "so", "af", "oc", "ka", "be", "tg", "sd", "gu",
    "am", "yi", "lo", "uz", "fo", "ht", "ps", "tk", "nn", "mt", "sa", "lb", "my", "bo", "tl",
    "mg", "as", "tt", "haw", "ln", "ha", "ba", "jw", "su",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_offered_model() {
        for model in SttModel::ALL {
            assert_eq!(model.as_str().parse::<SttModel>().unwrap(), model);
        }
        assert_eq!(SttModel::default().as_str(), "openai/whisper-large-v3-turbo");
    }

    #[test]
    fn rejects_unknown_model() {
        let err = "openai/whisper-tiny".parse::<SttModel>().unwrap_err();
        assert!(err.to_string().contains("Unknown model"));
    }

    #[test]
    fn serde_uses_remote_identifiers() {
        let json = serde_json::to_string(&SttModel::WhisperLargeV3).unwrap();
        assert_eq!(json, "\"openai/whisper-large-v3\"");
    }

    #[test]
    fn language_list_has_no_duplicates() {
        let mut langs = SUPPORTED_LANGUAGES.to_vec();
        langs.sort_unstable();
        langs.dedup();
        assert_eq!(langs.len(), SUPPORTED_LANGUAGES.len());
        assert_eq!(SUPPORTED_LANGUAGES.len(), 99);
    }
}
