//! Mapping declared formats to upload metadata.

use super::types::AudioFormat;

/// Filename and MIME type attached to the multipart `file` part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioClassification {
    pub file_name: &'static str,
    pub content_type: &'static str,
}

/// Classify a declared container format. Unrecognised formats get a generic
/// raw/octet-stream pair instead of failing.
pub fn classify(format: &AudioFormat) -> AudioClassification {
    match format {
        AudioFormat::Wav => AudioClassification {
            file_name: "audio.wav",
            content_type: "audio/wav",
        },
        AudioFormat::Ogg => AudioClassification {
            file_name: "audio.ogg",
            content_type: "audio/ogg",
        },
        AudioFormat::Other(_) => AudioClassification {
            file_name: "audio.raw",
            content_type: "application/octet-stream",
        },
    }
}

/// Keep the language hint only when it is exactly a two-character code.
/// Anything else is dropped so the remote side auto-detects.
pub fn normalize_language(language: Option<&str>) -> Option<String> {
    language
        .filter(|lang| lang.chars().count() == 2)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_formats_get_matching_names() {
        let wav = classify(&AudioFormat::Wav);
        assert_eq!(wav.file_name, "audio.wav");
        assert_eq!(wav.content_type, "audio/wav");

        let ogg = classify(&AudioFormat::Ogg);
        assert_eq!(ogg.file_name, "audio.ogg");
        assert_eq!(ogg.content_type, "audio/ogg");
    }

    #[test]
    fn unknown_formats_fall_back_to_raw() {
        for other in ["flac", "mp3", ""] {
            let c = classify(&AudioFormat::Other(other.to_string()));
            assert_eq!(c.file_name, "audio.raw");
            assert_eq!(c.content_type, "application/octet-stream");
        }
    }

    #[test]
    fn only_two_character_hints_pass() {
        assert_eq!(normalize_language(Some("en")), Some("en".to_string()));
        assert_eq!(normalize_language(Some("de")), Some("de".to_string()));
        assert_eq!(normalize_language(None), None);
        assert_eq!(normalize_language(Some("")), None);
        assert_eq!(normalize_language(Some("e")), None);
        assert_eq!(normalize_language(Some("haw")), None);
        assert_eq!(normalize_language(Some("en-US")), None);
    }
}
