//! Classification of remote transcription failures.
//!
//! The Parasail endpoint is OpenAI-compatible, so failures arrive either as an
//! HTTP status or as a provider error code in the JSON body. Both are folded
//! into a [`StandardErrorCode`] so callers can ask one question (for example
//! "was this an authentication failure?") regardless of how the remote side
//! phrased it.
//!
//! ## Example
//!
//! ```rust
//! use parasail_stt::error_code::StandardErrorCode;
//!
//! let code = StandardErrorCode::from_http_status(401);
//! assert_eq!(code.name(), "authentication");
//! assert_eq!(StandardErrorCode::from_provider_code("invalid_api_key"), Some(code));
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardErrorCode {
    /// Malformed upload, unsupported audio, or missing form fields
    InvalidRequest,
    /// Invalid, expired, or missing API key
    Authentication,
    /// Valid key without access to the selected model
    PermissionDenied,
    /// Unknown model or endpoint
    NotFound,
    /// Audio payload exceeds the upload limit
    RequestTooLarge,
    RateLimited,
    QuotaExhausted,
    ServerError,
    Overloaded,
    Timeout,
    Unknown,
}

impl StandardErrorCode {
    /// Returns the standard name (e.g., `"authentication"`).
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Authentication => "authentication",
            Self::PermissionDenied => "permission_denied",
            Self::NotFound => "not_found",
            Self::RequestTooLarge => "request_too_large",
            Self::RateLimited => "rate_limited",
            Self::QuotaExhausted => "quota_exhausted",
            Self::ServerError => "server_error",
            Self::Overloaded => "overloaded",
            Self::Timeout => "timeout",
            Self::Unknown => "unknown",
        }
    }

    /// Maps a provider error code/type string to the corresponding `StandardErrorCode`.
    ///
    /// Accepts the standard names as well as the OpenAI-style aliases the
    /// endpoint returns (`"invalid_api_key"`, `"insufficient_quota"`, ...).
    pub fn from_provider_code(provider_code: &str) -> Option<Self> {
        let code = match provider_code {
            "invalid_request" | "invalid_request_error" => Self::InvalidRequest,
            "authentication" | "invalid_api_key" | "authentication_error" => Self::Authentication,
            "permission_denied" | "permission_error" => Self::PermissionDenied,
            "not_found" | "model_not_found" => Self::NotFound,
            "request_too_large" => Self::RequestTooLarge,
            "rate_limited" | "rate_limit_exceeded" => Self::RateLimited,
            "quota_exhausted" | "insufficient_quota" => Self::QuotaExhausted,
            "server_error" => Self::ServerError,
            "overloaded" => Self::Overloaded,
            "timeout" => Self::Timeout,
            _ => return None,
        };
        Some(code)
    }

    /// Maps an error class name back to its code. Unknown names map to `Unknown`.
    pub fn from_error_class(error_class: &str) -> Self {
        Self::from_provider_code(error_class).unwrap_or(Self::Unknown)
    }

    /// Maps an HTTP status code to the most likely `StandardErrorCode`.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 | 415 | 422 => Self::InvalidRequest,
            401 => Self::Authentication,
            403 => Self::PermissionDenied,
            404 => Self::NotFound,
            408 | 504 => Self::Timeout,
            413 => Self::RequestTooLarge,
            429 => Self::RateLimited,
            500 | 502 => Self::ServerError,
            503 => Self::Overloaded,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for StandardErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
