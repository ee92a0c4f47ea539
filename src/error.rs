use crate::error_code::StandardErrorCode;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "entry.data.api_key")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected type, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "stt", "config_store")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the Parasail STT integration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Network error: {message}{}", format_context(.context))]
    Network {
        message: String,
        context: ErrorContext,
    },

    #[error("Remote error: HTTP {status} ({class}): {message}")]
    Remote {
        status: u16,
        class: String,
        message: String,
    },

    #[error("Audio stream contained no data")]
    EmptyAudio,

    #[error("Runtime error: {message}{}", format_context(.context))]
    Runtime {
        message: String,
        context: ErrorContext,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("WAV encoding error: {0}")]
    Wav(#[from] hound::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::configuration_with_context(msg, ErrorContext::new())
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Create a new validation error with structured context
    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    pub fn network_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Network {
            message: msg.into(),
            context,
        }
    }

    /// Create a new runtime error with structured context
    pub fn runtime_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Runtime {
            message: msg.into(),
            context,
        }
    }

    /// Build a remote error from a non-success HTTP response.
    ///
    /// 401 and 403 always classify as authentication / permission failures.
    /// For other statuses the provider's own error code from an OpenAI-style
    /// body (`{"error": {"code": ...}}`) refines the HTTP status mapping.
    pub fn remote(status: u16, body: &str) -> Self {
        let code = match StandardErrorCode::from_http_status(status) {
            auth @ (StandardErrorCode::Authentication | StandardErrorCode::PermissionDenied) => auth,
            by_status => provider_code(body)
                .as_deref()
                .and_then(StandardErrorCode::from_provider_code)
                .unwrap_or(by_status),
        };
        Error::Remote {
            status,
            class: code.name().to_string(),
            message: body.to_string(),
        }
    }

    /// Standard error code for this error, when one applies.
    pub fn code(&self) -> StandardErrorCode {
        match self {
            Error::Remote { class, .. } => StandardErrorCode::from_error_class(class),
            Error::Network { context, .. } if context.details.as_deref() == Some("timeout") => {
                StandardErrorCode::Timeout
            }
            Error::Validation { .. } | Error::EmptyAudio => StandardErrorCode::InvalidRequest,
            _ => StandardErrorCode::Unknown,
        }
    }

    /// Whether the remote service rejected the supplied credentials.
    pub fn is_authentication(&self) -> bool {
        matches!(
            self.code(),
            StandardErrorCode::Authentication | StandardErrorCode::PermissionDenied
        )
    }

}

fn provider_code(body: &str) -> Option<String> {
    let json = serde_json::from_str::<serde_json::Value>(body).ok()?;
    let err = json.get("error")?;
    err.get("code")
        .and_then(|c| c.as_str())
        .or_else(|| err.get("type").and_then(|t| t.as_str()))
        .map(String::from)
}
