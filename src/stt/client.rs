//! STT (Speech-to-Text) client.

use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use tracing::debug;

use super::types::{Credentials, SubmissionRequest, TranscriptionResponse};
use crate::config::ClientSettings;
use crate::models::{PARASAIL_API_BASE, TRANSCRIPTIONS_PATH};
use crate::{Error, ErrorContext, Result};

/// Remote transcription call.
///
/// Implementations block the calling thread; the submitter only ever invokes
/// them from the blocking pool.
pub trait TranscriptionBackend: Send + Sync {
    fn transcribe(&self, credentials: &Credentials, request: &SubmissionRequest) -> Result<String>;
}

/// Blocking client for Parasail's OpenAI-compatible transcription endpoint.
#[derive(Debug, Clone)]
pub struct ParasailClient {
    base_url: String,
    endpoint_path: String,
    timeout: Duration,
}

impl ParasailClient {
    pub fn builder() -> ParasailClientBuilder {
        ParasailClientBuilder::new()
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        Self::builder()
            .base_url(settings.base_url.clone())
            .timeout_secs(settings.timeout_secs)
            .build()
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.endpoint_path)
    }
}

impl TranscriptionBackend for ParasailClient {
    fn transcribe(&self, credentials: &Credentials, request: &SubmissionRequest) -> Result<String> {
        let endpoint = self.endpoint();
        debug!(
            first_bytes = %hex_prefix(&request.audio, 16),
            "Audio payload prefix"
        );

        // Built on the worker thread; a blocking client must not be created
        // or dropped inside the async runtime.
        let http_client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;

        let part = Part::bytes(request.audio.to_vec())
            .file_name(request.file_name)
            .mime_str(request.content_type)
            .map_err(|e| Error::configuration(format!("Invalid mime: {}", e)))?;
        let mut form = Form::new()
            .part("file", part)
            .text("model", request.model.as_str());
        if let Some(lang) = &request.language {
            form = form.text("language", lang.clone());
        }

        debug!(
            model = %request.model,
            language = ?request.language,
            content_type = request.content_type,
            "Sending transcription request"
        );
        let response = http_client
            .post(&endpoint)
            .bearer_auth(credentials.expose())
            .multipart(form)
            .send()
            .map_err(|e| transport_error("STT request failed", e))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| transport_error("Failed to read STT response", e))?;
        if !status.is_success() {
            return Err(Error::remote(status.as_u16(), &body));
        }
        let parsed: TranscriptionResponse = serde_json::from_str(&body)?;
        Ok(parsed.text)
    }
}

fn transport_error(what: &str, e: reqwest::Error) -> Error {
    let mut context = ErrorContext::new().with_source("stt");
    if e.is_timeout() {
        context = context.with_details("timeout");
    }
    Error::network_with_context(format!("{}: {}", what, e), context)
}

fn hex_prefix(bytes: &[u8], n: usize) -> String {
    bytes.iter().take(n).map(|b| format!("{:02x}", b)).collect()
}

pub struct ParasailClientBuilder {
    base_url: Option<String>,
    endpoint_path: Option<String>,
    timeout_secs: u64,
}

impl ParasailClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            endpoint_path: None,
            timeout_secs: 60,
        }
    }
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
    pub fn endpoint_path(mut self, path: impl Into<String>) -> Self {
        self.endpoint_path = Some(path.into());
        self
    }
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn build(self) -> Result<ParasailClient> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| PARASAIL_API_BASE.to_string());
        url::Url::parse(&base_url).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid base URL '{}': {}", base_url, e),
                ErrorContext::new().with_field_path("base_url"),
            )
        })?;
        let endpoint_path = self
            .endpoint_path
            .unwrap_or_else(|| TRANSCRIPTIONS_PATH.to_string());
        let endpoint_path = if endpoint_path.starts_with('/') {
            endpoint_path
        } else {
            format!("/{}", endpoint_path)
        };
        if self.timeout_secs == 0 {
            return Err(Error::configuration_with_context(
                "Timeout must be greater than zero",
                ErrorContext::new().with_field_path("timeout_secs"),
            ));
        }
        Ok(ParasailClient {
            base_url,
            endpoint_path,
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

impl Default for ParasailClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
