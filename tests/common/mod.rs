//! Shared test backends.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use bytes::Bytes;
use parasail_stt::stt::{Credentials, SubmissionRequest, TranscriptionBackend};
use parasail_stt::{Error, ErrorContext, Result};

/// What the mock backend answers with.
pub enum Reply {
    Text(&'static str),
    /// Echo the uploaded audio back as UTF-8 text.
    Echo,
    Unauthorized,
    ServerError,
    Network,
    Malformed,
    Panic,
}

/// Records every call and answers with a fixed [`Reply`].
pub struct MockBackend {
    reply: Reply,
    calls: AtomicUsize,
    requests: Mutex<Vec<RecordedRequest>>,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub api_key: String,
    pub audio: Bytes,
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub model: String,
    pub language: Option<String>,
}

impl MockBackend {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl TranscriptionBackend for MockBackend {
    fn transcribe(&self, credentials: &Credentials, request: &SubmissionRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(RecordedRequest {
            api_key: credentials.expose().to_string(),
            audio: request.audio.clone(),
            file_name: request.file_name,
            content_type: request.content_type,
            model: request.model.as_str().to_string(),
            language: request.language.clone(),
        });
        match &self.reply {
            Reply::Text(text) => Ok(text.to_string()),
            Reply::Echo => Ok(String::from_utf8_lossy(&request.audio).into_owned()),
            Reply::Unauthorized => Err(Error::remote(
                401,
                r#"{"error":{"message":"Incorrect API key provided","code":"invalid_api_key"}}"#,
            )),
            Reply::ServerError => Err(Error::remote(500, "internal error")),
            Reply::Network => Err(Error::network_with_context(
                "connection refused",
                ErrorContext::new().with_source("mock"),
            )),
            Reply::Malformed => Err(serde_json::from_str::<serde_json::Value>("not json")
                .unwrap_err()
                .into()),
            Reply::Panic => panic!("backend exploded"),
        }
    }
}
