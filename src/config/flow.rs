//! Two-step settings flow: initial setup with a credential probe, and an
//! options step for changing the model afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

use super::{ConfigEntry, EntryData, EntryOptions};
use crate::audio::{wav, AudioClassification};
use crate::models::SttModel;
use crate::stt::{Credentials, SubmissionRequest, TranscriptionBackend, TranscriptionSubmitter};

pub const STEP_USER: &str = "user";
pub const STEP_INIT: &str = "init";

const PROBE_CLASSIFICATION: AudioClassification = AudioClassification {
    file_name: "test.wav",
    content_type: "audio/wav",
};

/// Why a setup attempt was rejected.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Invalid authentication: {0}")]
    InvalidAuth(#[source] crate::Error),
    #[error("Unknown error: {0}")]
    Unknown(#[source] crate::Error),
}

impl FlowError {
    /// Error key shown on the form.
    pub fn code(&self) -> &'static str {
        match self {
            FlowError::InvalidAuth(_) => "invalid_auth",
            FlowError::Unknown(_) => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub key: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSchema {
    pub fields: Vec<FormField>,
}

impl FormSchema {
    pub fn field(&self, key: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.key == key)
    }
}

fn model_field(default: SttModel) -> FormField {
    FormField {
        key: "model",
        required: true,
        default: Some(default.as_str().to_string()),
        choices: SttModel::choices(),
    }
}

/// What a flow step asks the host to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowResult<T> {
    Form {
        step_id: &'static str,
        schema: FormSchema,
        errors: BTreeMap<String, String>,
    },
    CreateEntry {
        title: String,
        data: T,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserInput {
    pub api_key: String,
    #[serde(default)]
    pub model: SttModel,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OptionsInput {
    pub model: SttModel,
}

/// Probe the remote service with a silent clip and return the entry title.
pub async fn validate_input(
    submitter: &TranscriptionSubmitter,
    input: &UserInput,
) -> Result<String, FlowError> {
    let clip = wav::probe_clip().map_err(FlowError::Unknown)?;
    let request = SubmissionRequest::new(clip, PROBE_CLASSIFICATION, input.model);
    submitter
        .submit(Credentials::new(input.api_key.clone()), request)
        .await
        .map_err(|err| {
            error!(error = %err, code = %err.code(), "Failed to connect to Parasail API");
            if err.is_authentication() {
                FlowError::InvalidAuth(err)
            } else {
                FlowError::Unknown(err)
            }
        })?;
    Ok(format!("Parasail STT ({})", input.model))
}

/// Initial setup: API key and model.
pub struct ConfigFlow {
    submitter: TranscriptionSubmitter,
}

impl ConfigFlow {
    pub fn new(backend: Arc<dyn TranscriptionBackend>) -> Self {
        Self {
            submitter: TranscriptionSubmitter::new(backend),
        }
    }

    pub fn user_schema() -> FormSchema {
        FormSchema {
            fields: vec![
                FormField {
                    key: "api_key",
                    required: true,
                    default: None,
                    choices: Vec::new(),
                },
                model_field(SttModel::default()),
            ],
        }
    }

    pub async fn step_user(&self, input: Option<UserInput>) -> FlowResult<EntryData> {
        let mut errors = BTreeMap::new();

        if let Some(input) = input {
            if input.api_key.trim().is_empty() {
                errors.insert("api_key".to_string(), "required".to_string());
            } else {
                match validate_input(&self.submitter, &input).await {
                    Ok(title) => {
                        info!(model = %input.model, "Parasail credentials accepted");
                        return FlowResult::CreateEntry {
                            title,
                            data: EntryData {
                                api_key: Credentials::new(input.api_key),
                                model: input.model,
                            },
                        };
                    }
                    Err(err) => {
                        errors.insert("base".to_string(), err.code().to_string());
                    }
                }
            }
        }

        FlowResult::Form {
            step_id: STEP_USER,
            schema: Self::user_schema(),
            errors,
        }
    }
}

/// Post-setup model selection.
pub struct OptionsFlow {
    current: SttModel,
}

impl OptionsFlow {
    pub fn new(entry: &ConfigEntry) -> Self {
        Self {
            current: entry.effective_model(),
        }
    }

    pub fn step_init(&self, input: Option<OptionsInput>) -> FlowResult<EntryOptions> {
        match input {
            Some(input) => FlowResult::CreateEntry {
                title: String::new(),
                data: EntryOptions { model: input.model },
            },
            None => FlowResult::Form {
                step_id: STEP_INIT,
                schema: FormSchema {
                    fields: vec![model_field(self.current)],
                },
                errors: BTreeMap::new(),
            },
        }
    }
}
