//! Configuration: client settings, persisted entries, and the setup flow.

pub mod flow;
mod store;

use serde::{Deserialize, Serialize};
use std::env;

use crate::models::{SttModel, PARASAIL_API_BASE};
use crate::stt::Credentials;

pub use store::ConfigStore;

/// HTTP settings for the remote endpoint (env-overridable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    PARASAIL_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientSettings {
    /// Defaults, overridden by `PARASAIL_API_BASE` and `PARASAIL_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let base_url = env::var("PARASAIL_API_BASE").unwrap_or_else(|_| default_base_url());
        let timeout_secs = env::var("PARASAIL_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|&s| s > 0)
            .unwrap_or_else(default_timeout_secs);
        Self {
            base_url,
            timeout_secs,
        }
    }
}

/// Data captured by the user step of the setup flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryData {
    pub api_key: Credentials,
    #[serde(default)]
    pub model: SttModel,
}

/// Post-setup overrides from the options flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryOptions {
    #[serde(default)]
    pub model: SttModel,
}

/// One configured Parasail STT instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub entry_id: String,
    pub title: String,
    pub data: EntryData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<EntryOptions>,
}

impl ConfigEntry {
    pub fn new(title: impl Into<String>, data: EntryData) -> Self {
        Self {
            entry_id: uuid::Uuid::new_v4().simple().to_string(),
            title: title.into(),
            data,
            options: None,
        }
    }

    /// Model from the options when set, otherwise from the setup data.
    pub fn effective_model(&self) -> SttModel {
        self.options
            .as_ref()
            .map(|o| o.model)
            .unwrap_or(self.data.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(model: SttModel) -> ConfigEntry {
        ConfigEntry::new(
            "Parasail STT",
            EntryData {
                api_key: Credentials::new("key"),
                model,
            },
        )
    }

    #[test]
    fn options_override_data_model() {
        let mut e = entry(SttModel::WhisperLargeV3Turbo);
        assert_eq!(e.effective_model(), SttModel::WhisperLargeV3Turbo);
        e.options = Some(EntryOptions {
            model: SttModel::WhisperLargeV3,
        });
        assert_eq!(e.effective_model(), SttModel::WhisperLargeV3);
    }

    #[test]
    fn entry_ids_are_unique() {
        assert_ne!(entry(SttModel::default()).entry_id, entry(SttModel::default()).entry_id);
    }

    #[test]
    fn entry_data_defaults_model_when_missing() {
        let data: EntryData = serde_yaml::from_str("api_key: abc\n").unwrap();
        assert_eq!(data.model, SttModel::WhisperLargeV3Turbo);
        assert_eq!(data.api_key.expose(), "abc");
    }

    #[test]
    fn credentials_are_redacted_in_debug() {
        let e = entry(SttModel::default());
        let printed = format!("{:?}", e);
        assert!(!printed.contains("\"key\""));
        assert!(printed.contains("***"));
    }
}
