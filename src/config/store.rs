//! YAML-backed store of config entries.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use super::{ConfigEntry, EntryOptions};
use crate::{Error, ErrorContext, Result};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    entries: Vec<ConfigEntry>,
}

/// Entries persisted in a single YAML file. A missing file is an empty store.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    entries: Vec<ConfigEntry>,
}

impl ConfigStore {
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(text) if text.trim().is_empty() => Vec::new(),
            Ok(text) => serde_yaml::from_str::<StoreFile>(&text)?.entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), entries = entries.len(), "Loaded config store");
        Ok(Self { path, entries })
    }

    pub async fn save(&self) -> Result<()> {
        let text = serde_yaml::to_string(&StoreFile {
            entries: self.entries.clone(),
        })?;
        tokio::fs::write(&self.path, text).await?;
        debug!(path = %self.path.display(), entries = self.entries.len(), "Saved config store");
        Ok(())
    }

    pub fn entries(&self) -> &[ConfigEntry] {
        &self.entries
    }

    pub fn get(&self, entry_id: &str) -> Option<&ConfigEntry> {
        self.entries.iter().find(|e| e.entry_id == entry_id)
    }

    /// The requested entry, or the only one when no id is given.
    pub fn resolve(&self, entry_id: Option<&str>) -> Result<&ConfigEntry> {
        match entry_id {
            Some(id) => self.get(id).ok_or_else(|| {
                Error::configuration_with_context(
                    format!("No config entry '{}'", id),
                    ErrorContext::new().with_source("config_store"),
                )
            }),
            None => match self.entries.as_slice() {
                [only] => Ok(only),
                [] => Err(Error::configuration(
                    "No config entries; run setup first",
                )),
                _ => Err(Error::configuration(
                    "Several config entries exist; pass an entry id",
                )),
            },
        }
    }

    /// Insert `entry`, replacing any entry with the same id.
    pub fn upsert(&mut self, entry: ConfigEntry) {
        match self.entries.iter_mut().find(|e| e.entry_id == entry.entry_id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn set_options(&mut self, entry_id: &str, options: EntryOptions) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.entry_id == entry_id)
            .ok_or_else(|| Error::configuration(format!("No config entry '{}'", entry_id)))?;
        entry.options = Some(options);
        Ok(())
    }

    pub fn remove(&mut self, entry_id: &str) -> Option<ConfigEntry> {
        let idx = self.entries.iter().position(|e| e.entry_id == entry_id)?;
        Some(self.entries.remove(idx))
    }
}
