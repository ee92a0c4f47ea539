//! Entity registry.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::entity::SpeechToTextEntity;
use crate::{Error, ErrorContext, Result};

/// STT entities offered to the host, keyed by unique id.
pub struct EntityRegistry {
    entities: RwLock<HashMap<String, Arc<dyn SpeechToTextEntity>>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
        }
    }

    /// Register `entity`. A second entity with the same unique id is rejected.
    pub async fn register(&self, entity: Arc<dyn SpeechToTextEntity>) -> Result<()> {
        let id = entity.unique_id().to_string();
        let mut entities = self.entities.write().unwrap_or_else(PoisonError::into_inner);
        if entities.contains_key(&id) {
            return Err(Error::validation_with_context(
                format!("Entity '{}' is already registered", id),
                ErrorContext::new().with_source("entity_registry"),
            ));
        }
        entities.insert(id, entity);
        Ok(())
    }

    pub async fn unregister(&self, unique_id: &str) -> Option<Arc<dyn SpeechToTextEntity>> {
        self.entities
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(unique_id)
    }

    pub fn get(&self, unique_id: &str) -> Option<Arc<dyn SpeechToTextEntity>> {
        self.entities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(unique_id)
            .cloned()
    }

    pub fn has(&self, unique_id: &str) -> bool {
        self.entities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(unique_id)
    }

    pub fn count(&self) -> usize {
        self.entities.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_REGISTRY: once_cell::sync::Lazy<EntityRegistry> =
    once_cell::sync::Lazy::new(EntityRegistry::new);

pub fn get_entity_registry() -> &'static EntityRegistry {
    &GLOBAL_REGISTRY
}
