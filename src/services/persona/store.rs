//! Agent Store
//!
//! Read-only lookup of persona profiles by id. Generating feedback or chat
//! replies never mutates a stored profile.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use persona_panel_core::PersonaProfile;
use tracing::{debug, warn};

use crate::utils::error::{AppError, AppResult};

/// Source of persona profiles.
#[async_trait]
pub trait AgentStore: Send + Sync {
    /// Resolve `ids` to profiles, in the order requested.
    ///
    /// Unknown ids are omitted from the result rather than reported as errors.
    async fn get_profiles(&self, ids: &[String]) -> AppResult<Vec<PersonaProfile>>;

    /// Resolve a single id.
    async fn get_profile(&self, id: &str) -> AppResult<Option<PersonaProfile>> {
        let mut profiles = self.get_profiles(&[id.to_string()]).await?;
        Ok(profiles.pop())
    }
}

/// Profiles held in memory, typically loaded once from a JSON file.
#[derive(Debug, Default, Clone)]
pub struct InMemoryAgentStore {
    profiles: HashMap<String, PersonaProfile>,
}

impl InMemoryAgentStore {
    /// Build a store from profiles. Later duplicates replace earlier ones.
    pub fn new(profiles: impl IntoIterator<Item = PersonaProfile>) -> Self {
        let mut map = HashMap::new();
        for profile in profiles {
            for warning in profile.validation_warnings() {
                warn!(persona_id = %profile.id, "malformed persona: {}", warning);
            }
            if map.contains_key(&profile.id) {
                warn!(persona_id = %profile.id, "duplicate persona id, keeping the later profile");
            }
            map.insert(profile.id.clone(), profile);
        }
        Self { profiles: map }
    }

    /// Load a JSON array of persona profiles.
    pub fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let profiles = PersonaProfile::list_from_json(&content).map_err(|e| {
            AppError::store(format!("invalid persona file {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), count = profiles.len(), "loaded persona profiles");
        Ok(Self::new(profiles))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// All stored ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.profiles.keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[async_trait]
impl AgentStore for InMemoryAgentStore {
    async fn get_profiles(&self, ids: &[String]) -> AppResult<Vec<PersonaProfile>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.profiles.get(id).cloned())
            .collect())
    }
}
