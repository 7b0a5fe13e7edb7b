//! The character roster of a comic.
//!
//! Characters are not rows of their own: the whole roster lives inside the
//! comic record as a single JSON object, decoded into [`CharacterMap`] at
//! the storage boundary. Business logic only ever sees the typed map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One character: a free-text description plus optional appearance notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterEntry {
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appearance: Option<String>,
}

/// Character name → entry, ordered by name.
///
/// The name is the unique key; renaming removes the old key and inserts
/// the new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterMap(BTreeMap<String, CharacterEntry>);

impl CharacterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&CharacterEntry> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CharacterEntry)> {
        self.0.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Insert or replace a character under `name`.
    pub fn insert(&mut self, name: impl Into<String>, entry: CharacterEntry) {
        self.0.insert(name.into(), entry);
    }

    /// Update the character currently stored under `old_name`, possibly
    /// under a new name. The old key is removed when the name changes.
    pub fn rename(
        &mut self,
        old_name: &str,
        new_name: impl Into<String>,
        entry: CharacterEntry,
    ) -> Result<(), CoreError> {
        if !self.0.contains_key(old_name) {
            return Err(CoreError::NotFoundNamed {
                entity: "Character",
                name: old_name.to_string(),
            });
        }
        self.0.remove(old_name);
        self.0.insert(new_name.into(), entry);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<CharacterEntry, CoreError> {
        self.0.remove(name).ok_or_else(|| CoreError::NotFoundNamed {
            entity: "Character",
            name: name.to_string(),
        })
    }
}
