//! Flat-file storage engine for the entity registry

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use stayx_core::model::entity::{Entity, EntityRecord, CLASS_TAG_FIELD};
use stayx_core::ClassName;

use crate::errors::{Result, StoreError};

/// The entity registry plus its JSON backing file
///
/// Keys are composite `<ClassName>.<id>` strings. The whole registry is
/// rewritten on every `save`, and `reload` replaces the in-memory set from
/// the file. Not thread-safe: the shell is single-threaded with exactly one
/// writer. Construct independent stores (with independent paths) for
/// independent sessions or tests.
#[derive(Debug, Default)]
pub struct FileStore {
    /// Path of the backing JSON file
    path: PathBuf,
    /// Map of composite key to live entity
    objects: BTreeMap<String, Entity>,
}

impl FileStore {
    /// Create an empty store backed by `path`
    ///
    /// No file is touched until [`save`](Self::save) or
    /// [`reload`](Self::reload) is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            objects: BTreeMap::new(),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The live registry
    pub fn all(&self) -> &BTreeMap<String, Entity> {
        &self.objects
    }

    /// Mutable access to the live registry
    pub fn all_mut(&mut self) -> &mut BTreeMap<String, Entity> {
        &mut self.objects
    }

    /// Get an entity by composite key
    pub fn get(&self, key: &str) -> Option<&Entity> {
        self.objects.get(key)
    }

    /// Get a mutable reference to an entity by composite key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Entity> {
        self.objects.get_mut(key)
    }

    /// Check whether a composite key is registered
    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }

    /// Remove an entity by composite key
    pub fn remove(&mut self, key: &str) -> Option<Entity> {
        self.objects.remove(key)
    }

    /// Number of registered entities
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Insert an entity under its composite key, overwriting any previous
    /// entry
    ///
    /// No validation beyond key construction.
    pub fn insert(&mut self, entity: Entity) {
        self.objects.insert(entity.key(), entity);
    }

    /// Number of registered entities of the given class
    pub fn count_class(&self, class_name: ClassName) -> usize {
        self.objects
            .values()
            .filter(|e| e.class_name == class_name)
            .count()
    }

    /// Serialize the whole registry to the backing file
    ///
    /// Every entity becomes its record (attribute mapping plus the injected
    /// class tag) and the full set is written as one JSON object, overwriting
    /// prior contents. There are no partial writes.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be written, or
    /// `StoreError::Serialization` if encoding fails. Failures propagate to
    /// the caller, never swallowed.
    pub fn save(&self) -> Result<()> {
        let records: BTreeMap<&String, EntityRecord> = self
            .objects
            .iter()
            .map(|(key, entity)| (key, entity.to_record()))
            .collect();
        let json = serde_json::to_string_pretty(&records)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                    path: self.path.clone(),
                    source: e,
                })?;
            }
        }
        fs::write(&self.path, json).map_err(|e| StoreError::Io {
            path: self.path.clone(),
            source: e,
        })?;

        tracing::debug!(
            path = %self.path.display(),
            entities = self.objects.len(),
            "persisted registry"
        );
        Ok(())
    }

    /// Replace the registry from the backing file
    ///
    /// A missing file is a no-op, not an error. Otherwise the file is parsed
    /// as a JSON object keyed by composite key; entries whose class tag is
    /// missing or unrecognized are skipped silently, and recognized entries
    /// are reconstructed verbatim - same id, same timestamps, same attribute
    /// values.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` for read failures other than a missing file,
    /// or `StoreError::Serialization` if the file is not a JSON object of
    /// records (a recognized entry with a malformed record is an error, not
    /// a skip).
    pub fn reload(&mut self) -> Result<()> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        let parsed: BTreeMap<String, serde_json::Value> = serde_json::from_str(&raw)?;
        let mut loaded = BTreeMap::new();
        let mut skipped = 0usize;
        for value in parsed.into_values() {
            let recognized = value
                .get(CLASS_TAG_FIELD)
                .and_then(|tag| tag.as_str())
                .and_then(ClassName::parse)
                .is_some();
            if !recognized {
                skipped += 1;
                continue;
            }
            let record: EntityRecord = serde_json::from_value(value)?;
            let entity = Entity::from_record(record);
            loaded.insert(entity.key(), entity);
        }
        if skipped > 0 {
            tracing::debug!(skipped, "dropped entries with unrecognized class tags");
        }

        self.objects = loaded;
        tracing::debug!(
            path = %self.path.display(),
            entities = self.objects.len(),
            "reloaded registry"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stayx_core::AttrValue;

    #[test]
    fn test_new_store_is_empty() {
        let store = FileStore::new("unused.json");
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_insert_and_get() {
        let mut store = FileStore::new("unused.json");
        let entity = Entity::new(ClassName::User);
        let key = entity.key();

        store.insert(entity.clone());

        assert!(store.contains(&key));
        assert_eq!(store.get(&key), Some(&entity));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_insert_overwrites_same_key() {
        let mut store = FileStore::new("unused.json");
        let mut entity = Entity::new(ClassName::User);
        let key = entity.key();

        store.insert(entity.clone());
        entity.set_attr("name", AttrValue::Str("Betty".to_string()));
        store.insert(entity.clone());

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&key), Some(&entity));
    }

    #[test]
    fn test_remove() {
        let mut store = FileStore::new("unused.json");
        let entity = Entity::new(ClassName::City);
        let key = entity.key();
        store.insert(entity);

        assert!(store.remove(&key).is_some());
        assert!(!store.contains(&key));
        assert!(store.remove(&key).is_none());
    }

    #[test]
    fn test_count_class() {
        let mut store = FileStore::new("unused.json");
        store.insert(Entity::new(ClassName::User));
        store.insert(Entity::new(ClassName::User));
        store.insert(Entity::new(ClassName::Place));

        assert_eq!(store.count_class(ClassName::User), 2);
        assert_eq!(store.count_class(ClassName::Place), 1);
        assert_eq!(store.count_class(ClassName::Review), 0);
    }
}
