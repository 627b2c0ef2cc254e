use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::class::ClassName;
use super::value::AttrValue;

/// Field name injected into persisted records to tag the entity class
pub const CLASS_TAG_FIELD: &str = "__class__";

/// Fixed field names the generic attribute setter refuses to overwrite
const RESERVED_FIELDS: [&str; 4] = ["id", "created_at", "updated_at", CLASS_TAG_FIELD];

/// A typed domain entity: identity, timestamps, and an open attribute bag
///
/// Entities are addressed by the composite key `<ClassName>.<id>`, which is
/// globally unique. The attribute bag is an ordered map so rendering and
/// serialization are deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Type tag; fixed at creation
    pub class_name: ClassName,

    /// Opaque unique identifier (UUID v7), assigned at creation, immutable
    pub id: String,

    /// Timestamp when this entity was created
    pub created_at: DateTime<Utc>,

    /// Advances on every persisted mutation
    pub updated_at: DateTime<Utc>,

    /// Open attribute bag; grows dynamically via the update command
    pub attrs: BTreeMap<String, AttrValue>,
}

/// Persisted form of an [`Entity`]
///
/// Every attribute sits beside the fixed fields, plus the injected class tag.
/// `save` and `reload` move entities through this shape verbatim - ids and
/// timestamps are restored, never regenerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    #[serde(rename = "__class__")]
    pub class_name: ClassName,
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub attrs: BTreeMap<String, AttrValue>,
}

impl Entity {
    /// Construct a fresh default entity of the given class
    ///
    /// Assigns a new UUID v7 id and sets both timestamps to now. The
    /// attribute bag starts empty.
    pub fn new(class_name: ClassName) -> Self {
        let now = Utc::now();
        Self {
            class_name,
            id: Uuid::now_v7().to_string(),
            created_at: now,
            updated_at: now,
            attrs: BTreeMap::new(),
        }
    }

    /// Composite registry key `<ClassName>.<id>`
    pub fn key(&self) -> String {
        Self::key_for(self.class_name, &self.id)
    }

    /// Composite key for a class/id pair, without constructing an entity
    pub fn key_for(class_name: ClassName, id: &str) -> String {
        format!("{}.{}", class_name, id)
    }

    /// Insert-or-overwrite an attribute
    ///
    /// The fixed fields (`id`, timestamps, the class tag) are excluded from
    /// arbitrary overwrite; a set on those names is ignored.
    pub fn set_attr(&mut self, name: &str, value: AttrValue) {
        if RESERVED_FIELDS.contains(&name) {
            return;
        }
        self.attrs.insert(name.to_string(), value);
    }

    /// Advance `updated_at`
    ///
    /// Called once per persisted mutation, before the registry is saved.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// The persisted record: attribute mapping plus fixed fields and class tag
    pub fn to_record(&self) -> EntityRecord {
        EntityRecord {
            class_name: self.class_name,
            id: self.id.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            attrs: self.attrs.clone(),
        }
    }

    /// Reconstruct an entity from its persisted record
    pub fn from_record(record: EntityRecord) -> Self {
        Self {
            class_name: record.class_name,
            id: record.id,
            created_at: record.created_at,
            updated_at: record.updated_at,
            attrs: record.attrs,
        }
    }
}

impl std::fmt::Display for Entity {
    /// String form `[<ClassName>] (<id>) {record}` with sorted keys
    ///
    /// The record is rendered without the class tag, which the bracketed
    /// prefix already carries.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut value = serde_json::to_value(self.to_record()).map_err(|_| std::fmt::Error)?;
        if let Some(map) = value.as_object_mut() {
            map.remove(CLASS_TAG_FIELD);
        }
        write!(f, "[{}] ({}) {}", self.class_name, self.id, value)
    }
}
