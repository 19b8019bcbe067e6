//! Dataset serialization
//!
//! This module turns a loaded [`Dataset`] into format-neutral records. Two
//! strategies are supported:
//!
//! - **Hierarchical** ([`Serializer`]): one [`Table`] per non-empty entity
//!   type, each record holding the entity's schema fields in order
//! - **Flattened** ([`FlattenedSerializer`]): a single list of records merging
//!   the entity with all of its ancestors, sorted by the composite id key
//!
//! Both strategies memoize their output per instance, so exporters may ask for
//! it repeatedly without recomputing.

pub mod flattened;
pub mod hierarchical;

pub use flattened::FlattenedSerializer;
pub use hierarchical::Serializer;

use crate::core::localize::Localization;
use crate::domain::{Dataset, Entity, EntityKind};
use std::cell::OnceCell;
use std::fmt;

/// A serialized scalar
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    Integer(u64),
    Text(String),
}

impl Value {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Integer(_) => None,
            Value::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Integer(n) => serde_json::Value::from(*n),
            Value::Text(s) => serde_json::Value::from(s.as_str()),
        }
    }
}

impl From<&Value> for serde_yaml::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Integer(n) => serde_yaml::Value::from(*n),
            Value::Text(s) => serde_yaml::Value::from(s.as_str()),
        }
    }
}

/// An ordered field-name to value mapping
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: Value) {
        self.fields.push((key.into(), value));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Splits off the leading id field, promoting it to the record's key
    ///
    /// Hierarchical records always start with the id, as declared by the
    /// entity schema.
    pub fn split_id(&self) -> Option<(&Value, &[(String, Value)])> {
        self.fields.split_first().map(|((_, id), rest)| (id, rest))
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// The serialized records of one entity type
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Entity type the records belong to
    pub kind: EntityKind,
    /// Rendered (possibly localized) table name
    pub name: String,
    pub records: Vec<Record>,
}

/// Rendering options shared by both strategies
#[derive(Debug, Clone, Copy, Default)]
pub struct SerializerOptions<'a> {
    /// Translate table names and keys through this catalog
    pub localization: Option<&'a Localization>,
    /// Render every value as text
    pub force_str: bool,
}

impl<'a> SerializerOptions<'a> {
    pub fn new(localization: Option<&'a Localization>) -> Self {
        Self {
            localization,
            force_str: false,
        }
    }

    pub fn force_str(mut self, force_str: bool) -> Self {
        self.force_str = force_str;
        self
    }

    pub(crate) fn key(&self, key: &str) -> String {
        crate::core::localize::localize(self.localization, key).to_string()
    }

    pub(crate) fn coerce(&self, value: Value) -> Value {
        match value {
            Value::Integer(n) if self.force_str => Value::Text(n.to_string()),
            other => other,
        }
    }
}

/// Records of every entity type aggregated from the tree, computed once
pub(crate) struct EntityRecords<'a> {
    dataset: &'a Dataset,
    cache: OnceCell<Vec<(EntityKind, Vec<&'a dyn Entity>)>>,
}

impl<'a> EntityRecords<'a> {
    pub(crate) fn new(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            cache: OnceCell::new(),
        }
    }

    /// Entity records per kind, root to leaf, each list in source order
    pub(crate) fn get(&self) -> &[(EntityKind, Vec<&'a dyn Entity>)] {
        self.cache.get_or_init(|| {
            tracing::debug!(dataset = %self.dataset.name(), "Aggregating entity records");
            EntityKind::ALL
                .iter()
                .map(|kind| (*kind, self.dataset.entities(*kind)))
                .collect()
        })
    }
}
