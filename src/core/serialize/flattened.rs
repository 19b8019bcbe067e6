//! Flattened (single-table) serialization

use super::{EntityRecords, Record, SerializerOptions, Value};
use crate::domain::{Dataset, Entity, EntityKind};
use std::cell::OnceCell;
use std::collections::HashMap;

/// Composite sort key: one id per hierarchy level, zero when absent
type SortKey = [u64; 6];

/// Serializes a dataset into a single list of cross-entity records
///
/// Every row describes one entity together with all of its ancestors using
/// entity-qualified columns (`state_id`, `state_name`, `mesoregion_id`, ...).
/// Rows are stably sorted by (state, mesoregion, microregion, municipality,
/// district, subdistrict) id, so a region always precedes its descendants.
pub struct FlattenedSerializer<'a> {
    records: EntityRecords<'a>,
    options: SerializerOptions<'a>,
    serialized: OnceCell<Vec<Record>>,
}

impl<'a> FlattenedSerializer<'a> {
    pub fn new(dataset: &'a Dataset, options: SerializerOptions<'a>) -> Self {
        Self {
            records: EntityRecords::new(dataset),
            options,
            serialized: OnceCell::new(),
        }
    }

    /// Column names across every non-empty entity type, root to leaf
    pub fn columns(&self) -> Vec<String> {
        self.records
            .get()
            .iter()
            .filter(|(_, entities)| !entities.is_empty())
            .flat_map(|(kind, _)| {
                [
                    self.options.key(kind.id_field()),
                    self.options.key(kind.name_field()),
                ]
            })
            .collect()
    }

    /// Sorted flattened rows, computed on first call and cached afterwards
    pub fn serialize(&self) -> &[Record] {
        self.serialized.get_or_init(|| self.render())
    }

    fn render(&self) -> Vec<Record> {
        let records = self.records.get();

        let names: HashMap<(EntityKind, u64), &str> = records
            .iter()
            .flat_map(|(kind, entities)| entities.iter().map(move |e| ((*kind, e.id()), e.name())))
            .collect();

        let mut rows: Vec<(SortKey, Record)> = records
            .iter()
            .flat_map(|(_, entities)| entities.iter())
            .map(|entity| self.render_row(*entity, &names))
            .collect();

        // Stable: ties keep table-major source order
        rows.sort_by_key(|(key, _)| *key);

        tracing::debug!(rows = rows.len(), "Flattened serialization complete");
        rows.into_iter().map(|(_, record)| record).collect()
    }

    fn render_row(
        &self,
        entity: &dyn Entity,
        names: &HashMap<(EntityKind, u64), &str>,
    ) -> (SortKey, Record) {
        let kind = entity.kind();

        // Chain of (kind, id) from the root down to the entity itself
        let mut chain: Vec<(EntityKind, u64)> = kind
            .ancestors()
            .into_iter()
            .zip(entity.ancestor_ids())
            .collect();
        chain.reverse();
        chain.push((kind, entity.id()));

        let mut key: SortKey = [0; 6];
        let mut record = Record::new();
        for (level, id) in chain {
            key[level.depth()] = id;
            let name = if level == kind {
                entity.name()
            } else {
                names.get(&(level, id)).copied().unwrap_or_default()
            };
            record.push(
                self.options.key(level.id_field()),
                self.options.coerce(Value::Integer(id)),
            );
            record.push(
                self.options.key(level.name_field()),
                Value::Text(name.to_string()),
            );
        }
        (key, record)
    }
}
