//! Hierarchical (nested-by-entity) serialization

use super::{EntityRecords, Record, SerializerOptions, Table, Value};
use crate::domain::{Dataset, Entity, EntityKind};
use std::cell::OnceCell;

/// Serializes a dataset into one table per non-empty entity type
///
/// Tables follow the schema order (root to leaf) and records keep source
/// order. Each record lists the schema fields of its entity: `id`, the
/// ancestor ids innermost first, then `name`.
///
/// # Examples
///
/// ```
/// use geodatabr::core::serialize::{Serializer, SerializerOptions};
/// use geodatabr::domain::{Dataset, Edition, State};
///
/// let dataset = Dataset::new(Edition::new(2016).unwrap(), vec![State::new(12, "Acre")]);
/// let serializer = Serializer::new(&dataset, SerializerOptions::default());
/// let tables = serializer.serialize();
/// assert_eq!(tables.len(), 1);
/// assert_eq!(tables[0].name, "states");
/// ```
pub struct Serializer<'a> {
    records: EntityRecords<'a>,
    options: SerializerOptions<'a>,
    serialized: OnceCell<Vec<Table>>,
}

impl<'a> Serializer<'a> {
    pub fn new(dataset: &'a Dataset, options: SerializerOptions<'a>) -> Self {
        Self {
            records: EntityRecords::new(dataset),
            options,
            serialized: OnceCell::new(),
        }
    }

    /// Serialized tables, computed on first call and cached afterwards
    pub fn serialize(&self) -> &[Table] {
        self.serialized.get_or_init(|| self.render())
    }

    fn render(&self) -> Vec<Table> {
        let tables: Vec<Table> = self
            .records
            .get()
            .iter()
            .filter(|(_, entities)| !entities.is_empty())
            .map(|(kind, entities)| Table {
                kind: *kind,
                name: self.options.key(kind.table_name()),
                records: entities
                    .iter()
                    .map(|entity| self.render_record(*kind, *entity))
                    .collect(),
            })
            .collect();

        tracing::debug!(tables = tables.len(), "Hierarchical serialization complete");
        tables
    }

    fn render_record(&self, kind: EntityKind, entity: &dyn Entity) -> Record {
        let mut values = Vec::with_capacity(kind.depth() + 2);
        values.push(Value::Integer(entity.id()));
        values.extend(entity.ancestor_ids().into_iter().map(Value::Integer));
        values.push(Value::Text(entity.name().to_string()));

        kind.fields()
            .iter()
            .zip(values)
            .map(|(field, value)| (self.options.key(field.name()), self.options.coerce(value)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::localize::Localization;
    use crate::domain::fixtures::{sample_dataset, single_branch_dataset};

    #[test]
    fn test_tables_in_schema_order() {
        let dataset = sample_dataset();
        let serializer = Serializer::new(&dataset, SerializerOptions::default());
        let names: Vec<&str> = serializer
            .serialize()
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "states",
                "mesoregions",
                "microregions",
                "municipalities",
                "districts",
                "subdistricts"
            ]
        );
    }

    #[test]
    fn test_empty_tables_omitted() {
        let dataset = single_branch_dataset();
        let serializer = Serializer::new(&dataset, SerializerOptions::default());
        let tables = serializer.serialize();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[1].kind, EntityKind::Mesoregion);
    }

    #[test]
    fn test_record_fields_follow_schema() {
        let dataset = sample_dataset();
        let serializer = Serializer::new(&dataset, SerializerOptions::default());
        let municipalities = &serializer.serialize()[3];
        let first = &municipalities.records[0];
        assert_eq!(
            first.keys().collect::<Vec<_>>(),
            vec![
                "id",
                "microregion_id",
                "mesoregion_id",
                "state_id",
                "name"
            ]
        );
        assert_eq!(first.get("id"), Some(&Value::Integer(1200401)));
        assert_eq!(first.get("state_id"), Some(&Value::Integer(12)));
        assert_eq!(
            first.get("name"),
            Some(&Value::Text("Rio Branco".to_string()))
        );
    }

    #[test]
    fn test_records_keep_source_order() {
        let dataset = sample_dataset();
        let serializer = Serializer::new(&dataset, SerializerOptions::default());
        let states: Vec<u64> = serializer.serialize()[0]
            .records
            .iter()
            .filter_map(|r| r.get("id").and_then(Value::as_u64))
            .collect();
        assert_eq!(states, vec![12, 11]);
    }

    #[test]
    fn test_serialize_is_memoized() {
        let dataset = sample_dataset();
        let serializer = Serializer::new(&dataset, SerializerOptions::default());
        let first = serializer.serialize();
        let second = serializer.serialize();
        assert!(std::ptr::eq(first.as_ptr(), second.as_ptr()));
    }

    #[test]
    fn test_localized_keys() {
        let dataset = sample_dataset();
        let localization = Localization::for_locale("pt_BR").unwrap();
        let serializer = Serializer::new(&dataset, SerializerOptions::new(Some(&localization)));
        let tables = serializer.serialize();
        assert_eq!(tables[0].name, "uf");
        assert_eq!(
            tables[1].records[0].keys().collect::<Vec<_>>(),
            vec!["id", "id_uf", "nome"]
        );
    }

    #[test]
    fn test_force_str() {
        let dataset = single_branch_dataset();
        let serializer =
            Serializer::new(&dataset, SerializerOptions::default().force_str(true));
        let record = &serializer.serialize()[1].records[0];
        assert_eq!(record.get("id"), Some(&Value::Text("5301".to_string())));
        assert_eq!(record.get("state_id"), Some(&Value::Text("53".to_string())));
    }
}
