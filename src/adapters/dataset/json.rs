//! Dataset repository backed by a local JSON file
//!
//! The file uses the same nested layout the JSON exporter writes with the
//! default (English) keys:
//!
//! ```json
//! {
//!   "states": {"11": {"name": "Rondônia"}},
//!   "mesoregions": {"1101": {"state_id": 11, "name": "Madeira-Guaporé"}}
//! }
//! ```
//!
//! Records are attached to their immediate parent; the full ancestor chain
//! recorded on each row is then checked against the assembled tree.

use super::traits::DatasetRepository;
use crate::domain::{
    Dataset, District, Edition, EntityKind, Field, GeodataError, Mesoregion, Microregion,
    Municipality, Result, State, Subdistrict,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Reads a dataset edition from a JSON file
pub struct JsonDatasetRepository {
    path: PathBuf,
    edition: Edition,
}

impl JsonDatasetRepository {
    pub fn new(path: impl Into<PathBuf>, edition: Edition) -> Self {
        Self {
            path: path.into(),
            edition,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse a dataset from JSON text
    ///
    /// # Errors
    ///
    /// Returns a data integrity error for malformed documents, unknown
    /// tables, missing fields, records whose parent does not exist and
    /// inconsistent ancestor keys.
    pub fn parse(text: &str, edition: Edition) -> Result<Dataset> {
        let document: Value = serde_json::from_str(text)
            .map_err(|e| GeodataError::DataIntegrity(format!("Malformed dataset file: {e}")))?;
        let root = document.as_object().ok_or_else(|| {
            GeodataError::DataIntegrity("Dataset file must hold an object of tables".to_string())
        })?;

        let mut rows: HashMap<EntityKind, Vec<Row>> = HashMap::new();
        for (table, records) in root {
            let kind = EntityKind::from_str(table).map_err(|_| {
                GeodataError::DataIntegrity(format!("Unknown table '{table}' in dataset file"))
            })?;
            rows.insert(kind, read_rows(kind, records)?);
        }
        let mut take = |kind: EntityKind| rows.remove(&kind).unwrap_or_default();

        let mut subdistricts = group(take(EntityKind::Subdistrict), |row| Subdistrict {
            id: row.id,
            district_id: row.ancestors[0],
            municipality_id: row.ancestors[1],
            microregion_id: row.ancestors[2],
            mesoregion_id: row.ancestors[3],
            state_id: row.ancestors[4],
            name: row.name,
        });
        let mut districts = group(take(EntityKind::District), |row| District {
            subdistricts: subdistricts.remove(&row.id).unwrap_or_default(),
            id: row.id,
            municipality_id: row.ancestors[0],
            microregion_id: row.ancestors[1],
            mesoregion_id: row.ancestors[2],
            state_id: row.ancestors[3],
            name: row.name,
        });
        ensure_attached(EntityKind::Subdistrict, &subdistricts)?;

        let mut municipalities = group(take(EntityKind::Municipality), |row| Municipality {
            districts: districts.remove(&row.id).unwrap_or_default(),
            id: row.id,
            microregion_id: row.ancestors[0],
            mesoregion_id: row.ancestors[1],
            state_id: row.ancestors[2],
            name: row.name,
        });
        ensure_attached(EntityKind::District, &districts)?;

        let mut microregions = group(take(EntityKind::Microregion), |row| Microregion {
            municipalities: municipalities.remove(&row.id).unwrap_or_default(),
            id: row.id,
            mesoregion_id: row.ancestors[0],
            state_id: row.ancestors[1],
            name: row.name,
        });
        ensure_attached(EntityKind::Municipality, &municipalities)?;

        let mut mesoregions = group(take(EntityKind::Mesoregion), |row| Mesoregion {
            microregions: microregions.remove(&row.id).unwrap_or_default(),
            id: row.id,
            state_id: row.ancestors[0],
            name: row.name,
        });
        ensure_attached(EntityKind::Microregion, &microregions)?;

        let states: Vec<State> = take(EntityKind::State)
            .into_iter()
            .map(|row| State {
                mesoregions: mesoregions.remove(&row.id).unwrap_or_default(),
                id: row.id,
                name: row.name,
            })
            .collect();
        ensure_attached(EntityKind::Mesoregion, &mesoregions)?;

        let dataset = Dataset::new(edition, states);
        dataset.validate()?;
        Ok(dataset)
    }
}

impl DatasetRepository for JsonDatasetRepository {
    fn edition(&self) -> Edition {
        self.edition
    }

    fn load(&self) -> Result<Dataset> {
        tracing::info!(
            path = %self.path.display(),
            edition = %self.edition,
            "Loading dataset"
        );

        let text = fs::read_to_string(&self.path).map_err(|e| {
            GeodataError::Io(format!(
                "Failed to read dataset file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        let dataset = Self::parse(&text, self.edition)?;

        for kind in EntityKind::ALL {
            tracing::debug!(
                table = kind.table_name(),
                records = dataset.record_count(kind),
                "Loaded table"
            );
        }
        Ok(dataset)
    }
}

/// A record as stored in the file, before it is attached to its parent
struct Row {
    id: u64,
    /// Innermost first; always one entry per ancestor level
    ancestors: Vec<u64>,
    name: String,
}

fn read_rows(kind: EntityKind, records: &Value) -> Result<Vec<Row>> {
    let records = records.as_object().ok_or_else(|| {
        GeodataError::DataIntegrity(format!("Table {kind} must be an object keyed by id"))
    })?;
    records
        .iter()
        .map(|(id, fields)| read_row(kind, id, fields))
        .collect()
}

fn read_row(kind: EntityKind, id: &str, fields: &Value) -> Result<Row> {
    let invalid = |detail: String| {
        GeodataError::DataIntegrity(format!("Invalid {} record '{}': {}", kind.key(), id, detail))
    };

    let id: u64 = id
        .parse()
        .map_err(|_| invalid("id is not a positive integer".to_string()))?;
    let fields: &Map<String, Value> = fields
        .as_object()
        .ok_or_else(|| invalid("fields must be an object".to_string()))?;

    let mut ancestors = Vec::with_capacity(kind.depth());
    let mut name = None;
    for field in kind.fields() {
        match field {
            Field::Id => {}
            Field::AncestorId(_) => {
                let value = fields
                    .get(field.name())
                    .and_then(Value::as_u64)
                    .ok_or_else(|| invalid(format!("missing integer field {}", field.name())))?;
                ancestors.push(value);
            }
            Field::Name => {
                name = fields.get(field.name()).and_then(Value::as_str);
            }
        }
    }
    let name = name.ok_or_else(|| invalid("missing string field name".to_string()))?;

    Ok(Row {
        id,
        ancestors,
        name: name.to_string(),
    })
}

/// Builds records and groups them by parent id, keeping source order
fn group<T>(rows: Vec<Row>, mut build: impl FnMut(Row) -> T) -> HashMap<u64, Vec<T>> {
    let mut grouped: HashMap<u64, Vec<T>> = HashMap::new();
    for row in rows {
        let parent = row.ancestors[0];
        grouped.entry(parent).or_default().push(build(row));
    }
    grouped
}

/// Fails if any group was not claimed by a parent record
fn ensure_attached<T>(kind: EntityKind, orphans: &HashMap<u64, Vec<T>>) -> Result<()> {
    match (orphans.keys().min(), kind.parent()) {
        (Some(parent_id), Some(parent)) => Err(GeodataError::DataIntegrity(format!(
            "Table {} references unknown {} {}",
            kind,
            parent.key(),
            parent_id
        ))),
        _ => Ok(()),
    }
}
