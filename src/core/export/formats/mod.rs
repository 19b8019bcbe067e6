//! One exporter per output format
//!
//! The nested-map formats (JSON, YAML, PHP, property list) share one layout:
//! table name → record id → remaining fields. [`nested_rows`] yields that
//! layout from the hierarchical serializer's tables.

pub mod csv;
pub mod json;
pub mod php;
pub mod plist;
pub mod sql;
pub mod sqlite;
pub mod xml;
pub mod yaml;

use crate::core::serialize::{Table, Value};

/// Rows of a table keyed by id, each with its remaining fields
pub(crate) fn nested_rows<'a>(
    table: &'a Table,
) -> impl Iterator<Item = (&'a Value, &'a [(String, Value)])> + 'a {
    table.records.iter().filter_map(|record| record.split_id())
}
