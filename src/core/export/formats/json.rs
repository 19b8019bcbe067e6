//! JSON exporter

use super::nested_rows;
use crate::core::export::{ExportFormat, ExportSettings, Exporter};
use crate::core::serialize::{Serializer, Table};
use crate::domain::{Dataset, Result};
use serde_json::{Map, Value};

/// Renders `{table: {id: {field: value}}}`
///
/// Keys keep serializer order. Non-ASCII characters are written as `\uXXXX`
/// escapes so the payload is plain ASCII.
pub struct JsonExporter {
    settings: ExportSettings,
}

impl JsonExporter {
    pub fn new(settings: ExportSettings) -> Self {
        Self { settings }
    }
}

impl Exporter for JsonExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn export(&self, dataset: &Dataset, minify: bool) -> Result<Vec<u8>> {
        let serializer = Serializer::new(dataset, self.settings.serializer_options());
        let document = to_document(serializer.serialize());

        let rendered = if minify {
            serde_json::to_string(&document)?
        } else {
            serde_json::to_string_pretty(&document)?
        };

        Ok(escape_non_ascii(&rendered).into_bytes())
    }
}

fn to_document(tables: &[Table]) -> Value {
    let root: Map<String, Value> = tables
        .iter()
        .map(|table| {
            let rows: Map<String, Value> = nested_rows(table)
                .map(|(id, fields)| {
                    let fields: Map<String, Value> = fields
                        .iter()
                        .map(|(key, value)| (key.clone(), Value::from(value)))
                        .collect();
                    (id.to_string(), Value::Object(fields))
                })
                .collect();
            (table.name.clone(), Value::Object(rows))
        })
        .collect();
    Value::Object(root)
}

/// Replaces every non-ASCII character with its UTF-16 `\u` escape
///
/// Only string contents can hold non-ASCII characters in serde_json output,
/// so escaping the rendered text is equivalent to escaping each string.
fn escape_non_ascii(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    let mut units = [0u16; 2];
    for c in json.chars() {
        if c.is_ascii() {
            escaped.push(c);
        } else {
            for unit in c.encode_utf16(&mut units) {
                escaped.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }
    escaped
}
