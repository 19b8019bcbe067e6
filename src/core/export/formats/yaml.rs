//! YAML exporter

use super::nested_rows;
use crate::core::export::{ExportFormat, ExportSettings, Exporter};
use crate::core::serialize::{Serializer, Table, Value};
use crate::domain::{Dataset, Result};
use serde_yaml::Mapping;

/// Renders `{table: {id: {field: value}}}` as YAML
///
/// Pretty output is block style. Minified output is a single flow-style line
/// with no space after the `},` record separators.
pub struct YamlExporter {
    settings: ExportSettings,
}

impl YamlExporter {
    pub fn new(settings: ExportSettings) -> Self {
        Self { settings }
    }
}

impl Exporter for YamlExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Yaml
    }

    fn export(&self, dataset: &Dataset, minify: bool) -> Result<Vec<u8>> {
        let serializer = Serializer::new(dataset, self.settings.serializer_options());
        let tables = serializer.serialize();

        let rendered = if minify {
            to_flow(tables)
        } else {
            serde_yaml::to_string(&to_mapping(tables))?
        };
        Ok(rendered.into_bytes())
    }
}

fn to_mapping(tables: &[Table]) -> serde_yaml::Value {
    let mut root = Mapping::new();
    for table in tables {
        let mut rows = Mapping::new();
        for (id, fields) in nested_rows(table) {
            let fields: Mapping = fields
                .iter()
                .map(|(key, value)| {
                    (
                        serde_yaml::Value::from(key.as_str()),
                        serde_yaml::Value::from(value),
                    )
                })
                .collect();
            rows.insert(serde_yaml::Value::from(id), serde_yaml::Value::Mapping(fields));
        }
        root.insert(
            serde_yaml::Value::from(table.name.as_str()),
            serde_yaml::Value::Mapping(rows),
        );
    }
    serde_yaml::Value::Mapping(root)
}

/// Explicit flow-style emitter, keeping serializer order
fn to_flow(tables: &[Table]) -> String {
    let tables: Vec<String> = tables
        .iter()
        .map(|table| {
            let rows: Vec<String> = nested_rows(table)
                .map(|(id, fields)| {
                    let fields: Vec<String> = fields
                        .iter()
                        .map(|(key, value)| format!("{}: {}", scalar(key), flow_value(value)))
                        .collect();
                    format!("{}: {{{}}}", flow_value(id), fields.join(", "))
                })
                .collect();
            format!("{}: {{{}}}", scalar(&table.name), rows.join(","))
        })
        .collect();
    format!("{{{}}}\n", tables.join(","))
}

fn flow_value(value: &Value) -> String {
    match value {
        Value::Integer(n) => n.to_string(),
        Value::Text(s) => scalar(s),
    }
}

/// Plain scalar when unambiguous, double-quoted otherwise
fn scalar(s: &str) -> String {
    if needs_quotes(s) {
        let mut escaped = String::with_capacity(s.len() + 2);
        for c in s.chars() {
            match c {
                '\\' => escaped.push_str("\\\\"),
                '"' => escaped.push_str("\\\""),
                '\n' => escaped.push_str("\\n"),
                '\t' => escaped.push_str("\\t"),
                '\r' => escaped.push_str("\\r"),
                c if c.is_control() => escaped.push_str(&format!("\\u{:04X}", c as u32)),
                c => escaped.push(c),
            }
        }
        format!("\"{escaped}\"")
    } else {
        s.to_string()
    }
}

fn needs_quotes(s: &str) -> bool {
    const INDICATORS: &[char] = &[
        '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%',
        '@', '`',
    ];
    const RESERVED: &[&str] = &[
        "~", "null", "true", "false", "yes", "no", "on", "off", "y", "n",
    ];

    let Some(first) = s.chars().next() else {
        return true;
    };
    INDICATORS.contains(&first)
        || s.starts_with(char::is_whitespace)
        || s.ends_with(char::is_whitespace)
        || s.ends_with(':')
        || s.contains(": ")
        || s.contains(" #")
        || s.contains(|c: char| matches!(c, ',' | '[' | ']' | '{' | '}') || c.is_control())
        || RESERVED.contains(&s.to_lowercase().as_str())
        || !reads_back_as(s)
}

/// Whether a plain scalar resolves to the same string (not a number, null or bool)
fn reads_back_as(s: &str) -> bool {
    matches!(
        serde_yaml::from_str::<serde_yaml::Value>(s),
        Ok(serde_yaml::Value::String(ref parsed)) if parsed == s
    )
}
