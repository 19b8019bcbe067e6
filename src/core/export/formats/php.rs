//! PHP `serialize()` exporter

use super::nested_rows;
use crate::core::export::{ExportFormat, ExportSettings, Exporter};
use crate::core::serialize::{Serializer, Table, Value};
use crate::domain::{Dataset, Result};

/// Renders `{table: {id: {field: value}}}` in PHP's serialization format
///
/// Arrays are `a:<count>:{<key><value>...}`, strings `s:<byte length>:"...";`
/// and integers `i:<n>;`. The format has no whitespace, so minify is a no-op.
pub struct PhpExporter {
    settings: ExportSettings,
}

impl PhpExporter {
    pub fn new(settings: ExportSettings) -> Self {
        Self { settings }
    }
}

impl Exporter for PhpExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Php
    }

    fn export(&self, dataset: &Dataset, _minify: bool) -> Result<Vec<u8>> {
        let serializer = Serializer::new(dataset, self.settings.serializer_options());
        Ok(encode_tables(serializer.serialize()).into_bytes())
    }
}

fn encode_tables(tables: &[Table]) -> String {
    let mut out = format!("a:{}:{{", tables.len());
    for table in tables {
        encode_str(&mut out, &table.name);
        out.push_str(&format!("a:{}:{{", table.records.len()));
        for (id, fields) in nested_rows(table) {
            encode_value(&mut out, id);
            out.push_str(&format!("a:{}:{{", fields.len()));
            for (key, value) in fields {
                encode_str(&mut out, key);
                encode_value(&mut out, value);
            }
            out.push('}');
        }
        out.push('}');
    }
    out.push('}');
    out
}

fn encode_value(out: &mut String, value: &Value) {
    match value {
        Value::Integer(n) => out.push_str(&format!("i:{n};")),
        Value::Text(s) => encode_str(out, s),
    }
}

fn encode_str(out: &mut String, s: &str) {
    out.push_str(&format!("s:{}:\"{}\";", s.len(), s));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::export::formats::testing::render;
    use crate::domain::fixtures::{sample_dataset, single_branch_dataset};

    #[test]
    fn test_encoding() {
        let php = render(ExportFormat::Php, &single_branch_dataset(), false);
        assert_eq!(
            php,
            concat!(
                r#"a:2:{"#,
                r#"s:6:"states";a:1:{i:53;a:1:{s:4:"name";s:16:"Distrito Federal";}}"#,
                r#"s:11:"mesoregions";a:1:{i:5301;a:2:{s:8:"state_id";i:53;s:4:"name";s:16:"Distrito Federal";}}"#,
                r#"}"#
            )
        );
    }

    #[test]
    fn test_string_length_is_in_bytes() {
        let php = render(ExportFormat::Php, &sample_dataset(), false);
        assert!(php.contains(r#"s:9:"Rondônia";"#));
    }

    #[test]
    fn test_minify_is_identical() {
        let dataset = sample_dataset();
        assert_eq!(
            render(ExportFormat::Php, &dataset, true),
            render(ExportFormat::Php, &dataset, false)
        );
    }
}
