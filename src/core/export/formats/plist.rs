//! Property list exporter

use super::nested_rows;
use crate::core::export::{ExportFormat, ExportSettings, Exporter};
use crate::core::serialize::{Serializer, Table, Value};
use crate::domain::{Dataset, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

const DOCTYPE: &str =
    r#"plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd""#;

/// Renders `{table: {id: {field: value}}}` as an XML property list
///
/// Every dictionary key is a string, ids included. Minified output is the
/// same document with newlines and tabs stripped.
pub struct PlistExporter {
    settings: ExportSettings,
}

impl PlistExporter {
    pub fn new(settings: ExportSettings) -> Self {
        Self { settings }
    }
}

impl Exporter for PlistExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Plist
    }

    fn export(&self, dataset: &Dataset, minify: bool) -> Result<Vec<u8>> {
        let serializer = Serializer::new(dataset, self.settings.serializer_options());
        let mut document = render_document(serializer.serialize())?;

        if minify {
            document.retain(|b| *b != b'\n' && *b != b'\t');
        } else {
            document.push(b'\n');
        }
        Ok(document)
    }
}

fn render_document(tables: &[Table]) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::DocType(BytesText::from_escaped(DOCTYPE)))?;

    let mut plist = BytesStart::new("plist");
    plist.push_attribute(("version", "1.0"));
    writer.write_event(Event::Start(plist))?;
    writer.write_event(Event::Start(BytesStart::new("dict")))?;

    for table in tables {
        write_key(&mut writer, &table.name)?;
        writer.write_event(Event::Start(BytesStart::new("dict")))?;
        for (id, fields) in nested_rows(table) {
            write_key(&mut writer, &id.to_string())?;
            writer.write_event(Event::Start(BytesStart::new("dict")))?;
            for (key, value) in fields {
                write_key(&mut writer, key)?;
                write_value(&mut writer, value)?;
            }
            writer.write_event(Event::End(BytesEnd::new("dict")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("dict")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("dict")))?;
    writer.write_event(Event::End(BytesEnd::new("plist")))?;
    Ok(writer.into_inner())
}

fn write_key<W: Write>(writer: &mut Writer<W>, key: &str) -> Result<()> {
    write_element(writer, "key", key)
}

fn write_value<W: Write>(writer: &mut Writer<W>, value: &Value) -> Result<()> {
    match value {
        Value::Integer(n) => write_element(writer, "integer", &n.to_string()),
        Value::Text(s) => write_element(writer, "string", s),
    }
}

fn write_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
