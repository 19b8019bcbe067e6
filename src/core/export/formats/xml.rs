//! Tagged XML exporter

use crate::core::export::{ExportFormat, ExportSettings, Exporter};
use crate::core::serialize::Serializer;
use crate::domain::{Dataset, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Renders a database-dump style document
///
/// ```text
/// <database name="dtb_2016">
///   <!-- Table states -->
///   <table name="states">
///     <row>
///       <field name="id">11</field>
///       <field name="name">Rondônia</field>
///     </row>
///   </table>
/// </database>
/// ```
///
/// Pretty output adds the table comments and two-space indentation.
pub struct XmlExporter {
    settings: ExportSettings,
}

impl XmlExporter {
    pub fn new(settings: ExportSettings) -> Self {
        Self { settings }
    }
}

impl Exporter for XmlExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Xml
    }

    fn export(&self, dataset: &Dataset, minify: bool) -> Result<Vec<u8>> {
        let options = self.settings.serializer_options().force_str(true);
        let serializer = Serializer::new(dataset, options);

        let mut writer = if minify {
            Writer::new(Vec::new())
        } else {
            Writer::new_with_indent(Vec::new(), b' ', 2)
        };

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let name = dataset.name();
        let mut database = BytesStart::new("database");
        database.push_attribute(("name", name.as_str()));
        writer.write_event(Event::Start(database))?;

        for table in serializer.serialize() {
            if !minify {
                let comment = format!(" Table {} ", table.name);
                writer.write_event(Event::Comment(BytesText::new(&comment)))?;
            }

            let mut element = BytesStart::new("table");
            element.push_attribute(("name", table.name.as_str()));
            writer.write_event(Event::Start(element))?;

            for record in &table.records {
                writer.write_event(Event::Start(BytesStart::new("row")))?;
                for (key, value) in record.iter() {
                    let mut field = BytesStart::new("field");
                    field.push_attribute(("name", key));
                    writer.write_event(Event::Start(field))?;
                    writer.write_event(Event::Text(BytesText::new(&value.to_string())))?;
                    writer.write_event(Event::End(BytesEnd::new("field")))?;
                }
                writer.write_event(Event::End(BytesEnd::new("row")))?;
            }

            writer.write_event(Event::End(BytesEnd::new("table")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("database")))?;

        let mut document = writer.into_inner();
        if !minify {
            document.push(b'\n');
        }
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::export::formats::testing::render;
    use crate::domain::fixtures::{sample_dataset, single_branch_dataset};
    use crate::domain::{Edition, State};

    #[test]
    fn test_pretty_document() {
        let xml = render(ExportFormat::Xml, &single_branch_dataset(), false);
        let expected = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<database name=\"dtb_2016\">\n",
            "  <!-- Table states -->\n",
            "  <table name=\"states\">\n",
            "    <row>\n",
            "      <field name=\"id\">53</field>\n",
            "      <field name=\"name\">Distrito Federal</field>\n",
            "    </row>\n",
            "  </table>\n",
            "  <!-- Table mesoregions -->\n",
            "  <table name=\"mesoregions\">\n",
            "    <row>\n",
            "      <field name=\"id\">5301</field>\n",
            "      <field name=\"state_id\">53</field>\n",
            "      <field name=\"name\">Distrito Federal</field>\n",
            "    </row>\n",
            "  </table>\n",
            "</database>\n",
        );
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_minified_has_no_comments_or_indentation() {
        let xml = render(ExportFormat::Xml, &sample_dataset(), true);
        assert!(!xml.contains("<!--"));
        assert!(!xml.contains('\n'));
        assert!(xml.contains("<table name=\"states\"><row><field name=\"id\">12</field>"));
    }

    #[test]
    fn test_only_non_empty_tables() {
        let dataset = Dataset::new(Edition::new(2016).unwrap(), vec![State::new(12, "Acre")]);
        let xml = render(ExportFormat::Xml, &dataset, false);
        assert_eq!(xml.matches("<table ").count(), 1);
        assert!(xml.contains("<table name=\"states\">"));
        assert!(!xml.contains("mesoregions"));
    }
}
