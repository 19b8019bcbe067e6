//! CSV exporter

use crate::core::export::{ExportFormat, ExportSettings, Exporter};
use crate::core::serialize::FlattenedSerializer;
use crate::domain::{Dataset, GeodataError, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};

/// Renders the flattened serialization as a single table
///
/// The header lists every column of every non-empty entity type. Each row
/// only carries the columns of its own entity and ancestors: trailing absent
/// columns are omitted rather than written as empty fields.
pub struct CsvExporter {
    settings: ExportSettings,
}

impl CsvExporter {
    pub fn new(settings: ExportSettings) -> Self {
        Self { settings }
    }
}

impl Exporter for CsvExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn export(&self, dataset: &Dataset, minify: bool) -> Result<Vec<u8>> {
        let serializer = FlattenedSerializer::new(dataset, self.settings.serializer_options());

        let mut writer = WriterBuilder::new()
            .flexible(true)
            .terminator(Terminator::Any(b'\n'))
            .quote_style(if minify {
                QuoteStyle::Necessary
            } else {
                QuoteStyle::NonNumeric
            })
            .from_writer(Vec::new());

        let columns = serializer.columns();
        if !columns.is_empty() {
            writer.write_record(&columns)?;
        }
        for row in serializer.serialize() {
            writer.write_record(row.values().map(|value| value.to_string()))?;
        }

        writer
            .into_inner()
            .map_err(|e| GeodataError::Serialization(format!("CSV error: {e}")))
    }
}
