//! SQLite database file exporter

use super::sql::{render_script, SqlDialect};
use crate::core::export::{ExportFormat, ExportSettings, Exporter};
use crate::domain::{Dataset, GeodataError, Result};
use rusqlite::Connection;
use std::fs;
use tempfile::NamedTempFile;

/// Builds a standalone SQLite database and returns the file's bytes
///
/// The script is always rendered in the SQLite dialect (inline constraints,
/// doubled quotes) and executed inside a single transaction against a fresh
/// temporary file. The edition year is stored in the `user_version` header
/// field, so even an empty dataset yields a well-formed database file. The
/// connection and the temporary file are released on every exit path.
pub struct SqliteExporter {
    settings: ExportSettings,
}

impl SqliteExporter {
    pub fn new(settings: ExportSettings) -> Self {
        Self { settings }
    }
}

impl Exporter for SqliteExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Sqlite3
    }

    fn export(&self, dataset: &Dataset, minify: bool) -> Result<Vec<u8>> {
        let script = render_script(
            dataset,
            self.settings.serializer_options(),
            SqlDialect::Sqlite.settings(self.settings.create_indexes),
            minify,
        )?;

        let file = NamedTempFile::new()?;
        tracing::debug!(path = %file.path().display(), "Building SQLite database");

        {
            let conn = Connection::open(file.path())?;
            conn.execute_batch(&format!("BEGIN;\n{script}\nCOMMIT;"))?;
            conn.pragma_update(None, "user_version", dataset.edition.year())?;
            conn.close().map_err(|(_, e)| {
                GeodataError::Serialization(format!("Failed to close SQLite database: {e}"))
            })?;
        }

        Ok(fs::read(file.path())?)
    }
}
