//! SQL script exporter
//!
//! Emits, for every non-empty table in ancestor-to-descendant order, a
//! `CREATE TABLE` followed by one `INSERT` per record. Primary and foreign key
//! constraints are either declared inline in the `CREATE TABLE` or added
//! lazily with `ALTER TABLE` once every table is loaded. Indexes on the
//! foreign-key columns come last.
//!
//! ```text
//! CREATE TABLE mesoregions (
//!   id SMALLINT NOT NULL,
//!   state_id SMALLINT NOT NULL,
//!   name VARCHAR(64) NOT NULL
//! );
//! INSERT INTO mesoregions VALUES (1101, 11, 'Madeira-Guaporé');
//!
//! ALTER TABLE mesoregions
//!   ADD CONSTRAINT fk_mesoregions_states
//!     FOREIGN KEY (state_id)
//!       REFERENCES states(id);
//!
//! CREATE INDEX fk_mesoregions_states ON mesoregions (state_id);
//! ```

use crate::core::export::{ExportFormat, ExportSettings, Exporter};
use crate::core::serialize::{Serializer, SerializerOptions, Table, Value};
use crate::domain::{Dataset, EntityKind, Field, GeodataError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target SQL dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    /// Standalone script: lazy constraints, backslash-escaped quotes
    Standard,
    /// Embedded database: inline constraints, doubled quotes
    Sqlite,
}

impl SqlDialect {
    pub fn identifier(&self) -> &'static str {
        match self {
            SqlDialect::Standard => "standard",
            SqlDialect::Sqlite => "sqlite",
        }
    }

    /// Rendering settings for this dialect
    pub fn settings(&self, create_indexes: bool) -> SqlSettings {
        match self {
            SqlDialect::Standard => SqlSettings {
                lazy_constraints: true,
                create_indexes,
                quote_escape: QuoteEscape::Backslash,
            },
            SqlDialect::Sqlite => SqlSettings {
                lazy_constraints: false,
                create_indexes,
                quote_escape: QuoteEscape::Doubled,
            },
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for SqlDialect {
    type Err = GeodataError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            _ => Err(GeodataError::Configuration(format!(
                "Invalid SQL dialect: {s}. Expected 'standard' or 'sqlite'"
            ))),
        }
    }
}

/// How quotes embedded in string values are escaped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteEscape {
    /// `\'`, with backslashes doubled
    Backslash,
    /// `''`
    Doubled,
}

impl QuoteEscape {
    fn quote(&self, s: &str) -> String {
        let escaped = match self {
            QuoteEscape::Backslash => s.replace('\\', "\\\\").replace('\'', "\\'"),
            QuoteEscape::Doubled => s.replace('\'', "''"),
        };
        format!("'{escaped}'")
    }
}

/// Script rendering settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlSettings {
    /// Add constraints with `ALTER TABLE` after all data is loaded
    pub lazy_constraints: bool,
    /// Emit an index per foreign-key column
    pub create_indexes: bool,
    pub quote_escape: QuoteEscape,
}

/// Renders the dataset as a SQL script in the configured dialect
pub struct SqlExporter {
    settings: ExportSettings,
}

impl SqlExporter {
    pub fn new(settings: ExportSettings) -> Self {
        Self { settings }
    }
}

impl Exporter for SqlExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Sql
    }

    fn export(&self, dataset: &Dataset, minify: bool) -> Result<Vec<u8>> {
        let sql = self
            .settings
            .sql_dialect
            .settings(self.settings.create_indexes);
        let script = render_script(dataset, self.settings.serializer_options(), sql, minify)?;
        Ok(script.into_bytes())
    }
}

/// Renders the full script for a dataset
///
/// # Errors
///
/// Returns a data integrity error if a table would be emitted before the
/// table it references.
pub fn render_script(
    dataset: &Dataset,
    options: SerializerOptions<'_>,
    sql: SqlSettings,
    minify: bool,
) -> Result<String> {
    let serializer = Serializer::new(dataset, options);
    let tables = serializer.serialize();
    check_table_order(tables)?;

    let schemas: Vec<TableSchema> = tables
        .iter()
        .map(|table| TableSchema::new(table, &options))
        .collect();

    let mut sections: Vec<String> = Vec::new();
    for schema in &schemas {
        if !minify {
            sections.push(comment("Structure", &schema.name));
        }
        sections.push(schema.create_table(sql.lazy_constraints));
        if !minify {
            sections.push(comment("Data", &schema.name));
        }
        sections.extend(
            schema
                .table
                .records
                .iter()
                .map(|record| schema.insert(record.values(), sql.quote_escape)),
        );
    }

    if sql.lazy_constraints {
        for schema in &schemas {
            if !minify {
                sections.push(comment("Constraints", &schema.name));
            }
            sections.extend(schema.alter_statements());
        }
    }

    if sql.create_indexes {
        for schema in schemas.iter().filter(|s| !s.foreign_keys.is_empty()) {
            if !minify {
                sections.push(comment("Indexes", &schema.name));
            }
            sections.extend(schema.indexes());
        }
    }

    let script = sections.join("\n").trim().to_string();
    tracing::debug!(
        tables = schemas.len(),
        lazy_constraints = sql.lazy_constraints,
        minify,
        "Rendered SQL script"
    );

    if minify {
        minify_script(&script, sql.quote_escape)
    } else if script.is_empty() {
        Ok(script)
    } else {
        Ok(script + "\n")
    }
}

/// Every table must follow the table its rows reference
///
/// Data is inserted before lazy constraints exist, so emitting a descendant
/// table first would load rows pointing at ids not yet present.
fn check_table_order(tables: &[Table]) -> Result<()> {
    let mut emitted: Vec<EntityKind> = Vec::with_capacity(tables.len());
    for table in tables {
        if let Some(parent) = table.kind.parent() {
            if !emitted.contains(&parent) {
                return Err(GeodataError::DataIntegrity(format!(
                    "Table {} would be emitted before its parent table {}",
                    table.kind, parent
                )));
            }
        }
        emitted.push(table.kind);
    }
    Ok(())
}

fn comment(section: &str, table: &str) -> String {
    format!("\n--\n-- {section} for table \"{table}\"\n--\n")
}

struct Column {
    name: String,
    sql_type: String,
}

struct ForeignKey {
    name: String,
    column: String,
    references: String,
}

struct TableSchema<'t> {
    table: &'t Table,
    name: String,
    id_column: String,
    columns: Vec<Column>,
    foreign_keys: Vec<ForeignKey>,
}

impl<'t> TableSchema<'t> {
    fn new(table: &'t Table, options: &SerializerOptions<'_>) -> Self {
        let kind = table.kind;
        let columns = kind
            .fields()
            .into_iter()
            .map(|field| Column {
                name: options.key(field.name()),
                sql_type: column_type(kind, field),
            })
            .collect();
        let foreign_keys = kind
            .ancestors()
            .into_iter()
            .map(|ancestor| {
                let references = options.key(ancestor.table_name());
                ForeignKey {
                    name: format!("fk_{}_{}", table.name, references),
                    column: options.key(ancestor.id_field()),
                    references,
                }
            })
            .collect();

        Self {
            table,
            name: table.name.clone(),
            id_column: options.key(Field::Id.name()),
            columns,
            foreign_keys,
        }
    }

    fn primary_key_name(&self) -> String {
        format!("pk_{}", self.name)
    }

    fn create_table(&self, lazy_constraints: bool) -> String {
        let mut definitions: Vec<String> = self
            .columns
            .iter()
            .map(|column| format!("  {} {} NOT NULL", column.name, column.sql_type))
            .collect();

        if !lazy_constraints {
            definitions.push(format!(
                "  CONSTRAINT {}\n    PRIMARY KEY ({})",
                self.primary_key_name(),
                self.id_column
            ));
            definitions.extend(self.foreign_keys.iter().map(|fk| {
                format!(
                    "  CONSTRAINT {}\n    FOREIGN KEY ({})\n      REFERENCES {}({})",
                    fk.name, fk.column, fk.references, self.id_column
                )
            }));
        }

        format!(
            "CREATE TABLE {} (\n{}\n);\n",
            self.name,
            definitions.join(",\n")
        )
    }

    fn insert<'v>(&self, values: impl Iterator<Item = &'v Value>, escape: QuoteEscape) -> String {
        let values: Vec<String> = values
            .map(|value| match value {
                Value::Integer(n) => n.to_string(),
                Value::Text(s) => escape.quote(s),
            })
            .collect();
        format!("INSERT INTO {} VALUES ({});", self.name, values.join(", "))
    }

    fn alter_statements(&self) -> Vec<String> {
        let mut statements = vec![format!(
            "ALTER TABLE {}\n  ADD CONSTRAINT {}\n    PRIMARY KEY ({});\n",
            self.name,
            self.primary_key_name(),
            self.id_column
        )];
        statements.extend(self.foreign_keys.iter().map(|fk| {
            format!(
                "ALTER TABLE {}\n  ADD CONSTRAINT {}\n    FOREIGN KEY ({})\n      REFERENCES {}({});\n",
                self.name, fk.name, fk.column, fk.references, self.id_column
            )
        }));
        statements
    }

    fn indexes(&self) -> Vec<String> {
        self.foreign_keys
            .iter()
            .map(|fk| format!("CREATE INDEX {} ON {} ({});", fk.name, self.name, fk.column))
            .collect()
    }
}

/// Column type sized to the id range of the referenced entity
fn column_type(kind: EntityKind, field: Field) -> String {
    let integer = |kind: EntityKind| match kind.id_digits() {
        0..=4 => "SMALLINT",
        5..=9 => "INTEGER",
        _ => "BIGINT",
    };
    match field {
        Field::Id => integer(kind).to_string(),
        Field::AncestorId(ancestor) => integer(ancestor).to_string(),
        Field::Name if kind == EntityKind::State => "VARCHAR(32)".to_string(),
        Field::Name => "VARCHAR(64)".to_string(),
    }
}

/// Collapses whitespace outside string literals
fn minify_script(script: &str, escape: QuoteEscape) -> Result<String> {
    const PASSES: [(&str, &str); 5] = [
        (r"(?<=[;(])\s+", ""),
        (r",\s+", ","),
        (r"\s+", " "),
        (r"(?<=\W)\s(?=\W)", ""),
        (r"(?<=\w)\s(?=\))", ""),
    ];

    let (mut masked, literals) = mask_literals(script, escape);
    for (pattern, replacement) in PASSES {
        let regex = fancy_regex::Regex::new(pattern)
            .map_err(|e| GeodataError::Serialization(format!("Invalid minify pattern: {e}")))?;
        masked = regex
            .try_replacen(&masked, 0, replacement)
            .map_err(|e| GeodataError::Serialization(format!("Minify failed: {e}")))?
            .into_owned();
    }
    masked = masked.replace(" (", "(");

    let placeholder = regex::Regex::new(r"'(\d+)'")
        .map_err(|e| GeodataError::Serialization(format!("Invalid minify pattern: {e}")))?;
    let restored = placeholder.replace_all(&masked, |caps: &regex::Captures| {
        caps[1]
            .parse::<usize>()
            .ok()
            .and_then(|index| literals.get(index))
            .cloned()
            .unwrap_or_else(|| caps[0].to_string())
    });
    Ok(restored.trim().to_string())
}

/// Replaces each quoted literal with a numbered placeholder
fn mask_literals(script: &str, escape: QuoteEscape) -> (String, Vec<String>) {
    let mut masked = String::with_capacity(script.len());
    let mut literals = Vec::new();
    let mut chars = script.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\'' {
            masked.push(c);
            continue;
        }

        let mut literal = String::from('\'');
        while let Some(c) = chars.next() {
            literal.push(c);
            match (c, escape) {
                ('\\', QuoteEscape::Backslash) => {
                    if let Some(next) = chars.next() {
                        literal.push(next);
                    }
                }
                ('\'', QuoteEscape::Doubled) if chars.peek() == Some(&'\'') => {
                    literal.push('\'');
                    chars.next();
                }
                ('\'', _) => break,
                _ => {}
            }
        }

        masked.push_str(&format!("'{}'", literals.len()));
        literals.push(literal);
    }

    (masked, literals)
}
