use std::{io::Read, path::Path};
use datkit_base::{err, ErrorKind, Result};
use crate::{Column, ColumnType, SchemaDocument, Validity};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSchema {
    name: String,
    valid_for: Validity,
    columns: Vec<Column>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, valid_for: Validity, columns: Vec<Column>) -> Self {
        TableSchema {
            name: name.into(),
            valid_for,
            columns,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn valid_for(&self) -> Validity {
        self.valid_for
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

/// All tables of one schema document, in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchemaRegistry {
    tables: Vec<TableSchema>,
}

impl SchemaRegistry {
    /// Unnamed columns become `Unknown{k}`, with `k` counting up across the
    /// whole document rather than restarting at each table. Field names of
    /// decoded records depend on this order.
    pub fn from_document(doc: SchemaDocument) -> Self {
        let mut unknown = 0_usize;
        let mut tables = Vec::with_capacity(doc.tables.len());
        for table in doc.tables {
            let mut columns = Vec::with_capacity(table.columns.len());
            for col in table.columns {
                let name = match col.name {
                    Some(name) => name,
                    None => {
                        let name = format!("Unknown{}", unknown);
                        unknown += 1;
                        name
                    }
                };
                columns.push(Column::new(name, ColumnType::from_keyword(&col.type_name), col.array));
            }
            tables.push(TableSchema::new(table.name, table.valid_for, columns));
        }
        SchemaRegistry { tables }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(Self::from_document(SchemaDocument::from_json_str(text)?))
    }

    pub fn from_json_reader(rd: impl Read) -> Result<Self> {
        Ok(Self::from_document(SchemaDocument::from_json_reader(rd)?))
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableSchema> {
        self.tables.iter()
    }

    /// First table in document order whose name matches case-insensitively
    /// and whose tag is accepted by `validity`.
    pub fn find(&self, table: &str, validity: Validity) -> Option<&TableSchema> {
        let wanted = table.to_lowercase();
        self.tables
            .iter()
            .find(|t| t.name.to_lowercase() == wanted && validity.accepts(t.valid_for))
    }

    pub fn resolve(&self, table: &str, validity: Validity) -> Result<&TableSchema> {
        self.find(table, validity).ok_or_else(|| {
            err(ErrorKind::SchemaNotFound {
                table: table.to_string(),
                validity: validity.tag(),
            })
        })
    }

    /// Resolves the table a dat file holds from the file's own name.
    pub fn resolve_path(&self, path: &Path, validity: Validity) -> Result<&TableSchema> {
        self.resolve(&table_identifier(path), validity)
    }
}

/// Table identifier for a dat file: its base name with the last extension
/// stripped, case-folded. `data/BaseItemTypes.datc64` is `baseitemtypes`.
pub fn table_identifier(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
