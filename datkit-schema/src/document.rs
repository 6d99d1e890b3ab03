use std::io::Read;
use serde::{Deserialize, Serialize};
use datkit_base::{err, ErrorKind, Result};
use crate::Validity;

// On-disk shape of the schema document. Keys the codec has no use for
// (descriptions, references, enumerations, ...) are skipped by serde.

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDocument {
    pub tables: Vec<TableDocument>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDocument {
    pub name: String,
    pub valid_for: Validity,
    #[serde(default)]
    pub columns: Vec<ColumnDocument>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub array: bool,
}

impl SchemaDocument {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| err(ErrorKind::Schema(e.to_string())))
    }

    pub fn from_json_reader(rd: impl Read) -> Result<Self> {
        serde_json::from_reader(rd).map_err(|e| err(ErrorKind::Schema(e.to_string())))
    }
}
