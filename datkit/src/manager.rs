use std::{fs, path::Path};
use tracing::{debug, error, info};
use datkit_base::Result;
use datkit_codec::{decode_table, encode_table, infer_row_width, Record};
use datkit_schema::{SchemaRegistry, Validity};

// Errors are logged here, at the edge, and passed on unchanged.
fn logged<T>(what: &str, path: &Path, res: Result<T>) -> Result<T> {
    if let Err(e) = &res {
        error!(target: "datkit", "{} {}: {}", what, path.display(), e);
    }
    res
}

/// Holds one loaded schema registry and moves dat files between disk and
/// records. Tables are picked by the dat file's name unless told otherwise.
#[derive(Clone, Debug)]
pub struct DatManager {
    registry: SchemaRegistry,
}

impl DatManager {
    pub fn new(registry: SchemaRegistry) -> Self {
        DatManager { registry }
    }

    /// Loads a JSON schema document.
    pub fn open(schema_path: impl AsRef<Path>) -> Result<Self> {
        let path = schema_path.as_ref();
        let res = fs::read_to_string(path)
            .map_err(Into::into)
            .and_then(|text| SchemaRegistry::from_json_str(&text));
        let registry = logged("loading schema", path, res)?;
        info!(target: "datkit", "loaded {} tables from {}", registry.tables().count(), path.display());
        Ok(DatManager { registry })
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn parse_file(&self, path: impl AsRef<Path>, validity: Validity) -> Result<Vec<Record>> {
        let path = path.as_ref();
        let res = fs::read(path).map_err(Into::into).and_then(|data| {
            let table = self.registry.resolve_path(path, validity)?;
            debug!(target: "datkit", "decoding {} ({} bytes) as {}", path.display(), data.len(), table.name());
            decode_table(&data, table)
        });
        let records = logged("parsing", path, res)?;
        info!(target: "datkit", "parsed {} rows from {}", records.len(), path.display());
        Ok(records)
    }

    /// Encodes `records` and writes them to `path`, replacing any existing
    /// file. With `table` set the schema is looked up by that name instead
    /// of the output file's name. Returns the bytes written.
    pub fn write_file(
        &self,
        records: &[Record],
        path: impl AsRef<Path>,
        validity: Validity,
        table: Option<&str>,
    ) -> Result<Vec<u8>> {
        let path = path.as_ref();
        let res = (|| -> Result<Vec<u8>> {
            let schema = match table {
                Some(name) => self.registry.resolve(name, validity)?,
                None => self.registry.resolve_path(path, validity)?,
            };
            let data = encode_table(records, schema)?;
            debug!(target: "datkit", "encoded {} rows as {} ({} bytes)", records.len(), schema.name(), data.len());
            fs::write(path, &data)?;
            Ok(data)
        })();
        let data = logged("writing", path, res)?;
        info!(target: "datkit", "wrote {} rows to {}", records.len(), path.display());
        Ok(data)
    }
}

/// Row width the heap marker implies for a file on disk, ignoring any schema.
pub fn infer_file_row_width(path: impl AsRef<Path>) -> Result<Option<usize>> {
    let path = path.as_ref();
    let data = logged("reading", path, fs::read(path).map_err(Into::into))?;
    Ok(infer_row_width(&data))
}
