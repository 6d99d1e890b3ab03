// The file-facing side of the codec: schema documents and dat files are read
// from and written to paths here, and records travel as JSON. None of this
// is needed to use `datkit-codec` directly on byte buffers.


pub mod json;
mod manager;

pub use datkit_base::{Error, ErrorKind, Result};
pub use datkit_codec::{Field, Record};
pub use datkit_schema::{SchemaRegistry, TableSchema, Validity};
pub use manager::{infer_file_row_width, DatManager};
