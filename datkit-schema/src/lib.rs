// A schema document lists every table a dat file can hold. Each table is a
// name, a revision tag and an ordered list of columns; each column is a name,
// one of six primitive type keywords and an array flag.
//
// The document is parsed once into a `SchemaRegistry`, which is read-only
// from then on and can be shared freely across threads. Lookups are by
// case-folded table name plus a `Validity` tag, and the table name is usually
// derived from the dat file's own name.


mod column;
mod document;
mod registry;
mod validity;

pub use column::{Column, ColumnType};
pub use document::{ColumnDocument, SchemaDocument, TableDocument};
pub use registry::{table_identifier, SchemaRegistry, TableSchema};
pub use validity::Validity;
