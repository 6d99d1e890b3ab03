// A dat file is a homogeneous table of fixed-width rows followed by a heap:
//
//   u32 row count
//   row region: row count * row width bytes, no padding or alignment
//   heap region: 8 bytes of 0xbb (the marker), then payloads
//
// Each column occupies a slot of fixed width determined only by its type:
//
//   - string (8 bytes): u64 offset of UTF-16LE text ending in two zero units
//   - foreignrow (16 bytes): u128 scalar, or when flagged as an array a
//     u64 count followed by a u64 offset of count u128 elements
//   - i32, enumrow (4), bool (1), row (8): unsigned scalars
//
// Every heap offset counts from the start of the marker. A scalar slot that
// is entirely 0xfe is absent. Nothing else marks it.
//
// The marker doubles as a checksum on the computed row width: if the schema
// is wrong, the byte at 4 + rows * width is not the start of a marker, and
// decoding fails. In that case we scan for markers that *would* be consistent
// with the row count and report the width they imply, so the schema can be
// fixed by hand.
//
// Encoding is the reverse, with one wrinkle: identical strings within one
// encode call share a single heap entry, so re-encoding a decoded file does
// not grow it.


mod field;
mod file;
mod heap;
mod infer;
mod layout;
mod row;

pub use field::{Field, Record};
pub use file::{decode, decode_table, encode, encode_table, row_count, HEADER_LEN};
pub use heap::{is_null, HeapReader, HeapWriter, HEAP_MARKER, NULL_BYTE, REF_WIDTH};
pub use infer::infer_row_width;
pub use layout::{row_width, RowLayout, Slot, SlotKind};
pub use row::{RowDecoder, RowEncoder};
