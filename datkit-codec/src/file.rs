use datkit_base::{err, ErrorKind, Result};
use datkit_schema::{SchemaRegistry, TableSchema, Validity};
use crate::{
    heap::{HeapReader, HeapWriter, HEAP_MARKER},
    infer::infer_row_width,
    layout::RowLayout,
    row::{RowDecoder, RowEncoder},
    Record,
};

/// Length of the u32 row count that opens every file.
pub const HEADER_LEN: usize = 4;

pub fn row_count(data: &[u8]) -> Result<u32> {
    match data.get(..HEADER_LEN) {
        Some(head) => Ok(u32::from_le_bytes([head[0], head[1], head[2], head[3]])),
        None => Err(err(ErrorKind::Truncated {
            needed: HEADER_LEN,
            len: data.len(),
        })),
    }
}

/// Decodes a whole file against a known table.
pub fn decode_table(data: &[u8], table: &TableSchema) -> Result<Vec<Record>> {
    let rows = row_count(data)? as usize;
    let layout = RowLayout::new(table)?;
    let width = layout.width();
    let heap_start = rows
        .checked_mul(width)
        .and_then(|n| n.checked_add(HEADER_LEN))
        .filter(|start| data.len() >= *start && data[*start..].starts_with(&HEAP_MARKER));
    let Some(heap_start) = heap_start else {
        return Err(err(ErrorKind::HeapMarkerMismatch {
            row_width: width,
            inferred: infer_row_width(data),
        }));
    };
    let row_region = &data[HEADER_LEN..heap_start];
    let decoder = RowDecoder::new(&layout, HeapReader::new(&data[heap_start..]));
    (0..rows)
        .map(|i| decoder.decode(&row_region[i * width..(i + 1) * width]))
        .collect()
}

/// Encodes records into a whole file for a known table. Every record's
/// columns are checked before anything is written.
pub fn encode_table(records: &[Record], table: &TableSchema) -> Result<Vec<u8>> {
    let layout = RowLayout::new(table)?;
    let encoder = RowEncoder::new(&layout);
    for rec in records {
        encoder.check_columns(rec)?;
    }
    let rows = u32::try_from(records.len())
        .map_err(|_| err(ErrorKind::TooManyRows { rows: records.len() }))?;
    let mut heap = HeapWriter::new();
    let mut out = Vec::with_capacity(HEADER_LEN + records.len() * layout.width());
    out.extend_from_slice(&rows.to_le_bytes());
    for rec in records {
        encoder.encode(rec, &mut heap, &mut out)?;
    }
    out.extend_from_slice(&heap.into_bytes());
    Ok(out)
}

pub fn decode(
    registry: &SchemaRegistry,
    data: &[u8],
    table: &str,
    validity: Validity,
) -> Result<Vec<Record>> {
    decode_table(data, registry.resolve(table, validity)?)
}

pub fn encode(
    registry: &SchemaRegistry,
    records: &[Record],
    table: &str,
    validity: Validity,
) -> Result<Vec<u8>> {
    encode_table(records, registry.resolve(table, validity)?)
}
