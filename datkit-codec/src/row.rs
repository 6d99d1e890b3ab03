use std::collections::BTreeSet;
use datkit_base::{err, ErrorKind, Result};
use crate::{
    heap::{is_null, HeapReader, HeapWriter, NULL_BYTE},
    layout::{RowLayout, Slot, SlotKind},
    Field, Record,
};

fn le_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0_u8; 8];
    buf.copy_from_slice(bytes);
    u64::from_le_bytes(buf)
}

// Slots are at most 16 bytes wide.
fn le_uint(bytes: &[u8]) -> u128 {
    let mut buf = [0_u8; 16];
    buf[..bytes.len()].copy_from_slice(bytes);
    u128::from_le_bytes(buf)
}

impl SlotKind {
    fn expects(&self) -> &'static str {
        match self {
            SlotKind::Text => "text",
            SlotKind::Refs => "reference list",
            SlotKind::Scalar(_) => "integer or absent value",
        }
    }
}

pub struct RowDecoder<'a> {
    layout: &'a RowLayout<'a>,
    heap: HeapReader<'a>,
}

impl<'a> RowDecoder<'a> {
    pub fn new(layout: &'a RowLayout<'a>, heap: HeapReader<'a>) -> Self {
        RowDecoder { layout, heap }
    }

    /// Decodes exactly one row, which must be `layout.width()` bytes.
    pub fn decode(&self, row: &[u8]) -> Result<Record> {
        if row.len() != self.layout.width() {
            return Err(err(ErrorKind::Truncated {
                needed: self.layout.width(),
                len: row.len(),
            }));
        }
        let mut rec = Record::with_capacity(self.layout.slots().len());
        for slot in self.layout.slots() {
            let bytes = &row[slot.offset..slot.offset + slot.width];
            rec.push(slot.column.name.as_str(), self.decode_slot(slot, bytes)?);
        }
        Ok(rec)
    }

    fn decode_slot(&self, slot: &Slot, bytes: &[u8]) -> Result<Field> {
        let field = match slot.kind {
            SlotKind::Text => Field::Text(self.heap.read_text(le_u64(&bytes[..8]))?),
            SlotKind::Refs => {
                let count = le_u64(&bytes[..8]);
                let offset = le_u64(&bytes[8..16]);
                Field::Refs(self.heap.read_refs(count, offset)?)
            }
            SlotKind::Scalar(_) if is_null(bytes) => Field::Absent,
            SlotKind::Scalar(_) => Field::Int(le_uint(bytes)),
        };
        Ok(field)
    }
}

pub struct RowEncoder<'a> {
    layout: &'a RowLayout<'a>,
    names: BTreeSet<&'a str>,
}

impl<'a> RowEncoder<'a> {
    pub fn new(layout: &'a RowLayout<'a>) -> Self {
        let names = layout.table().column_names().collect();
        RowEncoder { layout, names }
    }

    /// A record must name every column exactly once and nothing else.
    pub fn check_columns(&self, record: &Record) -> Result<()> {
        let mut seen = BTreeSet::new();
        let mut unexpected = Vec::new();
        for name in record.names() {
            if !self.names.contains(name) || !seen.insert(name) {
                unexpected.push(name.to_string());
            }
        }
        let missing: Vec<String> = self
            .names
            .iter()
            .filter(|n| !seen.contains(*n))
            .map(|n| n.to_string())
            .collect();
        if missing.is_empty() && unexpected.is_empty() {
            return Ok(());
        }
        Err(err(ErrorKind::ColumnSetMismatch {
            table: self.layout.table().name().to_string(),
            missing,
            unexpected,
        }))
    }

    /// Appends one row to `out`, writing its payloads to `heap`. The record
    /// must already have passed `check_columns`.
    pub fn encode(&self, record: &Record, heap: &mut HeapWriter, out: &mut Vec<u8>) -> Result<()> {
        let slots = self.layout.slots();
        let in_order = record.len() == slots.len()
            && record.names().zip(slots).all(|(n, s)| n == s.column.name);
        if in_order {
            for ((_, field), slot) in record.iter().zip(slots) {
                Self::encode_slot(slot, field, heap, out)?;
            }
        } else {
            for slot in slots {
                let field = record.get(&slot.column.name).ok_or_else(|| {
                    err(ErrorKind::ColumnSetMismatch {
                        table: self.layout.table().name().to_string(),
                        missing: vec![slot.column.name.clone()],
                        unexpected: Vec::new(),
                    })
                })?;
                Self::encode_slot(slot, field, heap, out)?;
            }
        }
        Ok(())
    }

    fn encode_slot(slot: &Slot, field: &Field, heap: &mut HeapWriter, out: &mut Vec<u8>) -> Result<()> {
        match (slot.kind, field) {
            (SlotKind::Text, Field::Text(text)) => {
                out.extend_from_slice(&heap.add_text(text).to_le_bytes());
            }
            (SlotKind::Refs, Field::Refs(refs)) => {
                let (count, offset) = heap.add_refs(refs);
                out.extend_from_slice(&count.to_le_bytes());
                out.extend_from_slice(&offset.to_le_bytes());
            }
            (SlotKind::Scalar(width), Field::Absent) => {
                out.resize(out.len() + width, NULL_BYTE);
            }
            (SlotKind::Scalar(width), Field::Int(value)) => {
                let bytes = value.to_le_bytes();
                let fits = width >= 16 || value >> (8 * width) == 0;
                // A value spelled entirely in null bytes would read back absent.
                if !fits || is_null(&bytes[..width]) {
                    return Err(err(ErrorKind::ValueOutOfRange {
                        column: slot.column.name.clone(),
                        value: *value,
                        width,
                    }));
                }
                out.extend_from_slice(&bytes[..width]);
            }
            (kind, other) => {
                return Err(err(ErrorKind::FieldTypeMismatch {
                    column: slot.column.name.clone(),
                    expected: kind.expects(),
                    found: other.describe(),
                }));
            }
        }
        Ok(())
    }
}
