use datkit_base::{err, ErrorKind, Result};
use datkit_schema::{Column, ColumnType, TableSchema};

/// How a slot's bytes are read. One of these per column, picked once from
/// the column's type and array flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// u64 heap offset of a text entry.
    Text,
    /// u64 element count then u64 heap offset of the elements.
    Refs,
    /// Unsigned little-endian integer of the given width, or absent.
    Scalar(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot<'a> {
    pub column: &'a Column,
    pub kind: SlotKind,
    pub offset: usize,
    pub width: usize,
}

/// Byte positions of each column within a row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowLayout<'a> {
    table: &'a TableSchema,
    slots: Vec<Slot<'a>>,
    width: usize,
}

impl<'a> RowLayout<'a> {
    pub fn new(table: &'a TableSchema) -> Result<Self> {
        let mut slots = Vec::with_capacity(table.columns().len());
        let mut offset = 0;
        for column in table.columns() {
            let width = column.ty.width().ok_or_else(|| {
                err(ErrorKind::UnsupportedColumnType {
                    table: table.name().to_string(),
                    column: column.name.clone(),
                    type_name: column.ty.keyword().to_string(),
                })
            })?;
            let kind = if column.ty == ColumnType::String {
                SlotKind::Text
            } else if column.is_ref_array() {
                SlotKind::Refs
            } else {
                SlotKind::Scalar(width)
            };
            slots.push(Slot {
                column,
                kind,
                offset,
                width,
            });
            offset += width;
        }
        Ok(RowLayout {
            table,
            slots,
            width: offset,
        })
    }

    pub fn table(&self) -> &'a TableSchema {
        self.table
    }

    pub fn slots(&self) -> &[Slot<'a>] {
        &self.slots
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

/// Sum of the slot widths of every column, in declared order.
pub fn row_width(table: &TableSchema) -> Result<usize> {
    Ok(RowLayout::new(table)?.width())
}
