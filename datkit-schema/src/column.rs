/// Primitive column types with their fixed slot widths in the row region.
///
/// Keywords outside the supported six are kept as `Unsupported` so a
/// document that mentions them still loads; only tables that use one fail,
/// and only once their layout is computed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnType {
    String,
    ForeignRow,
    I32,
    EnumRow,
    Bool,
    Row,
    Unsupported(String),
}

impl ColumnType {
    pub fn from_keyword(keyword: &str) -> ColumnType {
        match keyword {
            "string" => ColumnType::String,
            "foreignrow" => ColumnType::ForeignRow,
            "i32" => ColumnType::I32,
            "enumrow" => ColumnType::EnumRow,
            "bool" => ColumnType::Bool,
            "row" => ColumnType::Row,
            other => ColumnType::Unsupported(other.to_string()),
        }
    }

    pub fn keyword(&self) -> &str {
        match self {
            ColumnType::String => "string",
            ColumnType::ForeignRow => "foreignrow",
            ColumnType::I32 => "i32",
            ColumnType::EnumRow => "enumrow",
            ColumnType::Bool => "bool",
            ColumnType::Row => "row",
            ColumnType::Unsupported(kw) => kw,
        }
    }

    /// Slot width in bytes. The array flag never changes this.
    pub fn width(&self) -> Option<usize> {
        match self {
            ColumnType::String => Some(8),
            ColumnType::ForeignRow => Some(16),
            ColumnType::I32 => Some(4),
            ColumnType::EnumRow => Some(4),
            ColumnType::Bool => Some(1),
            ColumnType::Row => Some(8),
            ColumnType::Unsupported(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
    pub array: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: ColumnType, array: bool) -> Self {
        Column {
            name: name.into(),
            ty,
            array,
        }
    }

    // Only foreignrow honours the array flag; an array of anything else is
    // read as its scalar type.
    pub fn is_ref_array(&self) -> bool {
        self.array && self.ty == ColumnType::ForeignRow
    }
}
