/// One decoded column value.
///
/// Scalars are unsigned and may be up to 16 bytes wide (a foreignrow slot),
/// hence `u128`. `Absent` is only ever produced for scalar slots.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Text(String),
    Refs(Vec<u128>),
    Int(u128),
    Absent,
}

impl Field {
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Field::Text(_) => "text",
            Field::Refs(_) => "reference list",
            Field::Int(_) => "integer",
            Field::Absent => "absent value",
        }
    }
}

impl From<&str> for Field {
    fn from(s: &str) -> Self {
        Field::Text(s.to_string())
    }
}

impl From<String> for Field {
    fn from(s: String) -> Self {
        Field::Text(s)
    }
}

impl From<u128> for Field {
    fn from(v: u128) -> Self {
        Field::Int(v)
    }
}

impl From<Option<u128>> for Field {
    fn from(v: Option<u128>) -> Self {
        v.map_or(Field::Absent, Field::Int)
    }
}

impl From<Vec<u128>> for Field {
    fn from(v: Vec<u128>) -> Self {
        Field::Refs(v)
    }
}

/// Named fields of one row, in column declaration order when decoded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Record {
    fields: Vec<(String, Field)>,
}

impl Record {
    pub fn new() -> Self {
        Record { fields: Vec::new() }
    }

    pub fn with_capacity(n: usize) -> Self {
        Record {
            fields: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, field: impl Into<Field>) {
        self.fields.push((name.into(), field.into()));
    }

    pub fn with(mut self, name: impl Into<String>, field: impl Into<Field>) -> Self {
        self.push(name, field);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(n, f)| (n.as_str(), f))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, Field)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Field)>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Record {
    type Item = (String, Field);
    type IntoIter = std::vec::IntoIter<(String, Field)>;
    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
