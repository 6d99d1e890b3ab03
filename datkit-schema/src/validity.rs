use std::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};

/// Revision selector for tables that share a name. Tagged `1`, `2` and `3`
/// in schema documents, where `3` is the wildcard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Validity {
    First,
    Second,
    #[default]
    Any,
}

impl Validity {
    pub fn tag(self) -> u8 {
        match self {
            Validity::First => 1,
            Validity::Second => 2,
            Validity::Any => 3,
        }
    }

    /// Whether a lookup made with `self` accepts a table tagged `table`.
    /// The wildcard accepts anything; a concrete tag only its equal, so a
    /// table tagged `3` is only reachable through a wildcard lookup.
    pub fn accepts(self, table: Validity) -> bool {
        self == Validity::Any || self == table
    }
}

impl TryFrom<u8> for Validity {
    type Error = String;
    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(Validity::First),
            2 => Ok(Validity::Second),
            3 => Ok(Validity::Any),
            other => Err(format!("unknown validity tag {}", other)),
        }
    }
}

impl From<Validity> for u8 {
    fn from(v: Validity) -> u8 {
        v.tag()
    }
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Validity {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("any") {
            return Ok(Validity::Any);
        }
        let tag: u8 = s
            .parse()
            .map_err(|_| format!("validity must be 1, 2, 3 or any, got {:?}", s))?;
        Validity::try_from(tag)
    }
}
