// We want a few things here:
// 1. A typed kind for every failure, so callers can match on it and log the
//    structured detail (offsets, widths, column names) themselves
// 2. A backtrace captured where the error is first built
// 3. A single place to set a breakpoint to trap any error in the system
//
// Nothing here logs. Reporting is left to whoever holds the error last.

use std::fmt;
use backtrace_error::DynBacktraceError;

#[cfg(test)]
use test_log::test;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("no table {table:?} valid for revision {validity}")]
    SchemaNotFound { table: String, validity: u8 },

    #[error("columns of table {table:?} do not match record: missing {missing:?}, unexpected {unexpected:?}")]
    ColumnSetMismatch {
        table: String,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("row width {row_width} does not end at the heap marker (inferred width: {})", show_width(.inferred))]
    HeapMarkerMismatch {
        row_width: usize,
        inferred: Option<usize>,
    },

    #[error("heap read of {len} bytes at offset {offset} runs past heap end {heap_len}")]
    HeapBoundsError { offset: u64, len: u64, heap_len: usize },

    // Never raised: reference targets are not checked.
    #[error("column {column:?} refers to missing row {index}")]
    UnresolvedReference { column: String, index: u128 },

    #[error("file of {len} bytes is truncated, need at least {needed}")]
    Truncated { needed: usize, len: usize },

    #[error("column {column:?} of table {table:?} has unsupported type {type_name:?}")]
    UnsupportedColumnType {
        table: String,
        column: String,
        type_name: String,
    },

    #[error("column {column:?} expects {expected}, found {found}")]
    FieldTypeMismatch {
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("value {value} of column {column:?} does not fit a {width}-byte slot")]
    ValueOutOfRange {
        column: String,
        value: u128,
        width: usize,
    },

    #[error("heap text at offset {offset} is not valid UTF-16")]
    InvalidText { offset: u64 },

    #[error("{rows} rows exceed the 32-bit row count")]
    TooManyRows { rows: usize },

    #[error("schema document: {0}")]
    Schema(String),

    #[error("json: {0}")]
    Json(String),

    #[error("i/o: {0}")]
    Io(String),
}

fn show_width(w: &Option<usize>) -> String {
    match w {
        Some(w) => w.to_string(),
        None => "none".to_string(),
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    trace: DynBacktraceError,
}
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn new(kind: ErrorKind) -> Error {
        let trace = DynBacktraceError::from(kind.clone());
        Error { kind, trace }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    /// Backtrace captured when this error was built.
    pub fn trace(&self) -> &DynBacktraceError {
        &self.trace
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl std::error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error::new(kind)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::new(ErrorKind::Io(e.to_string()))
    }
}

pub fn err(kind: ErrorKind) -> Error {
    Error::new(kind)
}

#[test]
fn test_error() {
    let e = err(ErrorKind::Schema("test error".into()));
    assert_eq!(e.kind(), &ErrorKind::Schema("test error".into()));
    assert_eq!(e.to_string(), "schema document: test error");
}

#[test]
fn test_marker_mismatch_reports_both_widths() {
    let e = err(ErrorKind::HeapMarkerMismatch {
        row_width: 10,
        inferred: Some(12),
    });
    assert_eq!(
        e.to_string(),
        "row width 10 does not end at the heap marker (inferred width: 12)"
    );
    let e = err(ErrorKind::HeapMarkerMismatch {
        row_width: 10,
        inferred: None,
    });
    assert!(e.to_string().ends_with("(inferred width: none)"));
}
