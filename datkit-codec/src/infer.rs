use memchr::memmem;
use crate::{file::{row_count, HEADER_LEN}, heap::HEAP_MARKER};

/// Row width implied by the earliest heap marker that the row count divides
/// evenly. Every occurrence is a candidate, overlapping ones included, since
/// rows can themselves end in 0xbb bytes.
///
/// Diagnostic only: a decode never proceeds on an inferred width.
pub fn infer_row_width(data: &[u8]) -> Option<usize> {
    let rows = row_count(data).ok()? as usize;
    if rows == 0 {
        return None;
    }
    let mut from = HEADER_LEN.min(data.len());
    while let Some(pos) = memmem::find(&data[from..], &HEAP_MARKER) {
        let at = from + pos;
        if (at - HEADER_LEN) % rows == 0 {
            return Some((at - HEADER_LEN) / rows);
        }
        from = at + 1;
    }
    None
}
