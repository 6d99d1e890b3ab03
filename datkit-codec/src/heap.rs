use memchr::memmem;
use rapidhash::RapidHashMap;
use datkit_base::{err, ErrorKind, Result};

/// Opens the heap region. Offsets into the heap count from its first byte.
pub const HEAP_MARKER: [u8; 8] = [0xbb; 8];

/// A scalar slot made entirely of this byte is absent.
pub const NULL_BYTE: u8 = 0xfe;

/// Width of one element of a reference array.
pub const REF_WIDTH: usize = 16;

// Two zero UTF-16 code units.
const TEXT_TERMINATOR: [u8; 4] = [0; 4];

/// True when every byte of a non-empty slot is the null byte.
pub fn is_null(slot: &[u8]) -> bool {
    !slot.is_empty() && slot.iter().all(|b| *b == NULL_BYTE)
}

fn out_of_bounds(offset: u64, len: u64, heap_len: usize) -> datkit_base::Error {
    err(ErrorKind::HeapBoundsError {
        offset,
        len,
        heap_len,
    })
}

/// Reads payloads out of a heap region, marker included.
#[derive(Clone, Copy, Debug)]
pub struct HeapReader<'a> {
    data: &'a [u8],
}

impl<'a> HeapReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        HeapReader { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn tail(&self, offset: u64) -> Result<&'a [u8]> {
        match usize::try_from(offset) {
            Ok(start) if start <= self.data.len() => Ok(&self.data[start..]),
            _ => Err(out_of_bounds(offset, 0, self.data.len())),
        }
    }

    /// Text starting at `offset`, up to the first pair of zero code units.
    pub fn read_text(&self, offset: u64) -> Result<String> {
        let tail = self.tail(offset)?;
        // The terminator has to sit on a code unit boundary, and a zero high
        // byte followed by a zero unit can look like one a byte early, so
        // keep searching one byte past each misaligned hit.
        let mut from = 0;
        let end = loop {
            match memmem::find(&tail[from..], &TEXT_TERMINATOR) {
                Some(pos) if (from + pos) % 2 == 0 => break from + pos,
                Some(pos) => from += pos + 1,
                None => {
                    let scanned = (tail.len() + TEXT_TERMINATOR.len()) as u64;
                    return Err(out_of_bounds(offset, scanned, self.data.len()));
                }
            }
        };
        let units: Vec<u16> = tail[..end]
            .chunks_exact(2)
            .map(|u| u16::from_le_bytes([u[0], u[1]]))
            .collect();
        String::from_utf16(&units).map_err(|_| err(ErrorKind::InvalidText { offset }))
    }

    /// `count` consecutive 16-byte elements starting at `offset`. An empty
    /// array never touches the heap, so its offset is not checked.
    pub fn read_refs(&self, count: u64, offset: u64) -> Result<Vec<u128>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let len = count
            .checked_mul(REF_WIDTH as u64)
            .ok_or_else(|| out_of_bounds(offset, u64::MAX, self.data.len()))?;
        let tail = self.tail(offset)?;
        let len_usz = usize::try_from(len)
            .ok()
            .filter(|n| *n <= tail.len())
            .ok_or_else(|| out_of_bounds(offset, len, self.data.len()))?;
        let refs = tail[..len_usz]
            .chunks_exact(REF_WIDTH)
            .map(|c| {
                let mut buf = [0_u8; REF_WIDTH];
                buf.copy_from_slice(c);
                u128::from_le_bytes(buf)
            })
            .collect();
        Ok(refs)
    }
}

/// Accumulates the heap of one encode call.
///
/// The buffer starts out holding the marker, so the write cursor is simply
/// the buffer length and starts at 8. A string that was already written in
/// this call is never written again; its first offset is handed back.
#[derive(Debug)]
pub struct HeapWriter {
    data: Vec<u8>,
    strings: RapidHashMap<String, u64>,
}

impl Default for HeapWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl HeapWriter {
    pub fn new() -> Self {
        HeapWriter {
            data: HEAP_MARKER.to_vec(),
            strings: RapidHashMap::default(),
        }
    }

    pub fn cursor(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn add_text(&mut self, text: &str) -> u64 {
        if let Some(pos) = self.strings.get(text) {
            return *pos;
        }
        let pos = self.cursor();
        self.data.reserve(text.len() * 2 + TEXT_TERMINATOR.len());
        for unit in text.encode_utf16() {
            self.data.extend_from_slice(&unit.to_le_bytes());
        }
        self.data.extend_from_slice(&TEXT_TERMINATOR);
        self.strings.insert(text.to_string(), pos);
        pos
    }

    /// Returns the `(count, offset)` descriptor. Empty arrays emit nothing
    /// and point at the current cursor.
    pub fn add_refs(&mut self, refs: &[u128]) -> (u64, u64) {
        let pos = self.cursor();
        self.data.reserve(refs.len() * REF_WIDTH);
        for r in refs {
            self.data.extend_from_slice(&r.to_le_bytes());
        }
        (refs.len() as u64, pos)
    }

    /// The finished heap region, marker first.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}
