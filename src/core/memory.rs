//! Flat byte-addressable memory.
//!
//! Word accesses are little-endian; an access that doesn't fully fit inside the
//! array is a silent no-op (read returns 0, write is dropped) rather than a fault.
//! There is no alignment check on load/store addresses.

use std::fmt;

/// Default memory size: 128 KiB.
pub const DEFAULT_SIZE: usize = 128 * 1024;

pub struct Memory {
    bytes: Vec<u8>,
}

/// A malformed line in a hex program file.
#[derive(Debug)]
pub struct ProgramParseError {
    pub line_no: usize,
    pub line: String,
}

impl fmt::Display for ProgramParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "malformed hex word on line {}: {:?}",
            self.line_no, self.line
        )
    }
}

impl std::error::Error for ProgramParseError {}

impl Memory {
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0u8; size],
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Reads the little-endian word at byte address `addr`, or 0 if `addr..addr+4`
    /// doesn't fit in the array.
    pub fn read_word(&self, addr: u32) -> u32 {
        let addr = addr as usize;
        if addr.checked_add(4).map_or(true, |end| end > self.bytes.len()) {
            return 0;
        }
        u32::from_le_bytes([
            self.bytes[addr],
            self.bytes[addr + 1],
            self.bytes[addr + 2],
            self.bytes[addr + 3],
        ])
    }

    /// Writes `val` little-endian at byte address `addr`; a no-op if it doesn't fit.
    pub fn write_word(&mut self, addr: u32, val: u32) {
        let addr = addr as usize;
        if addr.checked_add(4).map_or(true, |end| end > self.bytes.len()) {
            return;
        }
        self.bytes[addr..addr + 4].copy_from_slice(&val.to_le_bytes());
    }

    /// Parses textual hex lines (blank and `#`-comment lines skipped) and writes
    /// each surviving word at consecutive 4-byte-stride addresses starting at 0.
    pub fn load_program(&mut self, text: &str) -> Result<(), ProgramParseError> {
        let mut addr: u32 = 0;
        for (line_no, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let word = u32::from_str_radix(line, 16).map_err(|_| ProgramParseError {
                line_no: line_no + 1,
                line: raw.to_string(),
            })?;
            self.write_word(addr, word);
            addr = addr.wrapping_add(4);
        }
        Ok(())
    }

    /// Returns `(addr, word)` pairs for `words` consecutive words starting at `start`,
    /// for the state-dump memory window.
    pub fn dump_window(&self, start: u32, words: usize) -> Vec<(u32, u32)> {
        (0..words)
            .map(|i| {
                let addr = start.wrapping_add((i * 4) as u32);
                (addr, self.read_word(addr))
            })
            .collect()
    }
}
