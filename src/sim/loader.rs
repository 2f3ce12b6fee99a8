//! Hex program loader.
//!
//! Reads a textual hex program file and loads it into a fresh [`Memory`]. Unlike
//! the reference implementation's binary/kernel loader (which reports a read
//! failure and exits the process directly), this loader returns a `Result` so
//! `main` decides how to report it — the ambient stack propagates I/O errors to
//! the caller rather than exiting from deep inside a library call (SPEC_FULL.md
//! §4.11).

use std::fs;

use crate::common::SimError;
use crate::core::memory::Memory;

/// Reads `path`, parses it as a hex program, and returns a [`Memory`] of `size`
/// bytes with the program loaded at address 0.
pub fn load_program(path: &str, size: usize) -> Result<Memory, SimError> {
    let text = fs::read_to_string(path)?;
    let mut memory = Memory::new(size);
    memory.load_program(&text)?;
    Ok(memory)
}
