//! Ambient-stack error type.
//!
//! Unlike the core, which is architecturally error-free by design, the loader
//! and config layers are ordinary fallible Rust: a missing file or a malformed
//! line is reported, not silently tolerated.

use std::fmt;

use crate::core::memory::ProgramParseError;

#[derive(Debug)]
pub enum SimError {
    Io(std::io::Error),
    Program(ProgramParseError),
    Config(toml::de::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Io(e) => write!(f, "{}", e),
            SimError::Program(e) => write!(f, "{}", e),
            SimError::Config(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SimError {}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::Io(e)
    }
}

impl From<ProgramParseError> for SimError {
    fn from(e: ProgramParseError) -> Self {
        SimError::Program(e)
    }
}

impl From<toml::de::Error> for SimError {
    fn from(e: toml::de::Error) -> Self {
        SimError::Config(e)
    }
}
