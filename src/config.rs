//! Configuration.
//!
//! An optional TOML file supplying the run defaults: memory size, cycle/
//! instruction caps, and the debug/trace flag. Every field has a
//! `#[serde(default = "...")]` function, so a config file that
//! omits a key (or the absence of a config file at all) is never an error — only
//! a malformed TOML document is. CLI flags, when given, override these values.

use serde::Deserialize;

const DEFAULT_MEMORY_SIZE: usize = 128 * 1024;
const DEFAULT_SINGLE_CYCLE_MAX_CYCLES: u64 = 10_000;
const DEFAULT_PIPELINED_MAX_CYCLES: u64 = 10_000;
const DEFAULT_PIPELINED_MAX_INSTRUCTIONS: u64 = 10_000;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_memory_size")]
    pub memory_size: usize,

    #[serde(default = "default_single_cycle_max_cycles")]
    pub single_cycle_max_cycles: u64,

    #[serde(default = "default_pipelined_max_cycles")]
    pub pipelined_max_cycles: u64,

    #[serde(default = "default_pipelined_max_instructions")]
    pub pipelined_max_instructions: u64,

    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            memory_size: default_memory_size(),
            single_cycle_max_cycles: default_single_cycle_max_cycles(),
            pipelined_max_cycles: default_pipelined_max_cycles(),
            pipelined_max_instructions: default_pipelined_max_instructions(),
            debug: false,
        }
    }
}

impl Config {
    /// Parses `text` as TOML, falling back to built-in defaults for any key left
    /// unspecified.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

fn default_memory_size() -> usize {
    DEFAULT_MEMORY_SIZE
}

fn default_single_cycle_max_cycles() -> u64 {
    DEFAULT_SINGLE_CYCLE_MAX_CYCLES
}

fn default_pipelined_max_cycles() -> u64 {
    DEFAULT_PIPELINED_MAX_CYCLES
}

fn default_pipelined_max_instructions() -> u64 {
    DEFAULT_PIPELINED_MAX_INSTRUCTIONS
}
