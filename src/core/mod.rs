//! CPU core: arithmetic, register/memory state, instruction decoding, and the two
//! execution strategies (single-cycle and pipelined) that share that state.

pub mod alu;
pub mod control;
pub mod decode;
pub mod memory;
pub mod pipeline;
pub mod register_file;
pub mod single_cycle;
