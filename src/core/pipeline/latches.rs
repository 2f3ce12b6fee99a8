//! Pipeline latches.
//!
//! Four single-entry buffers sit between the five stages. Each carries a `valid`
//! flag; `valid = false` is a bubble and must not cause a register write, memory
//! access, or PC redirect. IF/ID additionally carries `stall`, set when a load-use
//! hazard holds the next instruction back in decode.
//!
//! A flush clears `valid` but leaves the payload fields at their last value — a
//! consumer that forgets to check `valid` will read stale data, not zeros.

use crate::core::control::ControlSignals;

#[derive(Clone, Copy, Debug, Default)]
pub struct IfId {
    pub valid: bool,
    pub stall: bool,
    pub pc: u32,
    pub instr: u32,
}

impl IfId {
    pub fn flush(&mut self) {
        self.valid = false;
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct IdEx {
    pub valid: bool,
    pub pc: u32,
    pub rs1_data: u32,
    pub rs2_data: u32,
    pub rs1: u32,
    pub rs2: u32,
    pub rd: u32,
    pub imm: i32,
    pub funct3: u32,
    pub funct7: u32,
    pub opcode: u32,
    pub ctrl: ControlSignals,
}

impl IdEx {
    pub fn flush(&mut self) {
        self.valid = false;
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ExMem {
    pub valid: bool,
    pub pc: u32,
    pub alu_result: u32,
    pub rs2_data: u32,
    pub rd: u32,
    pub branch_target: u32,
    pub branch_taken: bool,
    pub reg_write: bool,
    pub mem_read: bool,
    pub mem_write: bool,
    pub mem_to_reg: bool,
    pub jump: bool,
}

impl ExMem {
    pub fn flush(&mut self) {
        self.valid = false;
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MemWb {
    pub valid: bool,
    pub alu_result: u32,
    pub mem_data: u32,
    pub rd: u32,
    pub reg_write: bool,
    pub mem_to_reg: bool,
}

impl MemWb {
    pub fn flush(&mut self) {
        self.valid = false;
    }

    /// `mem_to_reg ? mem_data : alu_result` — the value this latch commits.
    pub fn commit_value(&self) -> u32 {
        if self.mem_to_reg {
            self.mem_data
        } else {
            self.alu_result
        }
    }
}
