//! Single-cycle core.
//!
//! Fetches, decodes, executes, accesses memory, and writes back in one step per
//! instruction. Halts on the sentinel `JAL x0, 0` (`0x0000006F`) or when the cycle
//! cap is reached.

use crate::core::alu::Alu;
use crate::core::control::{self, opcodes};
use crate::core::decode::decode;
use crate::core::memory::Memory;
use crate::core::register_file::RegisterFile;
use crate::stats::SimStats;

/// Instruction encoding of `JAL x0, 0` — the clean-halt sentinel.
pub const HALT_SENTINEL: u32 = 0x0000_006F;

pub struct SingleCycleCpu {
    pub regs: RegisterFile,
    pub memory: Memory,
    pub pc: u32,
    pub halted: bool,
    pub stats: SimStats,
    pub trace: bool,
}

impl SingleCycleCpu {
    pub fn new(memory: Memory) -> Self {
        Self {
            regs: RegisterFile::new(),
            memory,
            pc: 0,
            halted: false,
            stats: SimStats::new(),
            trace: false,
        }
    }

    /// Runs until halt or `max_cycles`, whichever comes first. Reaching the cap is
    /// a plain completion, not a failure.
    pub fn run(&mut self, max_cycles: u64) {
        while !self.halted && self.stats.cycles < max_cycles {
            self.tick();
        }
    }

    /// Executes one fetch-decode-execute-memory-writeback step.
    pub fn tick(&mut self) {
        let instr = self.memory.read_word(self.pc);

        if instr == HALT_SENTINEL {
            self.halted = true;
            if self.trace {
                eprintln!("[halt] pc={:#010x}", self.pc);
            }
            return;
        }

        let d = decode(instr);
        let ctrl = control::decode_control(d.opcode);
        let mut next_pc = self.pc.wrapping_add(4);

        let rs1_data = self.regs.read(d.rs1);
        let rs2_data = self.regs.read(d.rs2);

        let mut write_data = 0u32;

        match d.opcode {
            opcodes::R_TYPE => {
                let op = control::alu_op(d.funct3, d.funct7, false);
                write_data = Alu::execute(op, rs1_data, rs2_data);
            }
            opcodes::I_ARITH => {
                let op = control::alu_op(d.funct3, d.funct7, true);
                write_data = Alu::execute(op, rs1_data, d.imm_i as u32);
            }
            opcodes::LOAD => {
                let addr = rs1_data.wrapping_add(d.imm_i as u32);
                write_data = self.memory.read_word(addr);
                if self.trace {
                    eprintln!("[mem] load addr={:#010x} data={:#010x}", addr, write_data);
                }
            }
            opcodes::STORE => {
                let addr = rs1_data.wrapping_add(d.imm_s as u32);
                self.memory.write_word(addr, rs2_data);
                if self.trace {
                    eprintln!("[mem] store addr={:#010x} data={:#010x}", addr, rs2_data);
                }
            }
            opcodes::BRANCH => {
                if control::evaluate_branch(d.funct3, rs1_data, rs2_data) {
                    next_pc = self.pc.wrapping_add(d.imm_b as u32);
                }
            }
            opcodes::JAL => {
                write_data = self.pc.wrapping_add(4);
                next_pc = self.pc.wrapping_add(d.imm_j as u32);
            }
            opcodes::JALR => {
                write_data = self.pc.wrapping_add(4);
                next_pc = rs1_data.wrapping_add(d.imm_i as u32) & !1u32;
            }
            opcodes::LUI => {
                write_data = d.imm_u;
            }
            opcodes::AUIPC => {
                write_data = self.pc.wrapping_add(d.imm_u);
            }
            _ => {}
        }

        if ctrl.reg_write {
            self.regs.write(d.rd, write_data);
            if self.trace {
                eprintln!("[wb] pc={:#010x} x{}<={:#010x}", self.pc, d.rd, write_data);
            }
        }

        self.pc = next_pc;
        self.stats.cycles += 1;
        self.stats.instructions_retired += 1;
    }

    /// PC, cycle count, committed-instruction count, register file, and the
    /// requested memory window per the state-dump contract.
    pub fn dump_state(&self, mem_start: u32, mem_words: usize) -> String {
        let mut out = String::new();
        out.push_str(&format!("pc={:#010x}\n", self.pc));
        out.push_str(&self.stats.format());
        out.push_str(&self.regs.dump());
        for (addr, word) in self.memory.dump_window(mem_start, mem_words) {
            out.push_str(&format!("{:#010x}: {:#010x}\n", addr, word));
        }
        out
    }
}
