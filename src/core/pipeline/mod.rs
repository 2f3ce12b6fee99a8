//! Five-stage pipelined core.
//!
//! Orchestrates fetch, decode, execute, memory, and writeback against the shared
//! latches in [`latches`], applying the hazard/forwarding rules of [`hazard`].
//! A tick evaluates the stages in reverse order (WB, MEM, EX, ID, IF) so each stage
//! reads the latch the previous tick wrote before this tick's earlier stages
//! overwrite it.

pub mod hazard;
pub mod latches;

use crate::core::alu::Alu;
use crate::core::control::{self, opcodes};
use crate::core::decode::decode;
use crate::core::memory::Memory;
use crate::core::register_file::RegisterFile;
use crate::core::single_cycle::HALT_SENTINEL;
use crate::stats::SimStats;
use latches::{ExMem, IdEx, IfId, MemWb};

pub struct PipelinedCpu {
    pub regs: RegisterFile,
    pub memory: Memory,
    pub pc: u32,
    pub halted: bool,
    pub stats: SimStats,
    pub trace: bool,

    if_id: IfId,
    id_ex: IdEx,
    ex_mem: ExMem,
    mem_wb: MemWb,
}

impl PipelinedCpu {
    pub fn new(memory: Memory) -> Self {
        Self {
            regs: RegisterFile::new(),
            memory,
            pc: 0,
            halted: false,
            stats: SimStats::new(),
            trace: false,
            if_id: IfId::default(),
            id_ex: IdEx::default(),
            ex_mem: ExMem::default(),
            mem_wb: MemWb::default(),
        }
    }

    /// Runs until halt, `max_cycles`, or `max_instructions` committed, whichever
    /// comes first. Reaching a cap is a plain completion, not a failure.
    pub fn run(&mut self, max_cycles: u64, max_instructions: u64) {
        while !self.halted
            && self.stats.cycles < max_cycles
            && self.stats.instructions_retired < max_instructions
        {
            self.tick();
        }
    }

    pub fn tick(&mut self) {
        self.writeback_stage();
        self.memory_stage();
        self.execute_stage();
        self.decode_stage();
        self.fetch_stage();
        self.stats.cycles += 1;
    }

    fn writeback_stage(&mut self) {
        if self.mem_wb.valid && self.mem_wb.reg_write {
            let val = self.mem_wb.commit_value();
            self.regs.write(self.mem_wb.rd, val);
            self.stats.instructions_retired += 1;
            if self.trace {
                eprintln!("WB  x{}<={:#010x}", self.mem_wb.rd, val);
            }
        } else if self.mem_wb.valid && self.trace {
            eprintln!("WB  (no write)");
        }
    }

    fn memory_stage(&mut self) {
        if !self.ex_mem.valid {
            self.mem_wb.flush();
            return;
        }

        let ex = self.ex_mem;
        let mut mem_data = 0u32;

        if ex.mem_read {
            mem_data = self.memory.read_word(ex.alu_result);
            if self.trace {
                eprintln!("MEM load addr={:#010x} data={:#010x}", ex.alu_result, mem_data);
            }
        } else if ex.mem_write {
            self.memory.write_word(ex.alu_result, ex.rs2_data);
            if self.trace {
                eprintln!("MEM store addr={:#010x} data={:#010x}", ex.alu_result, ex.rs2_data);
            }
        }

        if ex.branch_taken || ex.jump {
            self.pc = ex.branch_target;
            self.if_id.flush();
            self.id_ex.flush();
            self.stats.control_hazards += 1;
        }

        self.mem_wb = MemWb {
            valid: true,
            alu_result: ex.alu_result,
            mem_data,
            rd: ex.rd,
            reg_write: ex.reg_write,
            mem_to_reg: ex.mem_to_reg,
        };
    }

    fn execute_stage(&mut self) {
        if !self.id_ex.valid {
            self.ex_mem.flush();
            return;
        }

        let id = self.id_ex;
        let (fwd_rs1, fwd_rs2) = hazard::forward(&id, &self.ex_mem, &self.mem_wb);

        let alu_b = if id.ctrl.alu_src {
            id.imm as u32
        } else {
            fwd_rs2
        };

        let mut alu_result;
        let mut branch_taken = false;
        let mut branch_target = 0u32;

        match id.opcode {
            opcodes::R_TYPE => {
                let op = control::alu_op(id.funct3, id.funct7, false);
                alu_result = Alu::execute(op, fwd_rs1, alu_b);
            }
            opcodes::I_ARITH => {
                let op = control::alu_op(id.funct3, id.funct7, true);
                alu_result = Alu::execute(op, fwd_rs1, alu_b);
            }
            opcodes::LOAD | opcodes::STORE => {
                alu_result = fwd_rs1.wrapping_add(id.imm as u32);
            }
            opcodes::BRANCH => {
                alu_result = id.pc.wrapping_add(id.imm as u32);
                branch_taken = control::evaluate_branch(id.funct3, fwd_rs1, fwd_rs2);
                branch_target = id.pc.wrapping_add(id.imm as u32);
            }
            opcodes::JAL => {
                alu_result = id.pc.wrapping_add(4);
                branch_target = id.pc.wrapping_add(id.imm as u32);
            }
            opcodes::JALR => {
                alu_result = id.pc.wrapping_add(4);
                branch_target = fwd_rs1.wrapping_add(id.imm as u32) & !1u32;
            }
            opcodes::LUI => {
                alu_result = id.imm as u32;
            }
            opcodes::AUIPC => {
                alu_result = id.pc.wrapping_add(id.imm as u32);
            }
            _ => {
                alu_result = 0;
            }
        }

        if self.trace {
            eprintln!(
                "EX  pc={:#010x} alu={:#010x} a={:#010x} b={:#010x}",
                id.pc, alu_result, fwd_rs1, alu_b
            );
        }

        self.ex_mem = ExMem {
            valid: true,
            pc: id.pc,
            alu_result,
            rs2_data: fwd_rs2,
            rd: id.rd,
            branch_target,
            branch_taken: branch_taken && id.ctrl.branch,
            reg_write: id.ctrl.reg_write,
            mem_read: id.ctrl.mem_read,
            mem_write: id.ctrl.mem_write,
            mem_to_reg: id.ctrl.mem_to_reg,
            jump: id.ctrl.jump,
        };
    }

    fn decode_stage(&mut self) {
        if !self.if_id.valid {
            self.id_ex.flush();
            return;
        }

        let instr = self.if_id.instr;
        let pc = self.if_id.pc;

        if hazard::need_stall_load_use(&self.id_ex, &self.if_id) {
            self.id_ex.flush();
            self.if_id.stall = true;
            self.pc = self.pc.wrapping_sub(4);
            if self.trace {
                eprintln!("ID  pc={:#010x} stall (load-use hazard)", pc);
            }
            self.stats.stalls += 1;
            return;
        }

        self.if_id.stall = false;

        let d = decode(instr);
        let ctrl = control::decode_control(d.opcode);
        let imm = match d.opcode {
            opcodes::STORE => d.imm_s,
            opcodes::BRANCH => d.imm_b,
            opcodes::LUI | opcodes::AUIPC => d.imm_u as i32,
            opcodes::JAL => d.imm_j,
            _ => d.imm_i,
        };

        self.id_ex = IdEx {
            valid: true,
            pc,
            rs1_data: self.regs.read(d.rs1),
            rs2_data: self.regs.read(d.rs2),
            rs1: d.rs1,
            rs2: d.rs2,
            rd: d.rd,
            imm,
            funct3: d.funct3,
            funct7: d.funct7,
            opcode: d.opcode,
            ctrl,
        };

        if self.trace {
            eprintln!("ID  pc={:#010x} opcode={:#04x}", pc, d.opcode);
        }
    }

    fn fetch_stage(&mut self) {
        if hazard::need_control_hazard_flush(&self.ex_mem) {
            self.if_id.flush();
            return;
        }

        if self.if_id.stall {
            return;
        }

        let instr = self.memory.read_word(self.pc);

        // Halt only once the sentinel has already sat in IF/ID (fetched on a
        // prior tick, surviving untouched) and every later latch has drained.
        // A fresh sentinel word alone isn't enough: it takes another tick to
        // confirm nothing downstream is still mid-flight.
        if instr == HALT_SENTINEL
            && self.if_id.valid
            && self.if_id.instr == HALT_SENTINEL
            && !self.id_ex.valid
            && !self.ex_mem.valid
            && !self.mem_wb.valid
        {
            self.halted = true;
            if self.trace {
                eprintln!("[halt] pc={:#010x}", self.pc);
            }
            return;
        }

        if self.trace {
            eprintln!("IF  pc={:#010x} instr={:#010x}", self.pc, instr);
        }

        self.if_id = IfId {
            valid: true,
            stall: false,
            pc: self.pc,
            instr,
        };
        self.pc = self.pc.wrapping_add(4);
    }

    /// PC, cycle/committed-instruction counts, CPI/stall/hazard tallies, register
    /// file, and the requested memory window, per the state-dump contract.
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
