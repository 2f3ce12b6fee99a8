//! Hazard detection and operand forwarding.

use super::latches::{ExMem, IdEx, IfId, MemWb};

/// True when `id_ex` holds a load whose destination is read by the instruction
/// currently sitting in `if_id` — one bubble is needed before it can proceed.
pub fn need_stall_load_use(id_ex: &IdEx, if_id: &IfId) -> bool {
    if !id_ex.valid || !id_ex.ctrl.mem_read || id_ex.rd == 0 {
        return false;
    }
    if !if_id.valid {
        return false;
    }
    let next_rs1 = (if_id.instr >> 15) & 0x1F;
    let next_rs2 = (if_id.instr >> 20) & 0x1F;
    id_ex.rd == next_rs1 || id_ex.rd == next_rs2
}

/// True when a just-executed branch or jump needs to flush the two instructions
/// fetched behind it.
pub fn need_control_hazard_flush(ex_mem: &ExMem) -> bool {
    ex_mem.valid && (ex_mem.branch_taken || ex_mem.jump)
}

/// Resolves `rs1_data`/`rs2_data` for the instruction in `id_ex`'s ALU stage:
/// EX/MEM takes priority over MEM/WB, which takes priority over the values read
/// at decode time.
pub fn forward(id_ex: &IdEx, ex_mem: &ExMem, mem_wb: &MemWb) -> (u32, u32) {
    let mut a = id_ex.rs1_data;
    let mut b = id_ex.rs2_data;

    if mem_wb.valid && mem_wb.reg_write && mem_wb.rd != 0 {
        let val = mem_wb.commit_value();
        if mem_wb.rd == id_ex.rs1 {
            a = val;
        }
        if mem_wb.rd == id_ex.rs2 {
            b = val;
        }
    }

    if ex_mem.valid && ex_mem.reg_write && ex_mem.rd != 0 {
        if ex_mem.rd == id_ex.rs1 {
            a = ex_mem.alu_result;
        }
        if ex_mem.rd == id_ex.rs2 {
            b = ex_mem.alu_result;
        }
    }

    (a, b)
}
