//! Unit tests for the control decoder.

use rv32i_pipeline_sim::core::alu::AluOp;
use rv32i_pipeline_sim::core::control::{alu_op, decode_control, evaluate_branch, opcodes};

/// R-type decodes to a plain register-write with no memory or branch signals.
#[test]
fn test_control_r_type() {
    let c = decode_control(opcodes::R_TYPE);
    assert!(c.reg_write);
    assert!(!c.alu_src);
    assert!(!c.mem_read && !c.mem_write);
    assert!(!c.branch && !c.jump);
}

/// Loads set reg_write, mem_read, mem_to_reg, and alu_src (for the base+offset add).
#[test]
fn test_control_load() {
    let c = decode_control(opcodes::LOAD);
    assert!(c.reg_write);
    assert!(c.mem_read);
    assert!(c.mem_to_reg);
    assert!(c.alu_src);
}

/// Stores set mem_write and alu_src but never reg_write.
#[test]
fn test_control_store() {
    let c = decode_control(opcodes::STORE);
    assert!(!c.reg_write);
    assert!(c.mem_write);
    assert!(c.alu_src);
}

/// Branches set only the branch signal.
#[test]
fn test_control_branch() {
    let c = decode_control(opcodes::BRANCH);
    assert!(c.branch);
    assert!(!c.reg_write);
}

/// JALR sets jump, jalr, alu_src, and reg_write.
#[test]
fn test_control_jalr() {
    let c = decode_control(opcodes::JALR);
    assert!(c.jump);
    assert!(c.jalr);
    assert!(c.alu_src);
    assert!(c.reg_write);
}

/// An opcode matching no row (e.g. the SYSTEM opcode) decodes to all-false.
#[test]
fn test_control_unrecognized_opcode() {
    let c = decode_control(0b1110011);
    assert_eq!(c, Default::default());
}

/// ADDI resolves through ADD regardless of its raw funct7 bits.
#[test]
fn test_alu_op_i_arith_ignores_funct7() {
    assert_eq!(alu_op(0x0, 0x20, true), AluOp::Add);
    assert_eq!(alu_op(0x0, 0x00, true), AluOp::Add);
}

/// SRAI (funct3 == 5) still honors funct7 to pick SRA vs SRL.
#[test]
fn test_alu_op_i_arith_shift_honors_funct7() {
    assert_eq!(alu_op(0x5, 0x20, true), AluOp::Sra);
    assert_eq!(alu_op(0x5, 0x00, true), AluOp::Srl);
}

/// SUB (R-type, funct7 bit 5 set) is distinguished from ADD.
#[test]
fn test_alu_op_r_type_add_sub() {
    assert_eq!(alu_op(0x0, 0x20, false), AluOp::Sub);
    assert_eq!(alu_op(0x0, 0x00, false), AluOp::Add);
}

/// Branch predicate evaluation for each recognized funct3.
#[test]
fn test_evaluate_branch_predicates() {
    assert!(evaluate_branch(0x0, 5, 5));
    assert!(!evaluate_branch(0x0, 5, 6));
    assert!(evaluate_branch(0x1, 5, 6));
    assert!(evaluate_branch(0x4, (-1i32) as u32, 0));
    assert!(evaluate_branch(0x5, 0, (-1i32) as u32));
    assert!(evaluate_branch(0x6, 1, 2));
    assert!(evaluate_branch(0x7, 2, 1));
}

/// An unrecognized funct3 evaluates to "not taken".
#[test]
fn test_evaluate_branch_unrecognized_funct3() {
    assert!(!evaluate_branch(0x2, 5, 5));
}
