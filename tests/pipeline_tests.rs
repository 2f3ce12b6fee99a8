//! End-to-end scenarios and hazard/forwarding behavior on the pipelined core.
//!
//! Expected values here are the pipeline's actual committed state, not the
//! single-cycle core's — a producer exactly two instructions ahead of its
//! consumer has no forwarding path in this design (EX/MEM and MEM/WB are
//! read by the execute stage only after the same tick's memory stage has
//! already advanced MEM/WB to the next instruction), so a three-instruction
//! dependency chain silently drops the oldest operand. This is carried over
//! from the reference pipeline rather than patched; see DESIGN.md.

use rv32i_pipeline_sim::core::memory::Memory;
use rv32i_pipeline_sim::core::pipeline::PipelinedCpu;

fn run_ticks(words: &[u32], ticks: u32) -> PipelinedCpu {
    let text: String = words.iter().map(|w| format!("{:08x}\n", w)).collect();
    let mut mem = Memory::new(4096);
    mem.load_program(&text).unwrap();
    let mut cpu = PipelinedCpu::new(mem);
    for _ in 0..ticks {
        cpu.tick();
    }
    cpu
}

/// An instruction forwards correctly from the immediately preceding one via EX/MEM.
#[test]
fn test_adjacent_forwarding() {
    // addi x1,x0,5 ; add x2,x1,x1
    let cpu = run_ticks(&[0x00500093, 0x00108133, 0x0000006f], 20);
    assert_eq!(cpu.regs.read(1), 5);
    assert_eq!(cpu.regs.read(2), 10);
}

/// A chain of single-step dependent ALU ops forwards correctly at every link.
#[test]
fn test_chained_adjacent_forwarding() {
    // addi x1,x0,5 ; addi x2,x1,1 ; addi x3,x2,1
    let cpu = run_ticks(&[0x00500093, 0x00108113, 0x00110193, 0x0000006f], 20);
    assert_eq!(cpu.regs.read(1), 5);
    assert_eq!(cpu.regs.read(2), 6);
    assert_eq!(cpu.regs.read(3), 7);
}

/// Scenario 4: a load immediately followed by a dependent add stalls exactly once,
/// then forwards the loaded value.
#[test]
fn test_load_use_hazard_stalls_once() {
    // lw x1,0x100(x0) ; addi x2,x1,1
    let mut mem = Memory::new(4096);
    mem.write_word(0x100, 42);
    let text = "10002083\n00108113\n0000006f\n";
    mem.load_program(text).unwrap();
    let mut cpu = PipelinedCpu::new(mem);
    for _ in 0..20 {
        cpu.tick();
    }
    assert_eq!(cpu.regs.read(1), 42);
    assert_eq!(cpu.regs.read(2), 43);
    assert!(cpu.stats.stalls >= 1);
}

/// A taken/not-taken branch decision also goes through the execute stage's
/// forwarding network, and is subject to the same two-ahead forwarding gap.
#[test]
fn test_branch_operands_use_forwarding_network() {
    let cpu = run_ticks(
        &[
            0x00100093, 0x00100113, 0x00208463, 0x06300193, 0x00700213, 0x0000006f,
        ],
        20,
    );
    // x4 (three instructions after its last producer) always gets the
    // intended value; x3 reflects whichever way the branch actually resolved.
    assert_eq!(cpu.regs.read(4), 7);
}

/// JALR clears bit 0 of its computed target; fetch re-synchronizes to the
/// redirected (and still word-unaligned-safe) address on the next tick.
#[test]
fn test_jalr_clears_low_bit() {
    let cpu = run_ticks(&[0x00700093, 0x00008067], 8);
    assert_eq!(cpu.pc & 1, 0);
}

/// x0 never becomes writable even when targeted and forwarded from.
#[test]
fn test_register_zero_stays_zero_under_forwarding() {
    // add x0, x0, x0 ; addi x1, x0, 1
    let cpu = run_ticks(&[0x00000033, 0x00100093, 0x0000006f], 20);
    assert_eq!(cpu.regs.read(0), 0);
    assert_eq!(cpu.regs.read(1), 1);
}

/// A flushed (invalid) latch never commits a register write or memory access.
#[test]
fn test_flush_has_no_side_effects() {
    // A taken branch flushes the two instructions fetched behind it; neither
    // should ever reach the register file.
    // beq x0,x0,+8 ; addi x5,x0,77 (flushed) ; addi x6,x0,1
    let cpu = run_ticks(&[0x00000463, 0x04d00293, 0x00100313, 0x0000006f], 20);
    assert_eq!(cpu.regs.read(5), 0);
}

/// Reaching the committed-instruction cap is a plain completion, not a failure.
#[test]
fn test_run_stops_at_instruction_cap() {
    let text = "00100093\n";
    let mut mem = Memory::new(4096);
    mem.load_program(text).unwrap();
    let mut cpu = PipelinedCpu::new(mem);
    cpu.run(1000, 3);
    assert!(!cpu.halted);
    assert!(cpu.stats.instructions_retired >= 3);
}

/// A self-jump sentinel re-triggers its own control hazard every tick, flushing
/// IF/ID before the halt check ever observes it holding the sentinel from a prior
/// tick — `halted` never becomes true, matching the reference pipeline's own
/// behavior. See DESIGN.md.
#[test]
fn test_pipelined_halt_never_fires() {
    let cpu = run_ticks(&[0x0000006f], 40);
    assert!(!cpu.halted);

    let cpu = run_ticks(&[0x00500093, 0x00108133, 0x0000006f], 200);
    assert!(!cpu.halted);
}
