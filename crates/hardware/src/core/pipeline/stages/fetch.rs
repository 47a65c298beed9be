//! Instruction fetch (IF) stage.
//!
//! This module implements the first stage of the pipeline. It reads the
//! word at the current PC, stages the next IF/ID latch, and selects the
//! next PC. A control transfer resolved in EX this tick overrides the
//! sequential PC and forces a bubble into IF/ID; a load-use stall holds
//! both the PC and IF/ID unchanged.

use crate::core::cpu::Cpu;
use crate::core::pipeline::latches::IfId;
use crate::core::pipeline::TickState;

/// Executes the fetch stage.
///
/// Flush beats stall: the two cannot target the same latch in one tick
/// with different outcomes (a taken transfer and a load-use stall are
/// mutually exclusive in EX), but the redirect is checked first regardless.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the engine state.
/// * `t` - Staging buffer for this tick.
pub fn fetch_stage(cpu: &mut Cpu, t: &mut TickState) {
    if t.pc_src {
        t.next_if_id = IfId::default();
        t.next_pc = t.pc_redirect;
        return;
    }

    if t.stall {
        t.next_if_id = cpu.if_id;
        t.next_pc = cpu.pc;
        if cpu.trace {
            eprintln!("IF  pc={} stalled", cpu.pc);
        }
        return;
    }

    let instr = cpu.imem.read(cpu.pc);
    let pc_plus_1 = cpu.pc.wrapping_add(1);
    if cpu.trace {
        eprintln!("IF  pc={} instr={:#06x}", cpu.pc, instr);
    }

    t.next_if_id = IfId { pc_plus_1, instr };
    t.next_pc = pc_plus_1;
}
