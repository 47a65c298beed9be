//! Writeback (WB) stage.
//!
//! This module implements the final stage of the pipeline. It selects the
//! writeback value (memory data or ALU result), commits it to the register
//! file, retains the bypass record for same-cycle reads in decode, and
//! updates retirement statistics.

use crate::core::cpu::Cpu;
use crate::core::pipeline::{TickState, WbBypass};

/// Executes the writeback stage.
///
/// Writes the selected result to the destination register when `RegWrite`
/// is set and the destination is not `r0`. The `(dest, data, write)`
/// triple is retained in the staging buffer so the decode stage can splice
/// it into register reads this same cycle.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the engine state.
/// * `t` - Staging buffer for this tick.
pub fn wb_stage(cpu: &mut Cpu, t: &mut TickState) {
    let wb = cpu.mem_wb;

    let data = if wb.ctrl.mem_to_reg {
        wb.mem_data
    } else {
        wb.alu_result
    };

    t.wb = WbBypass {
        write: wb.ctrl.reg_write,
        dest: wb.dest,
        data,
    };

    if wb.ctrl.reg_write && wb.dest != 0 {
        if cpu.trace {
            eprintln!("WB  r{} <= {} ({:#06x})", wb.dest, data, data as u16);
        }
        cpu.regs.write(wb.dest, data);
    }

    // Word 0 is the canonical NOP (and what flushed slots decode to);
    // neither counts as a retired instruction.
    if !wb.ctrl.is_bubble() && wb.instr != 0 {
        cpu.stats.instructions_retired += 1;
        if wb.ctrl.mem_read {
            cpu.stats.inst_load += 1;
        } else if wb.ctrl.mem_write {
            cpu.stats.inst_store += 1;
        } else if wb.ctrl.branch || wb.ctrl.jump {
            cpu.stats.inst_branch += 1;
        } else {
            cpu.stats.inst_alu += 1;
        }
    }
}
