//! Memory access (MEM) stage.
//!
//! This module implements the fourth stage of the pipeline. It masks the
//! ALU result down to an 8-bit word address, performs at most one data
//! memory read or write, and forwards the latch contents to MEM/WB.

use crate::common::constants::ADDR_MASK;
use crate::core::cpu::Cpu;
use crate::core::pipeline::latches::MemWb;
use crate::core::pipeline::TickState;

/// Executes the memory stage.
///
/// Negative effective addresses wrap into the high half of memory; this is
/// defined behavior, not a fault.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the engine state.
/// * `t` - Staging buffer for this tick.
pub fn mem_stage(cpu: &mut Cpu, t: &mut TickState) {
    let ex = cpu.ex_mem;
    let addr = (ex.alu_result as u16 & ADDR_MASK) as usize;

    let mut mem_data = 0;
    if ex.ctrl.mem_read {
        mem_data = cpu.dmem.read(addr);
        if cpu.trace {
            eprintln!("MEM load  [{addr}] -> {mem_data}");
        }
    }
    if ex.ctrl.mem_write {
        cpu.dmem.write(addr, ex.store_data);
        if cpu.trace {
            eprintln!("MEM store [{addr}] <- {}", ex.store_data);
        }
    }

    t.next_mem_wb = MemWb {
        instr: ex.instr,
        mem_data,
        alu_result: ex.alu_result,
        dest: ex.dest,
        ctrl: ex.ctrl,
    };
}
