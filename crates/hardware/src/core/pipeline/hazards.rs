//! Data hazard detection and forwarding.
//!
//! This module implements the combinational logic that keeps the pipeline
//! consistent when instructions depend on each other. It provides:
//! 1. **Hazard Detection:** Identifies load-use hazards that require a
//!    one-cycle pipeline stall.
//! 2. **Operand Forwarding:** Resolves read-after-write hazards by bypassing
//!    the register file from the EX/MEM and MEM/WB latches.
//!
//! Both functions are pure reads over the latch state at tick entry.

use crate::core::pipeline::latches::{ExMem, IdEx, IfId, MemWb};
use crate::isa::instruction::InstructionBits;

/// Forward selector for one ALU operand.
///
/// Encoded on the wire as a 2-bit code: `00` no forward, `10` from EX/MEM,
/// `01` from MEM/WB. The code `11` never occurs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Forward {
    /// Use the value read from the register file (`00`).
    #[default]
    None,
    /// Use the EX/MEM ALU result (`10`).
    ExMem,
    /// Use the MEM/WB writeback data (`01`).
    MemWb,
}

impl Forward {
    /// The conventional 2-bit selector code.
    pub fn code(self) -> &'static str {
        match self {
            Forward::None => "00",
            Forward::ExMem => "10",
            Forward::MemWb => "01",
        }
    }
}

/// Checks whether a load-use hazard requires a stall this tick.
///
/// A load-use hazard occurs when the load in the ID/EX latch is about to
/// produce a value that the instruction sitting in IF/ID reads. The loaded
/// value only becomes available after the memory stage, one cycle too late
/// for forwarding alone, so the consumer is held back one cycle.
///
/// A load into `r0` never stalls: the write is dropped and reads of `r0`
/// are hardwired to zero.
///
/// # Arguments
///
/// * `id_ex` - The ID/EX latch (instruction entering execute).
/// * `if_id` - The IF/ID latch (instruction entering decode).
pub fn need_stall_load_use(id_ex: &IdEx, if_id: &IfId) -> bool {
    if !id_ex.ctrl.mem_read || id_ex.rt == 0 {
        return false;
    }
    let next_rs = if_id.instr.rs();
    let next_rt = if_id.instr.rt();
    id_ex.rt == next_rs || id_ex.rt == next_rt
}

/// Computes the forward selectors for both ALU operands.
///
/// EX/MEM forwarding takes priority over MEM/WB: the newer value wins.
/// Writes targeting `r0` never forward, since they would have been dropped.
///
/// # Arguments
///
/// * `id_ex` - The consumer's latch (source register indices).
/// * `ex_mem` - One-cycle-old results.
/// * `mem_wb` - Two-cycle-old results, about to be written back.
///
/// # Returns
///
/// `(forward_a, forward_b)` for the `rs` and `rt` operands respectively.
pub fn forward_selectors(id_ex: &IdEx, ex_mem: &ExMem, mem_wb: &MemWb) -> (Forward, Forward) {
    (
        select(id_ex.rs, ex_mem, mem_wb),
        select(id_ex.rt, ex_mem, mem_wb),
    )
}

/// Selector for a single source register.
fn select(src: usize, ex_mem: &ExMem, mem_wb: &MemWb) -> Forward {
    if ex_mem.ctrl.reg_write && ex_mem.dest != 0 && ex_mem.dest == src {
        Forward::ExMem
    } else if mem_wb.ctrl.reg_write && mem_wb.dest != 0 && mem_wb.dest == src {
        Forward::MemWb
    } else {
        Forward::None
    }
}
