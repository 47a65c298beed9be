//! Pipeline latches, control signals, hazard unit, and stage logic.
//!
//! The controller in [`crate::core::cpu`] evaluates the five stages in
//! reverse order (WB, MEM, EX, ID, IF) against the [`TickState`] staging
//! buffer defined here, then commits all next-latch values at once. Staging
//! makes the parallel hardware semantics explicit: no stage can clobber
//! another stage's inputs within the same tick.

/// Data hazard detection and operand forwarding.
pub mod hazards;
/// Inter-stage latch records.
pub mod latches;
/// Control vectors and ALU operation selection.
pub mod signals;
/// One module per pipeline stage.
pub mod stages;

use crate::core::cpu::Cpu;
use crate::core::pipeline::hazards::{forward_selectors, need_stall_load_use, Forward};
use crate::core::pipeline::latches::{ExMem, IdEx, IfId, MemWb};

/// Writeback bypass record retained for same-cycle register reads.
///
/// The decode stage splices this in so a read of the register being written
/// this cycle observes the new value (write-first register file).
#[derive(Clone, Copy, Debug, Default)]
pub struct WbBypass {
    /// The writeback stage is writing a register this cycle.
    pub write: bool,
    /// Destination register index.
    pub dest: usize,
    /// Selected writeback data (memory or ALU result).
    pub data: i16,
}

/// Staging buffer for one clock tick.
///
/// Holds the hazard-unit outputs computed from the latch state at tick
/// entry, the control-transfer decision made in EX, and the next value of
/// every latch and of the PC. The controller commits the buffer atomically
/// after all five stages have run.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickState {
    /// Load-use stall detected this tick.
    pub stall: bool,
    /// Forward selector for ALU operand A (`rs`).
    pub forward_a: Forward,
    /// Forward selector for ALU operand B (`rt`).
    pub forward_b: Forward,
    /// A branch was taken or a jump is present in EX this tick.
    pub pc_src: bool,
    /// Redirect target; meaningful only when `pc_src` is set.
    pub pc_redirect: u8,
    /// Writeback bypass for same-cycle register reads in decode.
    pub wb: WbBypass,
    /// Next IF/ID latch value.
    pub next_if_id: IfId,
    /// Next ID/EX latch value.
    pub next_id_ex: IdEx,
    /// Next EX/MEM latch value.
    pub next_ex_mem: ExMem,
    /// Next MEM/WB latch value.
    pub next_mem_wb: MemWb,
    /// Next PC value.
    pub next_pc: u8,
}

impl TickState {
    /// Evaluates the hazard unit against the latch state at tick entry.
    pub fn new(cpu: &Cpu) -> Self {
        let stall = need_stall_load_use(&cpu.id_ex, &cpu.if_id);
        let (forward_a, forward_b) = forward_selectors(&cpu.id_ex, &cpu.ex_mem, &cpu.mem_wb);
        Self {
            stall,
            forward_a,
            forward_b,
            ..Default::default()
        }
    }
}

/// Hazard-unit outputs recorded per tick for the snapshot view.
#[derive(Clone, Copy, Debug, Default)]
pub struct HazardInfo {
    /// A load-use stall was applied this tick.
    pub stall: bool,
    /// Forward selector applied to operand A.
    pub forward_a: Forward,
    /// Forward selector applied to operand B.
    pub forward_b: Forward,
    /// A control transfer redirected the PC this tick.
    pub pc_src: bool,
    /// IF/ID was replaced by a bubble this tick.
    pub flush_if_id: bool,
    /// ID/EX was replaced by a bubble this tick (flush or stall).
    pub flush_id_ex: bool,
}
