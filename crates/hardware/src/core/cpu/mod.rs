//! Engine definition and tick orchestration.
//!
//! This module defines the central `Cpu` structure holding all architectural
//! and pipeline state, and the controller that advances it by exactly one
//! clock per `tick()`:
//! 1. **Hazard Evaluation:** Stall and forward selectors are computed
//!    combinationally from the latch state at tick entry.
//! 2. **Reverse-Order Stages:** WB, MEM, EX, ID, IF each read the current
//!    latches and write next-state values into a staging buffer.
//! 3. **Atomic Commit:** All latches, the PC, and the cycle counter update
//!    together at the end of the tick.
//!
//! `tick()` cannot fault: division by zero, overflow, PC wrap, and address
//! wrap are all defined behavior.

use crate::common::constants::IMEM_WORDS;
use crate::common::LoadError;
use crate::config::Config;
use crate::core::arch::{DataMem, Gpr, InstrMem};
use crate::core::pipeline::latches::{ExMem, IdEx, IfId, MemWb};
use crate::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage,
};
use crate::core::pipeline::{HazardInfo, TickState};
use crate::stats::SimStats;

/// The simulation engine: architectural state plus pipeline latches.
///
/// All state is owned by one instance; the engine is strictly
/// single-threaded and provides no locking. A transport layer serving
/// multiple observers must serialize access itself.
pub struct Cpu {
    /// Program counter: an instruction index, wrapping at 256.
    pub pc: u8,
    /// Register file, `r0` hardwired to zero.
    pub regs: Gpr,
    /// Instruction memory, written only by `load`.
    pub imem: InstrMem,
    /// Data memory.
    pub dmem: DataMem,
    /// IF/ID latch.
    pub if_id: IfId,
    /// ID/EX latch.
    pub id_ex: IdEx,
    /// EX/MEM latch.
    pub ex_mem: ExMem,
    /// MEM/WB latch.
    pub mem_wb: MemWb,
    /// Monotonically increasing cycle counter; zeroed by `load`/`reset`.
    pub cycle: u64,
    /// Hazard-unit outputs from the most recent tick.
    pub hazards: HazardInfo,
    /// Performance statistics.
    pub stats: SimStats,
    /// Enable per-stage trace lines on stderr.
    pub trace: bool,
}

impl Cpu {
    /// Creates a fresh engine: all memories, registers, and latches zero.
    pub fn new(config: &Config) -> Self {
        Self {
            pc: 0,
            regs: Gpr::new(),
            imem: InstrMem::new(),
            dmem: DataMem::new(),
            if_id: IfId::default(),
            id_ex: IdEx::default(),
            ex_mem: ExMem::default(),
            mem_wb: MemWb::default(),
            cycle: 0,
            hazards: HazardInfo::default(),
            stats: SimStats::new(),
            trace: config.trace,
        }
    }

    /// Installs a program and zeroes all state, including the cycle counter.
    ///
    /// There is no partial load: an oversized program leaves the engine
    /// untouched.
    ///
    /// # Arguments
    ///
    /// * `words` - At most 256 instruction words, installed from index 0.
    pub fn load(&mut self, words: &[u16]) -> Result<(), LoadError> {
        if words.len() > IMEM_WORDS {
            return Err(LoadError::ProgramTooLarge(words.len()));
        }
        self.reset();
        self.imem.load(words);
        Ok(())
    }

    /// Clears all state except instruction memory. Idempotent.
    pub fn reset(&mut self) {
        self.pc = 0;
        self.regs.reset();
        self.dmem.reset();
        self.if_id = IfId::default();
        self.id_ex = IdEx::default();
        self.ex_mem = ExMem::default();
        self.mem_wb = MemWb::default();
        self.cycle = 0;
        self.hazards = HazardInfo::default();
        self.stats.reset();
    }

    /// Advances the machine by exactly one clock.
    ///
    /// Stages run in reverse order so each reads its input latch before the
    /// producer's next value exists; all writes land in the staging buffer
    /// and commit at once.
    pub fn tick(&mut self) {
        let mut t = TickState::new(self);

        wb_stage(self, &mut t);
        mem_stage(self, &mut t);
        execute_stage(self, &mut t);
        decode_stage(self, &mut t);
        fetch_stage(self, &mut t);

        self.commit(t);
    }

    /// Commits the staging buffer: latches, PC, counters, hazard record.
    fn commit(&mut self, t: TickState) {
        self.if_id = t.next_if_id;
        self.id_ex = t.next_id_ex;
        self.ex_mem = t.next_ex_mem;
        self.mem_wb = t.next_mem_wb;
        self.pc = t.next_pc;

        self.cycle += 1;
        self.stats.cycles += 1;
        if t.stall {
            self.stats.stalls_data += 1;
        }
        if t.pc_src {
            self.stats.flushes_control += 1;
        }

        self.hazards = HazardInfo {
            stall: t.stall,
            forward_a: t.forward_a,
            forward_b: t.forward_b,
            pc_src: t.pc_src,
            flush_if_id: t.pc_src,
            flush_id_ex: t.pc_src || t.stall,
        };
    }
}
