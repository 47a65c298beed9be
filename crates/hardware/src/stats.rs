//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the engine. It provides:
//! 1. **Cycle and CPI:** Total cycles, retired instructions, and the
//!    derived cycles-per-instruction figure.
//! 2. **Instruction mix:** Counts by category (ALU, load, store, branch).
//! 3. **Hazards:** Data-hazard stall and control-flush counts.

use std::time::Instant;

/// Simulation statistics tracking all performance counters.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions committed (retired).
    pub instructions_retired: u64,
    /// Count of ALU instructions retired.
    pub inst_alu: u64,
    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of branch/jump instructions retired.
    pub inst_branch: u64,
    /// Stall cycles inserted for load-use hazards.
    pub stalls_data: u64,
    /// Ticks on which a control transfer flushed the front of the pipeline.
    pub flushes_control: u64,
}

impl SimStats {
    /// Creates a zeroed statistics record.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            stalls_data: 0,
            flushes_control: 0,
        }
    }

    /// Zeroes every counter and restarts the wall clock.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Cycles per retired instruction, or 0 when nothing retired yet.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Prints a human-readable report to stdout.
    pub fn report(&self) {
        let elapsed = self.start_time.elapsed();
        println!("Cycles:        {}", self.cycles);
        println!("Retired:       {}", self.instructions_retired);
        println!(
            "  alu {} / load {} / store {} / branch {}",
            self.inst_alu, self.inst_load, self.inst_store, self.inst_branch
        );
        println!("Stalls (data): {}", self.stalls_data);
        println!("Flushes (ctl): {}", self.flushes_control);
        println!("CPI:           {:.2}", self.cpi());
        println!("Wall time:     {:.1?}", elapsed);
    }
}

impl Default for SimStats {
    fn default() -> Self {
        Self::new()
    }
}
