//! General-purpose register file.
//!
//! This module implements the architectural register file. It performs the
//! following:
//! 1. **Storage:** Maintains 8 signed 16-bit registers (`r0`-`r7`).
//! 2. **Invariant Enforcement:** Ensures that register `r0` is hardwired to
//!    zero: reads return 0, writes are silently dropped.
//! 3. **Observability:** Exposes the full register image for snapshots.

use crate::common::constants::{NUM_REGS, ZERO_REG};

/// General-purpose register file.
///
/// Contains 8 signed 16-bit registers. Register `r0` is hardwired to zero
/// and cannot be modified.
#[derive(Clone, Debug, Default)]
pub struct Gpr {
    regs: [i16; NUM_REGS],
}

impl Gpr {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-7). Register `r0` always returns 0.
    pub fn read(&self, idx: usize) -> i16 {
        if idx == ZERO_REG {
            0
        } else {
            self.regs[idx]
        }
    }

    /// Writes a value to a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-7). Writes to `r0` are ignored.
    /// * `val` - The signed 16-bit value to write.
    pub fn write(&mut self, idx: usize, val: i16) {
        if idx != ZERO_REG {
            self.regs[idx] = val;
        }
    }

    /// Returns the full register image.
    pub fn image(&self) -> [i16; NUM_REGS] {
        self.regs
    }

    /// Clears every register to zero.
    pub fn reset(&mut self) {
        self.regs = [0; NUM_REGS];
    }

    /// Dumps the contents of all registers to stderr.
    pub fn dump(&self) {
        for (idx, val) in self.regs.iter().enumerate() {
            eprintln!("r{idx} = {val} ({:#06x})", *val as u16);
        }
    }
}
