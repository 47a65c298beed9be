//! 16-bit pipelined CPU simulation engine.
//!
//! This crate implements a cycle-accurate 5-stage pipelined 16-bit processor
//! model with the following:
//! 1. **Core:** Pipeline (fetch, decode, execute, memory, writeback), register
//!    file, and word-addressed instruction/data memories.
//! 2. **Hazards:** Load-use stall detection, EX/MEM and MEM/WB operand
//!    forwarding, and control-transfer flushing.
//! 3. **ISA:** Encoding tables, decoder, assembler, and disassembler for the
//!    16-bit R/I instruction formats.
//! 4. **Observation:** Per-tick snapshot export of architectural and pipeline
//!    state for visualization front ends.
//! 5. **Simulation:** Driver loop, configuration, and statistics collection.

/// Common types and constants (machine geometry, error types).
pub mod common;
/// Simulator configuration (defaults, driver parameters).
pub mod config;
/// CPU core (architectural state, pipeline, execution units).
pub mod core;
/// Instruction set (encoding tables, decode, assembler, disassembler).
pub mod isa;
/// Driver loop for stepping and rate-limited running.
pub mod sim;
/// Snapshot export of engine state.
pub mod snapshot;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main engine type; holds all architectural and pipeline state.
pub use crate::core::Cpu;
/// Driver wrapper; schedules `tick()` at a chosen rate.
pub use crate::sim::runner::Runner;
/// Full engine state record produced by `Cpu::snapshot`.
pub use crate::snapshot::Snapshot;
