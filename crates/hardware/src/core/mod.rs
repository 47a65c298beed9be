//! CPU core: architectural state, pipeline, and execution units.

/// Architectural state containers (register file, memories).
pub mod arch;
/// The engine type and its tick orchestration.
pub mod cpu;
/// Pipeline latches, control signals, hazard unit, and stages.
pub mod pipeline;
/// Combinational execution units.
pub mod units;

pub use cpu::Cpu;
