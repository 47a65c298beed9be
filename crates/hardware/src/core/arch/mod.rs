//! Architectural state containers.

/// General-purpose register file.
pub mod gpr;
/// Instruction and data memories.
pub mod mem;

pub use gpr::Gpr;
pub use mem::{DataMem, InstrMem};
