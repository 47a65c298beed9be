//! Combinational execution units.

/// Arithmetic logic unit.
pub mod alu;

pub use alu::Alu;
