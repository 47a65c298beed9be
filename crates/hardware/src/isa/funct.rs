//! Function codes for the 3-bit R-type `func` field.
//!
//! The ALU operation selector uses the same numbering; see
//! [`crate::core::pipeline::signals::AluOp`].

/// Addition.
pub const FUNC_ADD: u16 = 0x0;
/// Subtraction.
pub const FUNC_SUB: u16 = 0x1;
/// Bitwise AND.
pub const FUNC_AND: u16 = 0x2;
/// Bitwise OR.
pub const FUNC_OR: u16 = 0x3;
/// Bitwise XOR.
pub const FUNC_XOR: u16 = 0x4;
/// Set if less than (signed).
pub const FUNC_SLT: u16 = 0x5;
/// Division (truncated toward zero; divide-by-zero yields 0).
pub const FUNC_DIV: u16 = 0x6;
