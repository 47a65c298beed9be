//! Opcode values for the 4-bit opcode field.

/// R-type arithmetic/logic group; the operation is selected by `func`.
pub const OP_RTYPE: u16 = 0x0;
/// Add immediate.
pub const OP_ADDI: u16 = 0x1;
/// Load word.
pub const OP_LW: u16 = 0x2;
/// Store word.
pub const OP_SW: u16 = 0x3;
/// Branch if equal.
pub const OP_BEQ: u16 = 0x4;
/// Unconditional PC-relative jump.
pub const OP_J: u16 = 0x5;
/// Jump and link (return address to `r7`).
pub const OP_JAL: u16 = 0x6;
/// Jump to register.
pub const OP_JR: u16 = 0x7;
/// Branch if not equal.
pub const OP_BNE: u16 = 0x8;
