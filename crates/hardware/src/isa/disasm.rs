//! Instruction disassembler.
//!
//! Converts a 16-bit instruction word into a canonical mnemonic string for
//! snapshot occupancy views, trace lines, and test diagnostics.
//!
//! The all-zero word disassembles as `nop`; unrecognised opcodes or
//! function codes yield `??` with the raw word in hex.
//!
//! ```
//! use pipe16_core::isa::disasm::disassemble;
//! assert_eq!(disassemble(0x0000), "nop");
//! assert_eq!(disassemble(0x1245), "addi r1, r1, 5");
//! ```

use crate::isa::funct;
use crate::isa::instruction::{Decoded, InstructionBits};
use crate::isa::opcodes;

/// Disassembles an instruction word into a canonical mnemonic string.
///
/// # Arguments
///
/// * `word` - The raw 16-bit instruction encoding.
pub fn disassemble(word: u16) -> String {
    if word == 0 {
        return "nop".to_string();
    }

    let d = crate::isa::decode::decode(word);
    match word.opcode() {
        opcodes::OP_RTYPE => disasm_r_type(&d),
        opcodes::OP_ADDI => format!("addi r{}, r{}, {}", d.rt, d.rs, d.imm),
        opcodes::OP_LW => format!("lw r{}, {}(r{})", d.rt, d.imm, d.rs),
        opcodes::OP_SW => format!("sw r{}, {}(r{})", d.rt, d.imm, d.rs),
        opcodes::OP_BEQ => format!("beq r{}, r{}, {}", d.rs, d.rt, d.imm),
        opcodes::OP_BNE => format!("bne r{}, r{}, {}", d.rs, d.rt, d.imm),
        opcodes::OP_J => format!("j {}", d.imm),
        opcodes::OP_JAL => format!("jal {}", d.imm),
        opcodes::OP_JR => format!("jr r{}", d.rs),
        _ => format!("?? {:#06x}", word),
    }
}

/// Disassembles the R-type group via the function code.
fn disasm_r_type(d: &Decoded) -> String {
    let mnemonic = match d.func {
        funct::FUNC_ADD => "add",
        funct::FUNC_SUB => "sub",
        funct::FUNC_AND => "and",
        funct::FUNC_OR => "or",
        funct::FUNC_XOR => "xor",
        funct::FUNC_SLT => "slt",
        funct::FUNC_DIV => "div",
        _ => return format!("?? {:#06x}", d.raw),
    };
    format!("{} r{}, r{}, r{}", mnemonic, d.rd, d.rs, d.rt)
}
