//! Pipeline control signals and ALU operation selection.
//!
//! This module defines the signals that control instruction execution. It
//! performs:
//! 1. **Operation Classification:** The 3-bit ALU operation selector.
//! 2. **Control Generation:** The per-opcode 8-bit control vector driving
//!    every downstream stage.
//! 3. **Bubble Identification:** An all-clear control vector marks a latch
//!    as a bubble with no architectural effect.

use serde::Serialize;

use crate::isa::funct;
use crate::isa::opcodes;

/// ALU operation selector.
///
/// The numbering matches the R-type `func` field; non-R instructions
/// select `Add` (address and immediate arithmetic) or `Sub` (branch
/// comparison).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum AluOp {
    /// Addition (default; also the bubble value).
    #[default]
    Add,

    /// Subtraction.
    Sub,

    /// Bitwise AND.
    And,

    /// Bitwise OR.
    Or,

    /// Bitwise XOR.
    Xor,

    /// Set less than (signed).
    Slt,

    /// Division, truncated toward zero; divide-by-zero yields 0.
    Div,
}

impl AluOp {
    /// Maps an R-type function code to its ALU operation.
    ///
    /// The reserved code `111` has no operation assigned and falls back to
    /// `Add`; the disassembler reports such words as unknown.
    pub fn from_func(func: u16) -> AluOp {
        match func {
            funct::FUNC_ADD => AluOp::Add,
            funct::FUNC_SUB => AluOp::Sub,
            funct::FUNC_AND => AluOp::And,
            funct::FUNC_OR => AluOp::Or,
            funct::FUNC_XOR => AluOp::Xor,
            funct::FUNC_SLT => AluOp::Slt,
            funct::FUNC_DIV => AluOp::Div,
            _ => AluOp::Add,
        }
    }
}

/// Control signals for pipeline stage execution.
///
/// Generated during instruction decode; a latch whose vector is all clear
/// is a bubble and behaves as a NOP in every downstream stage, since all
/// side effects are gated by these bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ControlSignals {
    /// Destination register comes from the `rd` field (R-type).
    pub reg_dst: bool,
    /// ALU operand B is the sign-extended immediate.
    pub alu_src: bool,
    /// Writeback data comes from memory instead of the ALU.
    pub mem_to_reg: bool,
    /// Enable write to the destination register.
    pub reg_write: bool,
    /// Enable data-memory read (load).
    pub mem_read: bool,
    /// Enable data-memory write (store).
    pub mem_write: bool,
    /// Instruction is a conditional branch.
    pub branch: bool,
    /// Instruction is an unconditional control transfer.
    pub jump: bool,
}

impl ControlSignals {
    /// Looks up the control vector for an opcode.
    ///
    /// Unknown opcodes map to the all-clear vector, so undecodable words
    /// flow through the pipeline with no effect.
    pub fn decode(opcode: u16) -> Self {
        let mut c = ControlSignals::default();
        match opcode {
            opcodes::OP_RTYPE => {
                c.reg_dst = true;
                c.reg_write = true;
            }
            opcodes::OP_ADDI => {
                c.alu_src = true;
                c.reg_write = true;
            }
            opcodes::OP_LW => {
                c.alu_src = true;
                c.mem_to_reg = true;
                c.reg_write = true;
                c.mem_read = true;
            }
            opcodes::OP_SW => {
                c.alu_src = true;
                c.mem_write = true;
            }
            opcodes::OP_BEQ | opcodes::OP_BNE => {
                c.branch = true;
            }
            opcodes::OP_J => {
                c.jump = true;
            }
            opcodes::OP_JAL => {
                c.jump = true;
                c.reg_write = true;
            }
            opcodes::OP_JR => {
                // AluSrc together with Jump uniquely identifies JR.
                c.jump = true;
                c.alu_src = true;
            }
            _ => {}
        }
        c
    }

    /// Packs the vector into its 8-bit bus form, bit 0 = `RegDst`.
    pub fn bits(&self) -> u8 {
        (self.reg_dst as u8)
            | (self.alu_src as u8) << 1
            | (self.mem_to_reg as u8) << 2
            | (self.reg_write as u8) << 3
            | (self.mem_read as u8) << 4
            | (self.mem_write as u8) << 5
            | (self.branch as u8) << 6
            | (self.jump as u8) << 7
    }

    /// True when every signal is clear.
    pub fn is_bubble(&self) -> bool {
        self.bits() == 0
    }
}

/// Selects the ALU operation for a decoded instruction.
///
/// R-type instructions use their function code; branches compare via
/// subtraction; everything else performs address/immediate addition.
pub fn alu_op_for(opcode: u16, func: u16) -> AluOp {
    match opcode {
        opcodes::OP_RTYPE => AluOp::from_func(func),
        opcodes::OP_BEQ | opcodes::OP_BNE => AluOp::Sub,
        _ => AluOp::Add,
    }
}
