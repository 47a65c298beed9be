//! Assembly and program-load error definitions.
//!
//! This module defines the error surface of the engine. It provides:
//! 1. **Assembly errors:** Per-line diagnostics carrying the line number and
//!    the offending source text.
//! 2. **Load errors:** Rejection of programs that do not fit instruction
//!    memory.
//! 3. **Error traits:** Integration with standard Rust error traits for
//!    caller-side reporting.
//!
//! The running engine itself cannot fault: division by zero, overflow, PC
//! wrap, and out-of-range addresses are all defined behavior.

use std::fmt;

use super::constants::{IMM6_MAX, IMM6_MIN, NUM_REGS};

/// The specific defect found in one line of assembly source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AsmErrorKind {
    /// Mnemonic is not part of the instruction set.
    UnknownMnemonic(String),

    /// Wrong number of operands for the mnemonic.
    OperandCount {
        /// Number of operands the instruction form requires.
        expected: usize,
        /// Number of operands found on the line.
        found: usize,
        /// Canonical operand form, e.g. `"addi rt, rs, imm"`.
        form: &'static str,
    },

    /// Operand is not a valid register name (`r0`-`r7`).
    BadRegister(String),

    /// Operand could not be parsed as an integer.
    BadImmediate(String),

    /// Immediate parsed but falls outside the signed 6-bit range.
    ImmediateOutOfRange(i64),

    /// Memory operand is not of the form `imm(rs)`.
    MalformedMemOperand(String),

    /// Branch or jump names a label that was never defined.
    UndefinedLabel(String),

    /// Label resolves to an offset outside the signed 6-bit range.
    OffsetOutOfRange {
        /// The referenced label.
        label: String,
        /// The PC-relative offset that did not fit.
        offset: i64,
    },

    /// Mnemonic takes no operands but some were given.
    UnexpectedOperands(String),
}

impl fmt::Display for AsmErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmErrorKind::UnknownMnemonic(m) => write!(f, "unknown mnemonic '{m}'"),
            AsmErrorKind::OperandCount {
                expected,
                found,
                form,
            } => write!(
                f,
                "expected {expected} operand(s), got {found} (form: {form})"
            ),
            AsmErrorKind::BadRegister(r) => {
                write!(f, "bad register '{r}' (expected r0-r{})", NUM_REGS - 1)
            }
            AsmErrorKind::BadImmediate(s) => write!(f, "bad immediate '{s}'"),
            AsmErrorKind::ImmediateOutOfRange(v) => write!(
                f,
                "immediate {v} out of range [{IMM6_MIN}, {IMM6_MAX}]"
            ),
            AsmErrorKind::MalformedMemOperand(s) => {
                write!(f, "memory operand must be imm(rs), got '{s}'")
            }
            AsmErrorKind::UndefinedLabel(l) => write!(f, "undefined label '{l}'"),
            AsmErrorKind::OffsetOutOfRange { label, offset } => write!(
                f,
                "offset to label '{label}' is {offset}, out of range [{IMM6_MIN}, {IMM6_MAX}]"
            ),
            AsmErrorKind::UnexpectedOperands(s) => write!(f, "takes no operands, got '{s}'"),
        }
    }
}

/// A single assembly diagnostic tied to its source line.
///
/// Assembly is all-or-nothing: when any line fails, the assembler returns
/// every collected `AsmError` and no machine words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsmError {
    /// 1-based source line number.
    pub line: usize,
    /// The offending line, comments stripped and trimmed.
    pub source: String,
    /// What went wrong.
    pub kind: AsmErrorKind,
}

impl fmt::Display for AsmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: `{}`", self.line, self.kind, self.source)
    }
}

impl std::error::Error for AsmError {}

/// Error returned by `Cpu::load` when the program does not fit.
///
/// There is no partial load: either all words are installed or none.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadError {
    /// Program has more instruction words than instruction memory holds.
    ProgramTooLarge(usize),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::ProgramTooLarge(words) => write!(
                f,
                "program has {words} words, instruction memory holds {}",
                super::constants::IMEM_WORDS
            ),
        }
    }
}

impl std::error::Error for LoadError {}
