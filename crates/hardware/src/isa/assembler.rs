//! Two-pass assembler for the 16-bit instruction set.
//!
//! Converts line-oriented source text into machine words. It performs:
//! 1. **Label collection:** A first pass records `name:` labels at their
//!    instruction addresses.
//! 2. **Encoding:** A second pass parses one instruction per line and
//!    resolves label operands to PC-relative offsets.
//! 3. **Diagnostics:** Every defective line produces an [`AsmError`] with
//!    its line number; assembly is all-or-nothing.
//!
//! Syntax: case-insensitive mnemonics, `#` or `;` comments to end of line,
//! registers `r0`-`r7`, signed immediates in decimal, `0x` hex, or `0b`
//! binary. `ld`/`st` are accepted as aliases for `lw`/`sw`.
//!
//! Branch and jump targets resolve relative to the address of the
//! transferring instruction itself, matching the execute stage's
//! `target = pc + imm` calculation.

use std::collections::HashMap;

use crate::common::constants::{IMM6_MAX, IMM6_MIN, NUM_REGS};
use crate::common::{AsmError, AsmErrorKind};
use crate::isa::funct;
use crate::isa::instruction::{IMM6_MASK, OPCODE_SHIFT, RD_SHIFT, RS_SHIFT, RT_SHIFT};
use crate::isa::opcodes;

/// Encoding emitted for `halt`: `beq r0, r0, -1`, an infinite self-branch.
pub const HALT_WORD: u16 = (opcodes::OP_BEQ << OPCODE_SHIFT) | IMM6_MASK;

/// Encoding emitted for `nop`: `add r0, r0, r0`.
pub const NOP_WORD: u16 = 0x0000;

/// Assembles source text into a sequence of 16-bit machine words.
///
/// Returns all collected per-line diagnostics if any line is defective;
/// no words are produced in that case.
///
/// # Arguments
///
/// * `source` - The full program text.
pub fn assemble(source: &str) -> Result<Vec<u16>, Vec<AsmError>> {
    let labels = collect_labels(source);

    let mut words = Vec::new();
    let mut errors = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }
        let (_, stmt) = split_label(line);
        if stmt.is_empty() {
            continue;
        }
        match encode_line(stmt, words.len(), &labels) {
            Ok(word) => words.push(word),
            Err(kind) => errors.push(AsmError {
                line: idx + 1,
                source: stmt.to_string(),
                kind,
            }),
        }
    }

    if errors.is_empty() {
        Ok(words)
    } else {
        Err(errors)
    }
}

/// First pass: map each label to the address of the instruction it precedes.
fn collect_labels(source: &str) -> HashMap<String, usize> {
    let mut labels = HashMap::new();
    let mut addr = 0usize;

    for raw in source.lines() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }
        let (label, stmt) = split_label(line);
        if let Some(name) = label {
            labels.insert(name.to_ascii_lowercase(), addr);
        }
        if !stmt.is_empty() {
            addr += 1;
        }
    }

    labels
}

/// Removes a `#` or `;` comment from a line.
fn strip_comment(line: &str) -> &str {
    let end = line.find(['#', ';']).unwrap_or(line.len());
    &line[..end]
}

/// Splits an optional leading `label:` from the statement that follows it.
fn split_label(line: &str) -> (Option<&str>, &str) {
    if let Some((head, rest)) = line.split_once(':') {
        let head = head.trim();
        if looks_like_label(head) {
            return (Some(head), rest.trim());
        }
    }
    (None, line)
}

/// A label token starts with a letter or underscore and continues with
/// letters, digits, or underscores. Numeric literals never qualify.
fn looks_like_label(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Encodes one statement at instruction address `pc`.
fn encode_line(
    stmt: &str,
    pc: usize,
    labels: &HashMap<String, usize>,
) -> Result<u16, AsmErrorKind> {
    let (head, tail) = match stmt.split_once(char::is_whitespace) {
        Some((h, t)) => (h, t.trim()),
        None => (stmt, ""),
    };
    let lower = head.to_ascii_lowercase();

    // Aliases kept from the original assembler.
    let mnemonic = match lower.as_str() {
        "ld" => "lw",
        "st" => "sw",
        m => m,
    };

    let r_func = |m: &str| -> Option<u16> {
        match m {
            "add" => Some(funct::FUNC_ADD),
            "sub" => Some(funct::FUNC_SUB),
            "and" => Some(funct::FUNC_AND),
            "or" => Some(funct::FUNC_OR),
            "xor" => Some(funct::FUNC_XOR),
            "slt" => Some(funct::FUNC_SLT),
            "div" => Some(funct::FUNC_DIV),
            _ => None,
        }
    };

    if let Some(func) = r_func(mnemonic) {
        let ops = operands(tail, 3, "rd, rs, rt")?;
        let rd = parse_reg(ops[0])?;
        let rs = parse_reg(ops[1])?;
        let rt = parse_reg(ops[2])?;
        return Ok(encode_r(func, rd, rs, rt));
    }

    match mnemonic {
        "addi" => {
            let ops = operands(tail, 3, "rt, rs, imm")?;
            let rt = parse_reg(ops[0])?;
            let rs = parse_reg(ops[1])?;
            let imm = parse_imm6(ops[2])?;
            Ok(encode_i(opcodes::OP_ADDI, rs, rt, imm))
        }
        "lw" | "sw" => {
            let ops = operands(tail, 2, "rt, imm(rs)")?;
            let rt = parse_reg(ops[0])?;
            let (imm, rs) = parse_mem_operand(ops[1])?;
            let op = if mnemonic == "lw" {
                opcodes::OP_LW
            } else {
                opcodes::OP_SW
            };
            Ok(encode_i(op, rs, rt, imm))
        }
        "beq" | "bne" => {
            let ops = operands(tail, 3, "rs, rt, target")?;
            let rs = parse_reg(ops[0])?;
            let rt = parse_reg(ops[1])?;
            let imm = parse_target(ops[2], pc, labels)?;
            let op = if mnemonic == "beq" {
                opcodes::OP_BEQ
            } else {
                opcodes::OP_BNE
            };
            Ok(encode_i(op, rs, rt, imm))
        }
        "j" | "jal" => {
            let ops = operands(tail, 1, "target")?;
            let imm = parse_target(ops[0], pc, labels)?;
            let op = if mnemonic == "j" {
                opcodes::OP_J
            } else {
                opcodes::OP_JAL
            };
            Ok(encode_i(op, 0, 0, imm))
        }
        "jr" => {
            let ops = operands(tail, 1, "rs")?;
            let rs = parse_reg(ops[0])?;
            Ok(encode_i(opcodes::OP_JR, rs, 0, 0))
        }
        "nop" => {
            no_operands(tail)?;
            Ok(NOP_WORD)
        }
        "halt" => {
            no_operands(tail)?;
            Ok(HALT_WORD)
        }
        other => Err(AsmErrorKind::UnknownMnemonic(other.to_string())),
    }
}

/// Splits comma-separated operands and checks the arity.
fn operands<'a>(
    tail: &'a str,
    expected: usize,
    form: &'static str,
) -> Result<Vec<&'a str>, AsmErrorKind> {
    let parts: Vec<&str> = tail
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != expected {
        return Err(AsmErrorKind::OperandCount {
            expected,
            found: parts.len(),
            form,
        });
    }
    Ok(parts)
}

/// Rejects trailing text after a zero-operand mnemonic.
fn no_operands(tail: &str) -> Result<(), AsmErrorKind> {
    if tail.is_empty() {
        Ok(())
    } else {
        Err(AsmErrorKind::UnexpectedOperands(tail.to_string()))
    }
}

/// Parses a register name `r0`-`r7`.
fn parse_reg(token: &str) -> Result<usize, AsmErrorKind> {
    let bad = || AsmErrorKind::BadRegister(token.to_string());
    let lower = token.to_ascii_lowercase();
    let digits = lower.strip_prefix('r').ok_or_else(bad)?;
    let idx: usize = digits.parse().map_err(|_| bad())?;
    if idx >= NUM_REGS {
        return Err(bad());
    }
    Ok(idx)
}

/// Parses a signed integer in decimal, `0x` hex, or `0b` binary form.
fn parse_int(token: &str) -> Option<i64> {
    let t = token.trim();
    let (neg, mag) = if let Some(rest) = t.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = t.strip_prefix('+') {
        (false, rest)
    } else {
        (false, t)
    };

    let val = if let Some(hex) = mag.strip_prefix("0x").or_else(|| mag.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()?
    } else if let Some(bin) = mag.strip_prefix("0b").or_else(|| mag.strip_prefix("0B")) {
        i64::from_str_radix(bin, 2).ok()?
    } else {
        mag.parse::<i64>().ok()?
    };

    Some(if neg { -val } else { val })
}

/// Parses a signed immediate and range-checks it against the 6-bit field.
///
/// Returns the two's-complement form masked to 6 bits.
fn parse_imm6(token: &str) -> Result<u16, AsmErrorKind> {
    let val = parse_int(token).ok_or_else(|| AsmErrorKind::BadImmediate(token.to_string()))?;
    if !(IMM6_MIN..=IMM6_MAX).contains(&val) {
        return Err(AsmErrorKind::ImmediateOutOfRange(val));
    }
    Ok((val as u16) & IMM6_MASK)
}

/// Parses a branch/jump target: either a label or an immediate offset.
///
/// A label resolves to `label_address - pc`, the offset the execute stage
/// adds back to the instruction's own address.
fn parse_target(
    token: &str,
    pc: usize,
    labels: &HashMap<String, usize>,
) -> Result<u16, AsmErrorKind> {
    if looks_like_label(token) {
        let target = *labels
            .get(&token.to_ascii_lowercase())
            .ok_or_else(|| AsmErrorKind::UndefinedLabel(token.to_string()))?;
        let offset = target as i64 - pc as i64;
        if !(IMM6_MIN..=IMM6_MAX).contains(&offset) {
            return Err(AsmErrorKind::OffsetOutOfRange {
                label: token.to_string(),
                offset,
            });
        }
        return Ok((offset as u16) & IMM6_MASK);
    }
    parse_imm6(token)
}

/// Parses a memory operand of the form `imm(rs)`.
fn parse_mem_operand(token: &str) -> Result<(u16, usize), AsmErrorKind> {
    let malformed = || AsmErrorKind::MalformedMemOperand(token.to_string());

    let open = token.find('(').ok_or_else(malformed)?;
    let inner = token[open + 1..].strip_suffix(')').ok_or_else(malformed)?;
    let imm_str = token[..open].trim();
    let reg_str = inner.trim();
    if imm_str.is_empty() || reg_str.is_empty() {
        return Err(malformed());
    }

    let imm = parse_imm6(imm_str)?;
    let rs = parse_reg(reg_str)?;
    Ok((imm, rs))
}

/// Packs an R-type word: `op=0000 | rs | rt | rd | func`.
fn encode_r(func: u16, rd: usize, rs: usize, rt: usize) -> u16 {
    (opcodes::OP_RTYPE << OPCODE_SHIFT)
        | ((rs as u16) << RS_SHIFT)
        | ((rt as u16) << RT_SHIFT)
        | ((rd as u16) << RD_SHIFT)
        | func
}

/// Packs an I-type word: `op | rs | rt | imm6`.
fn encode_i(op: u16, rs: usize, rt: usize, imm6: u16) -> u16 {
    (op << OPCODE_SHIFT)
        | ((rs as u16) << RS_SHIFT)
        | ((rt as u16) << RT_SHIFT)
        | (imm6 & IMM6_MASK)
}
