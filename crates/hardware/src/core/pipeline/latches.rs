//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the four records carried between the five pipeline
//! stages: IF/ID, ID/EX, EX/MEM, MEM/WB. Each latch also carries the raw
//! instruction word it transports, which feeds the snapshot's per-stage
//! occupancy view and lets the execute stage distinguish encodings that
//! share a control vector (BEQ/BNE).
//!
//! A latch's `Default` value is a bubble: all fields zero, control vector
//! all clear. Bubbles have no architectural effect in any stage.

use serde::Serialize;

use crate::core::pipeline::signals::{AluOp, ControlSignals};

/// IF/ID latch (Fetch to Decode).
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct IfId {
    /// Address of the instruction following the fetched one.
    pub pc_plus_1: u8,
    /// Fetched 16-bit instruction word.
    pub instr: u16,
}

/// ID/EX latch (Decode to Execute).
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct IdEx {
    /// Address of the instruction itself.
    pub pc: u8,
    /// Raw instruction word, carried for display and BEQ/BNE selection.
    pub instr: u16,
    /// Value read from `rs`.
    pub rs_val: i16,
    /// Value read from `rt`.
    pub rt_val: i16,
    /// Sign-extended immediate.
    pub imm: i16,
    /// First source register index, for the forwarding unit.
    pub rs: usize,
    /// Second source register index, for the forwarding and hazard units.
    pub rt: usize,
    /// Destination register index after the RegDst/JAL selection.
    pub dest: usize,
    /// Control vector for downstream stages.
    pub ctrl: ControlSignals,
    /// ALU operation selector.
    pub alu_op: AluOp,
}

/// EX/MEM latch (Execute to Memory).
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct ExMem {
    /// Raw instruction word, carried for display.
    pub instr: u16,
    /// Computed control-transfer target.
    pub branch_target: u8,
    /// ALU zero flag.
    pub zero: bool,
    /// ALU result (or return address for JAL).
    pub alu_result: i16,
    /// Forwarded `rt` value captured for stores.
    pub store_data: i16,
    /// Destination register index.
    pub dest: usize,
    /// Control vector for downstream stages.
    pub ctrl: ControlSignals,
}

/// MEM/WB latch (Memory to Writeback).
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct MemWb {
    /// Raw instruction word, carried for display.
    pub instr: u16,
    /// Word loaded from data memory (loads only).
    pub mem_data: i16,
    /// ALU result passed through from execute.
    pub alu_result: i16,
    /// Destination register index.
    pub dest: usize,
    /// Control vector for the writeback stage.
    pub ctrl: ControlSignals,
}
