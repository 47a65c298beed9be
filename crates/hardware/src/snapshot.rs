//! Snapshot export of engine state.
//!
//! This module freezes the full architectural and pipeline state into a
//! plain serializable record after any tick. It provides:
//! 1. **Architectural View:** Cycle, PC, register image, and the occupied
//!    data-memory cells.
//! 2. **Pipeline View:** All four latches, with the IF/ID instruction also
//!    decoded into its fields, and the control vector of the instruction
//!    in decode.
//! 3. **Hazard View:** Stall/flush flags and the 2-bit forward selector
//!    codes.
//! 4. **Occupancy View:** The disassembled instruction resident in each
//!    stage, or `"bubble"` for a cleared latch.
//!
//! The record serializes to the JSON wire shape consumed by visualization
//! clients; drivers and clients version together.

use serde::Serialize;

use crate::core::cpu::Cpu;
use crate::core::pipeline::latches::{ExMem, IdEx, MemWb};
use crate::core::pipeline::signals::ControlSignals;
use crate::isa::decode::decode;
use crate::isa::disasm::disassemble;

/// One occupied data-memory cell.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct MemCell {
    /// Word address, 0-255.
    pub addr: usize,
    /// Stored signed 16-bit value.
    pub value: i16,
}

/// IF/ID latch view, augmented with the decoded instruction fields.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct IfIdView {
    /// Address of the instruction following the fetched one.
    pub pc_plus_1: u8,
    /// Raw fetched word.
    pub instr: u16,
    /// Decoded opcode field.
    pub opcode: u16,
    /// Decoded first source register.
    pub rs: usize,
    /// Decoded second source register.
    pub rt: usize,
    /// Decoded destination register field.
    pub rd: usize,
    /// Decoded function code.
    pub func: u16,
    /// Sign-extended immediate.
    pub imm: i16,
}

/// Hazard-unit outputs for the most recent tick.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct HazardView {
    /// A load-use stall was applied.
    pub stall: bool,
    /// Forward selector code for operand A: `"00"`, `"01"`, or `"10"`.
    pub forward_a: &'static str,
    /// Forward selector code for operand B.
    pub forward_b: &'static str,
    /// A control transfer redirected the PC.
    pub pc_src: bool,
    /// IF/ID was flushed to a bubble.
    pub flush_if_id: bool,
    /// ID/EX was flushed to a bubble (flush or stall).
    pub flush_id_ex: bool,
}

/// Disassembled occupant of each pipeline stage.
#[derive(Clone, Debug, Serialize)]
pub struct Occupancy {
    /// Instruction being fetched at the current PC.
    #[serde(rename = "IF")]
    pub fetch: String,
    /// Instruction in decode (IF/ID latch).
    #[serde(rename = "ID")]
    pub decode: String,
    /// Instruction in execute (ID/EX latch), or `"bubble"`.
    #[serde(rename = "EX")]
    pub execute: String,
    /// Instruction in memory access (EX/MEM latch), or `"bubble"`.
    #[serde(rename = "MEM")]
    pub memory: String,
    /// Instruction in writeback (MEM/WB latch), or `"bubble"`.
    #[serde(rename = "WB")]
    pub writeback: String,
}

/// Complete engine state after a tick, ready for serialization.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    /// Cycle counter.
    pub cycle: u64,
    /// Program counter.
    pub pc: u8,
    /// Register image `r0`-`r7`.
    pub registers: [i16; 8],
    /// Non-zero data-memory cells.
    pub memory: Vec<MemCell>,
    /// IF/ID latch with decoded fields.
    pub if_id: IfIdView,
    /// ID/EX latch.
    pub id_ex: IdEx,
    /// EX/MEM latch.
    pub ex_mem: ExMem,
    /// MEM/WB latch.
    pub mem_wb: MemWb,
    /// Control vector of the instruction currently in decode.
    pub control: ControlSignals,
    /// Hazard-unit outputs.
    pub hazard: HazardView,
    /// Per-stage occupancy strings.
    pub pipeline_occupancy: Occupancy,
}

impl Cpu {
    /// Freezes the engine state into a [`Snapshot`].
    ///
    /// A pure read; the engine is unchanged.
    pub fn snapshot(&self) -> Snapshot {
        let d = decode(self.if_id.instr);

        let stage = |instr: u16, bubble: bool| {
            if bubble {
                "bubble".to_string()
            } else {
                disassemble(instr)
            }
        };

        Snapshot {
            cycle: self.cycle,
            pc: self.pc,
            registers: self.regs.image(),
            memory: self
                .dmem
                .occupied()
                .into_iter()
                .map(|(addr, value)| MemCell { addr, value })
                .collect(),
            if_id: IfIdView {
                pc_plus_1: self.if_id.pc_plus_1,
                instr: self.if_id.instr,
                opcode: d.opcode,
                rs: d.rs,
                rt: d.rt,
                rd: d.rd,
                func: d.func,
                imm: d.imm,
            },
            id_ex: self.id_ex,
            ex_mem: self.ex_mem,
            mem_wb: self.mem_wb,
            control: ControlSignals::decode(d.opcode),
            hazard: HazardView {
                stall: self.hazards.stall,
                forward_a: self.hazards.forward_a.code(),
                forward_b: self.hazards.forward_b.code(),
                pc_src: self.hazards.pc_src,
                flush_if_id: self.hazards.flush_if_id,
                flush_id_ex: self.hazards.flush_id_ex,
            },
            pipeline_occupancy: Occupancy {
                fetch: disassemble(self.imem.read(self.pc)),
                decode: disassemble(self.if_id.instr),
                execute: stage(self.id_ex.instr, self.id_ex.ctrl.is_bubble()),
                memory: stage(self.ex_mem.instr, self.ex_mem.ctrl.is_bubble()),
                writeback: stage(self.mem_wb.instr, self.mem_wb.ctrl.is_bubble()),
            },
        }
    }
}
