//! Instruction decode (ID) stage.
//!
//! This module implements the second stage of the pipeline. It performs the
//! following:
//! 1. **Decoding:** Extracts fields and sign-extends the immediate.
//! 2. **Control Generation:** Looks up the control vector and ALU operation
//!    for the opcode.
//! 3. **Register Read:** Reads both sources with the write-first bypass
//!    from this cycle's writeback.
//! 4. **Bubble Insertion:** Emits a bubble into ID/EX when a load-use
//!    stall or a control-transfer flush applies this tick.

use crate::common::constants::LINK_REG;
use crate::core::cpu::Cpu;
use crate::core::pipeline::latches::IdEx;
use crate::core::pipeline::signals::{alu_op_for, ControlSignals};
use crate::core::pipeline::TickState;
use crate::isa::decode::decode;
use crate::isa::opcodes;

/// Executes the decode stage.
///
/// The destination register is `rd` when `RegDst` is set, `rt` otherwise;
/// JAL overrides it to the link register `r7`.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the engine state.
/// * `t` - Staging buffer for this tick.
pub fn decode_stage(cpu: &mut Cpu, t: &mut TickState) {
    // Flush (from EX this tick) or stall both insert a bubble; when they
    // coincide the result is the same bubble, and flush wins for the PC.
    if t.pc_src || t.stall {
        t.next_id_ex = IdEx::default();
        return;
    }

    let instr = cpu.if_id.instr;
    let d = decode(instr);
    let ctrl = ControlSignals::decode(d.opcode);
    let alu_op = alu_op_for(d.opcode, d.func);

    // Write-first register file: a read of the register being written back
    // this cycle observes the new value.
    let read = |idx: usize| {
        if t.wb.write && t.wb.dest == idx && idx != 0 {
            t.wb.data
        } else {
            cpu.regs.read(idx)
        }
    };
    let rs_val = read(d.rs);
    let rt_val = read(d.rt);

    let dest = if d.opcode == opcodes::OP_JAL {
        LINK_REG
    } else if ctrl.reg_dst {
        d.rd
    } else {
        d.rt
    };

    if cpu.trace && instr != 0 {
        eprintln!(
            "ID  {:#06x} rs={} rt={} dest={} imm={}",
            instr, d.rs, d.rt, dest, d.imm
        );
    }

    t.next_id_ex = IdEx {
        pc: cpu.if_id.pc_plus_1.wrapping_sub(1),
        instr,
        rs_val,
        rt_val,
        imm: d.imm,
        rs: d.rs,
        rt: d.rt,
        dest,
        ctrl,
        alu_op,
    };
}
