//! Execute (EX) stage.
//!
//! This module implements the third stage of the pipeline. It performs the
//! following:
//! 1. **Operand Resolution:** Applies the forward selectors to pick each
//!    operand from the register read, the EX/MEM result, or the writeback
//!    data.
//! 2. **Arithmetic Execution:** Runs the ALU and captures the zero flag.
//! 3. **Control Transfer:** Computes the branch target from the
//!    instruction's own address, decides `pc_src`, and records the PC
//!    redirect (branch target, or the forwarded `rs` value for JR).
//! 4. **Link Handling:** Overrides the ALU result with the return address
//!    for JAL.

use crate::common::constants::ADDR_MASK;
use crate::core::cpu::Cpu;
use crate::core::pipeline::hazards::Forward;
use crate::core::pipeline::latches::ExMem;
use crate::core::pipeline::TickState;
use crate::core::units::alu::Alu;
use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes;

/// Executes the execute stage.
///
/// The `store_data` captured into EX/MEM is the forwarded `rt` operand,
/// not the raw register read, so a store can consume a just-produced value
/// without stalling.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the engine state.
/// * `t` - Staging buffer for this tick.
pub fn execute_stage(cpu: &mut Cpu, t: &mut TickState) {
    let id = cpu.id_ex;

    let op_a = match t.forward_a {
        Forward::ExMem => cpu.ex_mem.alu_result,
        Forward::MemWb => t.wb.data,
        Forward::None => id.rs_val,
    };
    let reg_b = match t.forward_b {
        Forward::ExMem => cpu.ex_mem.alu_result,
        Forward::MemWb => t.wb.data,
        Forward::None => id.rt_val,
    };
    let alu_b = if id.ctrl.alu_src { id.imm } else { reg_b };

    let (mut alu_result, zero) = Alu::execute(id.alu_op, op_a, alu_b);

    // Target is relative to the transferring instruction's own address.
    let branch_target = (id.pc as u16).wrapping_add(id.imm as u16) as u8;

    // Jump together with RegWrite identifies JAL; the ALU result becomes
    // the return address heading for the link register.
    let is_jal = id.ctrl.jump && id.ctrl.reg_write;
    if is_jal {
        alu_result = id.pc.wrapping_add(1) as i16;
    }

    let taken = if id.ctrl.branch {
        if id.instr.opcode() == opcodes::OP_BNE {
            !zero
        } else {
            zero
        }
    } else {
        false
    };
    let pc_src = taken || id.ctrl.jump;

    if pc_src {
        // Jump together with AluSrc identifies JR, which redirects to the
        // forwarded rs value instead of the PC-relative target.
        let is_jr = id.ctrl.jump && id.ctrl.alu_src;
        t.pc_src = true;
        t.pc_redirect = if is_jr {
            (op_a as u16 & ADDR_MASK) as u8
        } else {
            branch_target
        };
        if cpu.trace {
            eprintln!("EX  pc={} redirect -> {}", id.pc, t.pc_redirect);
        }
    } else if cpu.trace && !id.ctrl.is_bubble() {
        eprintln!("EX  pc={} alu={} zero={}", id.pc, alu_result, zero);
    }

    t.next_ex_mem = ExMem {
        instr: id.instr,
        branch_target,
        zero,
        alu_result,
        store_data: reg_b,
        dest: id.dest,
        ctrl: id.ctrl,
    };
}
