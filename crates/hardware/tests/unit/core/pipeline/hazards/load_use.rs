//! Load-use hazard detection tests.
//!
//! Verifies that `need_stall_load_use` detects exactly the cases where an
//! instruction in decode depends on data still being loaded in execute.

use pipe16_core::core::pipeline::hazards::need_stall_load_use;
use pipe16_core::core::pipeline::latches::{IdEx, IfId};
use pipe16_core::core::pipeline::signals::ControlSignals;

/// Helper: encode an instruction word with just the rs and rt fields set.
fn inst(rs: u16, rt: u16) -> u16 {
    (rs & 0x7) << 9 | (rt & 0x7) << 6
}

/// Helper: an ID/EX entry for a load writing `rt`.
fn load_into(rt: usize) -> IdEx {
    IdEx {
        rt,
        ctrl: ControlSignals {
            mem_read: true,
            reg_write: true,
            mem_to_reg: true,
            alu_src: true,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Helper: an ID/EX entry for an ALU write to `dest` (no load).
fn alu_into(dest: usize) -> IdEx {
    IdEx {
        dest,
        rt: dest,
        ctrl: ControlSignals {
            reg_write: true,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Helper: an IF/ID entry whose instruction reads the given registers.
fn consumer(rs: u16, rt: u16) -> IfId {
    IfId {
        instr: inst(rs, rt),
        ..Default::default()
    }
}

// ══════════════════════════════════════════════════════════
// 1. Stall cases
// ══════════════════════════════════════════════════════════

#[test]
fn stall_when_load_rt_matches_consumer_rs() {
    assert!(
        need_stall_load_use(&load_into(5), &consumer(5, 0)),
        "load r5 then read r5 as rs requires a stall"
    );
}

#[test]
fn stall_when_load_rt_matches_consumer_rt() {
    assert!(
        need_stall_load_use(&load_into(3), &consumer(1, 3)),
        "load r3 then read r3 as rt requires a stall"
    );
}

#[test]
fn stall_for_highest_register() {
    assert!(need_stall_load_use(&load_into(7), &consumer(7, 7)));
}

// ══════════════════════════════════════════════════════════
// 2. No-stall cases
// ══════════════════════════════════════════════════════════

#[test]
fn no_stall_without_a_load() {
    assert!(
        !need_stall_load_use(&alu_into(5), &consumer(5, 0)),
        "an ALU producer forwards; only loads stall"
    );
}

#[test]
fn no_stall_without_a_dependency() {
    assert!(!need_stall_load_use(&load_into(5), &consumer(6, 7)));
}

#[test]
fn no_stall_when_load_targets_r0() {
    // A load into r0 is dropped; reads of r0 are hardwired to zero.
    assert!(!need_stall_load_use(&load_into(0), &consumer(0, 0)));
}

#[test]
fn no_stall_on_empty_pipeline() {
    assert!(!need_stall_load_use(&IdEx::default(), &IfId::default()));
}
