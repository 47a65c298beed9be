//! End-to-end pipeline scenarios.
//!
//! Each test assembles a small program, runs it long enough to drain, and
//! checks the architectural outcome. The harness re-checks the machine
//! invariants (r0 hardwiring, forward-code validity) after every tick.

use crate::common::TestContext;

// ══════════════════════════════════════════════════════════
// 1. Forwarding
// ══════════════════════════════════════════════════════════

#[test]
fn forwarding_resolves_back_to_back_dependencies_without_stalling() {
    let mut ctx = TestContext::with_program(
        "addi r1, r0, 10\n\
         add  r2, r1, r1\n\
         add  r3, r2, r1\n",
    );
    let seen = ctx.run_collecting_hazards(7);

    assert_eq!(ctx.reg(1), 10);
    assert_eq!(ctx.reg(2), 20);
    assert_eq!(ctx.reg(3), 30);
    assert_eq!(ctx.cpu.stats.stalls_data, 0, "pure ALU chain never stalls");

    // First dependent add takes both operands from EX/MEM; the second
    // takes rs from EX/MEM and rt from MEM/WB.
    assert!(seen
        .iter()
        .any(|h| h.forward_a.code() == "10" && h.forward_b.code() == "10"));
    assert!(seen
        .iter()
        .any(|h| h.forward_a.code() == "10" && h.forward_b.code() == "01"));
}

#[test]
fn store_consumes_a_just_produced_value_without_stalling() {
    let mut ctx = TestContext::with_program(
        "addi r1, r0, 9\n\
         sw   r1, 4(r0)\n",
    );
    ctx.run(8);

    assert_eq!(ctx.mem(4), 9, "store data must come from the forwarded rt");
    assert_eq!(ctx.cpu.stats.stalls_data, 0);
}

// ══════════════════════════════════════════════════════════
// 2. Load-use stall
// ══════════════════════════════════════════════════════════

#[test]
fn load_use_inserts_exactly_one_stall() {
    let mut ctx = TestContext::with_program(
        "addi r1, r0, 5\n\
         sw   r1, 0(r0)\n\
         lw   r2, 0(r0)\n\
         add  r3, r2, r1\n",
    );
    let seen = ctx.run_collecting_hazards(12);

    assert_eq!(ctx.mem(0), 5);
    assert_eq!(ctx.reg(2), 5);
    assert_eq!(ctx.reg(3), 10);

    let stall_ticks = seen.iter().filter(|h| h.stall).count();
    assert_eq!(stall_ticks, 1, "exactly one stall between lw and add");
    assert_eq!(ctx.cpu.stats.stalls_data, 1);
}

// ══════════════════════════════════════════════════════════
// 3. Control hazards
// ══════════════════════════════════════════════════════════

#[test]
fn taken_branch_flushes_the_two_fetched_instructions() {
    // The branch at address 2 targets 2 + 3 = 5; the two instructions
    // already fetched behind it must be discarded.
    let mut ctx = TestContext::with_program(
        "addi r1, r0, 5\n\
         addi r2, r0, 5\n\
         beq  r1, r2, 3\n\
         addi r3, r0, 99\n\
         addi r4, r0, 88\n\
         addi r5, r0, 42\n",
    );
    let seen = ctx.run_collecting_hazards(12);

    assert_eq!(ctx.reg(3), 0, "first shadow instruction must be flushed");
    assert_eq!(ctx.reg(4), 0, "second shadow instruction must be flushed");
    assert_eq!(ctx.reg(5), 42, "branch target must execute");
    assert!(seen.iter().any(|h| h.pc_src && h.flush_if_id && h.flush_id_ex));
}

#[test]
fn untaken_branch_falls_through() {
    let mut ctx = TestContext::with_program(
        "addi r1, r0, 1\n\
         beq  r1, r0, 3\n\
         addi r2, r0, 7\n",
    );
    ctx.run(8);

    assert_eq!(ctx.reg(2), 7, "untaken branch must not redirect");
    assert_eq!(ctx.cpu.stats.flushes_control, 0);
}

#[test]
fn bne_countdown_loop_terminates() {
    let mut ctx = TestContext::with_program(
        "        addi r1, r0, 3\n\
         loop:   addi r1, r1, -1\n\
                 bne  r1, r0, loop\n\
                 addi r2, r0, 9\n",
    );
    ctx.run(20);

    assert_eq!(ctx.reg(1), 0, "loop must run until r1 reaches zero");
    assert_eq!(ctx.reg(2), 9, "fall-through executes after the last pass");
}

#[test]
fn jump_flushes_its_shadow() {
    let mut ctx = TestContext::with_program(
        "j    3\n\
         addi r6, r0, 77\n\
         addi r7, r0, 66\n\
         addi r1, r0, 1\n",
    );
    ctx.run(10);

    assert_eq!(ctx.reg(6), 0);
    assert_eq!(ctx.reg(7), 0);
    assert_eq!(ctx.reg(1), 1);
}

#[test]
fn jal_jr_round_trip() {
    let mut ctx = TestContext::with_program(
        "        addi r1, r0, 5\n\
                 jal  double\n\
                 addi r2, r0, 10\n\
                 j    end\n\
         double: add  r1, r1, r1\n\
                 jr   r7\n\
         end:    halt\n",
    );
    ctx.run(30);

    assert_eq!(ctx.reg(1), 10, "subroutine must run exactly once");
    assert_eq!(ctx.reg(2), 10, "execution must resume after the call");
    assert_eq!(ctx.reg(7), 2, "r7 holds the index after the jal");
}

// ══════════════════════════════════════════════════════════
// 4. Defined-behavior edges
// ══════════════════════════════════════════════════════════

#[test]
fn division_by_zero_is_safe() {
    let mut ctx = TestContext::with_program(
        "addi r1, r0, 7\n\
         div  r2, r1, r0\n",
    );
    ctx.run(8);

    assert_eq!(ctx.reg(2), 0, "divide by zero yields 0, no fault");
}

#[test]
fn negative_store_offset_wraps_into_high_memory() {
    let mut ctx = TestContext::with_program(
        "addi r1, r0, 7\n\
         sw   r1, -1(r0)\n",
    );
    ctx.run(8);

    assert_eq!(ctx.mem(255), 7, "effective address -1 wraps to 255");
}

#[test]
fn pc_wraps_through_empty_memory_without_faulting() {
    let mut ctx = TestContext::with_program("nop\n");
    ctx.run(300);

    assert_eq!(ctx.cpu.cycle, 300);
    assert_eq!(ctx.reg(1), 0);
}

// ══════════════════════════════════════════════════════════
// 5. Fibonacci
// ══════════════════════════════════════════════════════════

#[test]
fn fibonacci_eight_terms() {
    let mut ctx = TestContext::with_program(
        "addi r1, r0, 0\n\
         sw   r1, 0(r0)\n\
         addi r2, r0, 1\n\
         sw   r2, 1(r0)\n\
         add  r3, r1, r2\n\
         sw   r3, 2(r0)\n\
         add  r4, r2, r3\n\
         sw   r4, 3(r0)\n\
         add  r5, r3, r4\n\
         sw   r5, 4(r0)\n\
         add  r6, r4, r5\n\
         sw   r6, 5(r0)\n\
         add  r7, r5, r6\n\
         sw   r7, 6(r0)\n\
         add  r1, r6, r7\n\
         sw   r1, 7(r0)\n\
         halt\n",
    );
    ctx.run(60);

    let expected = [0, 1, 1, 2, 3, 5, 8, 13];
    for (addr, want) in expected.iter().enumerate() {
        assert_eq!(ctx.mem(addr), *want, "DMem[{addr}] must hold term {addr}");
    }
    assert_eq!(ctx.cpu.stats.stalls_data, 0, "no loads, so no stalls");
}
