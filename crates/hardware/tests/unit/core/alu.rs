//! ALU tests: every operation, wrap-around, and the zero flag.

use pipe16_core::core::pipeline::signals::AluOp;
use pipe16_core::core::units::alu::Alu;

#[test]
fn add_and_sub() {
    assert_eq!(Alu::execute(AluOp::Add, 2, 3), (5, false));
    assert_eq!(Alu::execute(AluOp::Sub, 5, 5), (0, true));
    assert_eq!(Alu::execute(AluOp::Sub, -3, 4), (-7, false));
}

#[test]
fn arithmetic_wraps_silently() {
    assert_eq!(Alu::execute(AluOp::Add, i16::MAX, 1), (i16::MIN, false));
    assert_eq!(Alu::execute(AluOp::Sub, i16::MIN, 1), (i16::MAX, false));
}

#[test]
fn bitwise_ops() {
    assert_eq!(Alu::execute(AluOp::And, 0b1100, 0b1010), (0b1000, false));
    assert_eq!(Alu::execute(AluOp::Or, 0b1100, 0b1010), (0b1110, false));
    assert_eq!(Alu::execute(AluOp::Xor, 0b1100, 0b1010), (0b0110, false));
    assert_eq!(Alu::execute(AluOp::Xor, 7, 7), (0, true));
}

#[test]
fn slt_is_signed() {
    assert_eq!(Alu::execute(AluOp::Slt, -5, 10), (1, false));
    assert_eq!(Alu::execute(AluOp::Slt, 10, -5), (0, true));
    assert_eq!(Alu::execute(AluOp::Slt, 3, 3), (0, true));
}

#[test]
fn div_truncates_toward_zero() {
    assert_eq!(Alu::execute(AluOp::Div, 7, 2), (3, false));
    assert_eq!(Alu::execute(AluOp::Div, -7, 2), (-3, false));
    assert_eq!(Alu::execute(AluOp::Div, 7, -2), (-3, false));
}

#[test]
fn div_by_zero_is_zero_not_a_fault() {
    assert_eq!(Alu::execute(AluOp::Div, 7, 0), (0, true));
    assert_eq!(Alu::execute(AluOp::Div, i16::MIN, 0), (0, true));
}

#[test]
fn div_overflow_wraps() {
    // i16::MIN / -1 does not fit; it wraps back to i16::MIN.
    assert_eq!(Alu::execute(AluOp::Div, i16::MIN, -1), (i16::MIN, false));
}

#[test]
fn zero_flag_tracks_result() {
    assert_eq!(Alu::execute(AluOp::Add, -4, 4), (0, true));
    assert_eq!(Alu::execute(AluOp::And, 0b01, 0b10), (0, true));
}
