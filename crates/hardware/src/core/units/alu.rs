//! Arithmetic logic unit (ALU).
//!
//! This module implements the integer ALU used in the execute stage. It is
//! a pure combinational function over two signed 16-bit operands and the
//! 3-bit operation selector. Arithmetic overflow wraps silently; division
//! by zero yields 0. There are no faults.

use crate::core::pipeline::signals::AluOp;

/// Arithmetic logic unit for signed 16-bit operations.
pub struct Alu;

impl Alu {
    /// Executes an ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The operation to perform.
    /// * `a` - First operand.
    /// * `b` - Second operand.
    ///
    /// # Returns
    ///
    /// `(result, zero)` where `zero` is set iff the result is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipe16_core::core::units::alu::Alu;
    /// use pipe16_core::core::pipeline::signals::AluOp;
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 42, 8), (50, false));
    ///
    /// // Overflow wraps in two's complement.
    /// assert_eq!(Alu::execute(AluOp::Add, i16::MAX, 1), (i16::MIN, false));
    ///
    /// // Signed comparison.
    /// assert_eq!(Alu::execute(AluOp::Slt, -5, 10), (1, false));
    ///
    /// // Division by zero is defined as 0.
    /// assert_eq!(Alu::execute(AluOp::Div, 7, 0), (0, true));
    /// ```
    pub fn execute(op: AluOp, a: i16, b: i16) -> (i16, bool) {
        let result = match op {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Sub => a.wrapping_sub(b),
            AluOp::And => a & b,
            AluOp::Or => a | b,
            AluOp::Xor => a ^ b,
            AluOp::Slt => (a < b) as i16,
            AluOp::Div => {
                if b == 0 {
                    0
                } else {
                    a.wrapping_div(b)
                }
            }
        };
        (result, result == 0)
    }
}
