//! Binary and unary operator implementations.

use crate::ast::{BinaryOp, UnaryOp};
use crate::evaluator::RuntimeError;

/// Evaluate a binary operation on two integers.
///
/// Uses wrapping arithmetic to prevent panics on overflow.
/// Division or remainder by zero returns an error.
pub(super) fn eval_binary(op: BinaryOp, left: i64, right: i64) -> Result<i64, RuntimeError> {
    let result = match op {
        BinaryOp::Add => left.wrapping_add(right),
        BinaryOp::Sub => left.wrapping_sub(right),
        BinaryOp::Mul => left.wrapping_mul(right),
        BinaryOp::Div => {
            if right == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            // i64::MIN / -1 wraps to i64::MIN
            left.wrapping_div(right)
        }
        BinaryOp::Mod => {
            if right == 0 {
                return Err(RuntimeError::RemainderByZero);
            }
            left.wrapping_rem(right)
        }
        BinaryOp::Eq => (left == right) as i64,
        BinaryOp::Ne => (left != right) as i64,
        BinaryOp::Lt => (left < right) as i64,
        BinaryOp::Le => (left <= right) as i64,
        BinaryOp::Gt => (left > right) as i64,
        BinaryOp::Ge => (left >= right) as i64,
        BinaryOp::And => (left != 0 && right != 0) as i64,
        BinaryOp::Or => (left != 0 || right != 0) as i64,
    };
    Ok(result)
}

/// Evaluate a unary operation on an integer.
///
/// For `++` and `--` this is the updated value; storing it back is up to
/// the caller.
pub(super) fn eval_unary(op: UnaryOp, operand: i64) -> i64 {
    match op {
        UnaryOp::Neg => operand.wrapping_neg(),
        UnaryOp::Not => (operand == 0) as i64,
        UnaryOp::PostInc => operand.wrapping_add(1),
        UnaryOp::PostDec => operand.wrapping_sub(1),
    }
}
