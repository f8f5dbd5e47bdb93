//! Immediate values produced while evaluating expressions.
//!
//! A `Value` lives only for the duration of the operation that consumes it.
//! It is never stored in the syntax tree; variable storage is the runtime
//! [`Stack`](crate::stack::Stack), which holds values by slot.

use core::fmt;

/// The result of evaluating an expression node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    Int(i64),
}

impl Value {
    pub const ZERO: Value = Value::Int(0);
    pub const TRUE: Value = Value::Int(1);
    pub const FALSE: Value = Value::Int(0);

    pub fn int(value: i64) -> Self {
        Value::Int(value)
    }

    /// Encode a boolean the way conditions read it back: `1` or `0`.
    pub fn from_bool(value: bool) -> Self {
        if value { Value::TRUE } else { Value::FALSE }
    }

    pub fn as_int(self) -> i64 {
        match self {
            Value::Int(value) => value,
        }
    }

    /// Zero is false, everything else is true.
    pub fn is_truthy(self) -> bool {
        self.as_int() != 0
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::ZERO
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::from_bool(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{}", value),
        }
    }
}
