//! Tree-walking evaluator for resolved ParaCL programs.
//!
//! The evaluator walks the tree recursively, dispatching on the node kind.
//! The [`Stack`] is the only mutable state it touches; the tree itself is
//! read-only.
//!
//! ## Design Principles
//!
//! - **Never panic**: arithmetic wraps, malformed trees are reported as
//!   [`InternalError`]s.
//! - **Stack-safe**: depth tracking turns runaway nesting into an error
//!   instead of overflowing the native stack.
//! - **Left to right**: operands are always evaluated left before right.
//!   `?` reads input, so the order is observable.
//!
//! ## Example
//!
//! ```
//! use bumpalo::Bump;
//! use paracl_core::{evaluator, parser, resolver, stack::Stack};
//!
//! let arena = Bump::new();
//! let parsed = parser::parse(&arena, "x = ?; print x * 2;").unwrap();
//! let resolution = resolver::resolve(parsed.root);
//!
//! let mut stack = Stack::for_resolution(&resolution);
//! let mut output = Vec::new();
//! evaluator::eval(parsed.root, &mut stack, "21".as_bytes(), &mut output).unwrap();
//! assert_eq!(output, b"42\n");
//! ```

mod error;
mod eval;
mod io;
mod operators;


pub use error::{
    ExecutionError, ExecutionErrorKind, InternalError, ResourceExceededError, RuntimeError,
};
pub use eval::Evaluator;
pub use io::{InputError, IntInput, TokenReader};

use std::io::{BufRead, Write};

use crate::{api::ExecutionOptions, ast::Node, stack::Stack, value::Value};

/// Evaluate a resolved program with default limits, reading `?` values
/// from `input` and writing `print` output to `output`.
pub fn eval<'a>(
    root: &'a Node<'a>,
    stack: &mut Stack,
    input: impl BufRead,
    output: impl Write,
) -> Result<Option<Value>, ExecutionError> {
    eval_with_options(ExecutionOptions::default(), root, stack, input, output)
}

/// Evaluate a resolved program with custom limits.
pub fn eval_with_options<'a>(
    options: ExecutionOptions,
    root: &'a Node<'a>,
    stack: &mut Stack,
    input: impl BufRead,
    output: impl Write,
) -> Result<Option<Value>, ExecutionError> {
    Evaluator::new(options, stack, TokenReader::new(input), output).eval(root)
}
