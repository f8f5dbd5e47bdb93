//! ParaCL - a small imperative language with integer variables, `while`
//! loops and console I/O.
//!
//! # Overview
//!
//! A ParaCL program is a list of statements over integer variables. There
//! are no declarations: the first use of a name creates the variable, and
//! every later use, in any block, refers to the same storage. Variables
//! start out as zero.
//!
//! ```text
//! n = ?;
//! fact = 1;
//! while (n > 1) {
//!     fact = fact * n;
//!     n--;
//! }
//! print fact;
//! ```
//!
//! `?` reads the next integer from the input and `print` writes a value on
//! its own line.
//!
//! # Quick Start
//!
//! ```
//! use bumpalo::Bump;
//! use paracl::{ExecutionOptions, Program, TokenReader};
//!
//! let arena = Bump::new();
//! let program = Program::compile(&arena, "print ? * 2;").unwrap();
//!
//! let mut output = Vec::new();
//! program
//!     .run(ExecutionOptions::default(), TokenReader::new("21".as_bytes()), &mut output)
//!     .unwrap();
//! assert_eq!(output, b"42\n");
//! ```
//!
//! Errors render as annotated source snippets with [`render_error`]; the
//! syntax tree can be exported for Graphviz with [`graph::dump_dot`].

pub mod error_renderer;
pub mod graph;

// Re-export public API from paracl_core
pub use paracl_core::api::{Diagnostic, Error, ExecutionOptions, Program, Severity};

// Re-export the pieces embedders use to drive programs directly
pub use paracl_core::evaluator::{InputError, IntInput, TokenReader};
pub use paracl_core::stack::{Slot, Stack};
pub use paracl_core::value::Value;
pub use paracl_core::{ast, parser, resolver};

pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};
