//! Public API for the ParaCL interpreter.
//!
//! [`Program::compile`] parses and resolves a program; [`Program::run`]
//! executes it against an input source and an output sink. Errors from
//! every stage surface as [`Error`].
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use paracl_core::api::{ExecutionOptions, Program};
//! use paracl_core::evaluator::TokenReader;
//!
//! let arena = Bump::new();
//! let program = Program::compile(&arena, "print ? + 1;").unwrap();
//!
//! let mut output = Vec::new();
//! program
//!     .run(ExecutionOptions::default(), TokenReader::new("41".as_bytes()), &mut output)
//!     .unwrap();
//! assert_eq!(output, b"42\n");
//! ```

pub mod error;
pub mod options;
pub mod program;

pub use error::{Diagnostic, Error, Severity};
pub use options::ExecutionOptions;
pub use program::Program;
