//! Compiled ParaCL programs.

use std::io::Write;

use bumpalo::Bump;
use tracing::debug;

use super::{Error, ExecutionOptions};
use crate::ast::Node;
use crate::evaluator::{Evaluator, IntInput};
use crate::parser::{self, AnnotatedSource};
use crate::resolver::{self, Resolution};
use crate::stack::Stack;

/// A parsed and resolved program, ready to run.
///
/// The tree lives in the arena passed to [`Program::compile`]. A program can
/// be run any number of times; every run starts from a fresh, zeroed stack.
///
/// # Example
///
/// ```
/// use bumpalo::Bump;
/// use paracl_core::api::{ExecutionOptions, Program};
/// use paracl_core::evaluator::TokenReader;
///
/// let arena = Bump::new();
/// let program = Program::compile(&arena, "n = ?; while (n > 0) print n--;").unwrap();
///
/// let mut output = Vec::new();
/// let input = TokenReader::new("3".as_bytes());
/// program.run(ExecutionOptions::default(), input, &mut output).unwrap();
/// assert_eq!(output, b"2\n1\n0\n");
/// ```
pub struct Program<'a> {
    root: &'a Node<'a>,
    ann: &'a AnnotatedSource<'a>,
    resolution: Resolution<'a>,
}

impl<'a> Program<'a> {
    /// Parse `source` and resolve its variables.
    pub fn compile(arena: &'a Bump, source: &str) -> Result<Self, Error> {
        let source: &'a str = arena.alloc_str(source);
        let parsed = parser::parse(arena, source).map_err(|e| Error::from_parse(e, source))?;
        let resolution = resolver::resolve(parsed.root);
        debug!(
            slots = resolution.slot_count(),
            blocks = resolution.block_count(),
            "compiled program"
        );

        Ok(Self {
            root: parsed.root,
            ann: parsed.ann,
            resolution,
        })
    }

    pub fn root(&self) -> &'a Node<'a> {
        self.root
    }

    pub fn resolution(&self) -> &Resolution<'a> {
        &self.resolution
    }

    pub fn source(&self) -> &'a str {
        self.ann.source
    }

    /// Run the program, reading `?` values from `input` and writing `print`
    /// output to `output`.
    pub fn run(
        &self,
        options: ExecutionOptions,
        input: impl IntInput,
        output: impl Write,
    ) -> Result<(), Error> {
        self.run_with_stack(options, input, output).map(|_| ())
    }

    /// Like [`run`](Self::run), but returns the final variable storage.
    pub fn run_with_stack(
        &self,
        options: ExecutionOptions,
        input: impl IntInput,
        output: impl Write,
    ) -> Result<Stack, Error> {
        let mut stack = Stack::for_resolution(&self.resolution);
        Evaluator::new(options, &mut stack, input, output)
            .with_source(self.ann)
            .eval(self.root)
            .map_err(|e| Error::from_execution(e, self.source()))?;
        Ok(stack)
    }
}
