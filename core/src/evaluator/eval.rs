//! Core evaluation logic.

use std::io::Write;

use tracing::trace;

use crate::{
    api::ExecutionOptions,
    ast::{Node, NodeKind, Variable},
    evaluator::{
        ExecutionError, ExecutionErrorKind, InternalError, IntInput,
        ResourceExceededError::*, operators,
    },
    parser::AnnotatedSource,
    stack::{Slot, Stack},
    value::Value,
};

/// Evaluator for resolved programs.
///
/// The stack is the only state that outlives a call to [`eval`]; the
/// evaluator itself only tracks recursion depth and loop iterations.
///
/// [`eval`]: Evaluator::eval
pub struct Evaluator<'a, 's, I, O> {
    options: ExecutionOptions,
    stack: &'s mut Stack,
    input: I,
    output: O,
    /// Source positions for error reporting, when the tree came from the parser.
    ann: Option<&'a AnnotatedSource<'a>>,
    depth: usize,
    iterations: u64,
}

impl<'a, 's, I: IntInput, O: Write> Evaluator<'a, 's, I, O> {
    pub fn new(options: ExecutionOptions, stack: &'s mut Stack, input: I, output: O) -> Self {
        Self {
            options,
            stack,
            input,
            output,
            ann: None,
            depth: 0,
            iterations: 0,
        }
    }

    /// Attach source positions so errors carry the span of the failing node.
    pub fn with_source(mut self, ann: &'a AnnotatedSource<'a>) -> Self {
        self.ann = Some(ann);
        self
    }

    /// Evaluate `root` against the stack.
    ///
    /// Expressions produce a value; statements produce `None`. Output is
    /// flushed before returning, also when evaluation fails.
    pub fn eval(&mut self, root: &'a Node<'a>) -> Result<Option<Value>, ExecutionError> {
        let result = self.eval_node(root);
        let flushed = self
            .output
            .flush()
            .map_err(|e| self.error(root, ExecutionErrorKind::Io(e)));
        let value = result?;
        flushed?;
        Ok(value)
    }

    fn error(&self, node: &Node<'a>, kind: ExecutionErrorKind) -> ExecutionError {
        let span = self.ann.and_then(|ann| ann.span_of(node));
        ExecutionError::new(kind, span)
    }

    fn eval_node(&mut self, node: &'a Node<'a>) -> Result<Option<Value>, ExecutionError> {
        // Check depth before recursing
        if self.depth >= self.options.max_depth {
            return Err(self.error(
                node,
                StackOverflow {
                    depth: self.depth,
                    max_depth: self.options.max_depth,
                }
                .into(),
            ));
        }

        self.depth += 1;
        let result = self.eval_node_inner(node);
        self.depth -= 1;

        result
    }

    /// Evaluate a node that must produce a value.
    fn eval_value(&mut self, node: &'a Node<'a>) -> Result<Value, ExecutionError> {
        match self.eval_node(node)? {
            Some(value) => Ok(value),
            None => Err(self.error(
                node,
                InternalError::MissingValue {
                    node: node.kind_name(),
                }
                .into(),
            )),
        }
    }

    fn eval_node_inner(&mut self, node: &'a Node<'a>) -> Result<Option<Value>, ExecutionError> {
        match node.kind() {
            NodeKind::Literal(value) => Ok(Some(Value::int(*value))),

            NodeKind::Input => {
                let value = self
                    .input
                    .next_int()
                    .map_err(|e| self.error(node, e.into()))?;
                trace!(value, "read input");
                Ok(Some(Value::int(value)))
            }

            NodeKind::Variable(var) => {
                let slot = self.slot_of(node, var)?;
                self.read(node, slot).map(Some)
            }

            NodeKind::Binary { op, left, right } => {
                // Always left then right: both sides may read input.
                let left = self.eval_value(left)?;
                let right = self.eval_value(right)?;
                let result = operators::eval_binary(*op, left.as_int(), right.as_int())
                    .map_err(|e| self.error(node, e.into()))?;
                Ok(Some(Value::int(result)))
            }

            NodeKind::Unary { op, operand } if op.mutates_operand() => {
                let var = self.variable(node, operand, op.symbol())?;
                let slot = self.slot_of(operand, var)?;
                let current = self.read(operand, slot)?;
                let updated = Value::int(operators::eval_unary(*op, current.as_int()));
                self.write(operand, slot, updated)?;
                // Yields the updated value, not the previous one.
                Ok(Some(updated))
            }

            NodeKind::Unary { op, operand } => {
                let value = self.eval_value(operand)?;
                Ok(Some(Value::int(operators::eval_unary(*op, value.as_int()))))
            }

            NodeKind::Assign { target, value } => {
                let var = self.variable(node, target, "=")?;
                let slot = self.slot_of(target, var)?;
                let value = self.eval_value(value)?;
                self.write(target, slot, value)?;
                Ok(Some(value))
            }

            NodeKind::Sequence { current, rest } => {
                let value = self.eval_node(current)?;
                match rest {
                    Some(rest) => self.eval_node(rest),
                    None => Ok(value),
                }
            }

            NodeKind::Block(block) => {
                for statement in block.statements() {
                    self.eval_node(statement)?;
                }
                Ok(None)
            }

            NodeKind::Condition(expr) => self.eval_value(expr).map(Some),

            NodeKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.eval_value(condition)?.is_truthy() {
                    self.eval_node(then_branch)?;
                } else if let Some(else_branch) = else_branch {
                    self.eval_node(else_branch)?;
                }
                Ok(None)
            }

            NodeKind::While { condition, body } => {
                while self.eval_value(condition)?.is_truthy() {
                    self.count_iteration(node)?;
                    self.eval_node(body)?;
                }
                Ok(None)
            }

            NodeKind::Print(expr) => {
                let value = self.eval_value(expr)?;
                trace!(%value, "print");
                writeln!(self.output, "{}", value)
                    .map_err(|e| self.error(node, ExecutionErrorKind::Io(e)))?;
                Ok(Some(value))
            }
        }
    }

    fn count_iteration(&mut self, node: &Node<'a>) -> Result<(), ExecutionError> {
        self.iterations += 1;
        trace!(iteration = self.iterations, "loop iteration");
        match self.options.max_iterations {
            Some(max_iterations) if self.iterations > max_iterations => {
                Err(self.error(node, IterationLimit { max_iterations }.into()))
            }
            _ => Ok(()),
        }
    }

    /// The variable an assignment or increment writes to.
    fn variable<'n>(
        &self,
        node: &Node<'a>,
        target: &'n Node<'a>,
        op: &'static str,
    ) -> Result<&'n Variable<'a>, ExecutionError> {
        target
            .as_variable()
            .ok_or_else(|| self.error(node, InternalError::NotAVariable { op }.into()))
    }

    fn slot_of(&self, node: &Node<'a>, var: &Variable<'a>) -> Result<Slot, ExecutionError> {
        var.slot().ok_or_else(|| {
            self.error(
                node,
                InternalError::UnresolvedVariable {
                    name: var.name().to_string(),
                }
                .into(),
            )
        })
    }

    fn read(&self, node: &Node<'a>, slot: Slot) -> Result<Value, ExecutionError> {
        self.stack
            .read(slot)
            .map_err(|e| self.error(node, e.into()))
    }

    fn write(&mut self, node: &Node<'a>, slot: Slot, value: Value) -> Result<(), ExecutionError> {
        match self.stack.write(slot, value) {
            Ok(()) => Ok(()),
            Err(e) => Err(self.error(node, e.into())),
        }
    }
}
