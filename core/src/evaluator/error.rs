//! Runtime evaluation errors.
//!
//! Every error aborts the current run. They are grouped by who is at fault:
//!
//! - **Runtime errors**: the program did something invalid (division by
//!   zero) or ran out of input. Running out of input is the only error a
//!   caller may reasonably recover from, see
//!   [`ExecutionError::is_recoverable`].
//!
//! - **Resource exceeded errors**: evaluation hit a configured limit, or a
//!   slot fell outside the stack.
//!
//! - **Internal errors**: the tree reaching the evaluator is malformed.
//!   A tree produced by the parser and annotated by the resolver never
//!   triggers these.

use thiserror::Error;

use crate::api::{Diagnostic, Severity};
use crate::evaluator::io::InputError;
use crate::parser::Span;
use crate::stack::StackError;

/// Evaluation error with the location of the node that raised it.
///
/// `span` is `None` when the tree was built without source positions.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct ExecutionError {
    pub kind: ExecutionErrorKind,
    pub span: Option<Span>,
}

#[derive(Debug, Error)]
pub enum ExecutionErrorKind {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    ResourceExceeded(#[from] ResourceExceededError),

    #[error(transparent)]
    Internal(#[from] InternalError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("remainder by zero")]
    RemainderByZero,

    #[error("input exhausted: expected an integer")]
    InputExhausted,

    #[error("invalid input '{token}': expected an integer")]
    InvalidInput { token: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceExceededError {
    #[error("evaluation stack overflow: depth {depth} exceeds maximum of {max_depth}")]
    StackOverflow { depth: usize, max_depth: usize },

    #[error("loop iteration limit of {max_iterations} exceeded")]
    IterationLimit { max_iterations: u64 },

    #[error(transparent)]
    Stack(#[from] StackError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternalError {
    #[error("operator '{op}' applied to something that is not a variable")]
    NotAVariable { op: &'static str },

    #[error("variable '{name}' has no slot; the tree was not resolved")]
    UnresolvedVariable { name: String },

    #[error("{node} node produced no value where one was required")]
    MissingValue { node: &'static str },
}

impl ExecutionError {
    pub fn new(kind: ExecutionErrorKind, span: Option<Span>) -> Self {
        Self { kind, span }
    }

    /// Whether a caller may treat this error as an ordinary end of the
    /// program rather than a fault. Only running out of input qualifies.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.kind,
            ExecutionErrorKind::Runtime(RuntimeError::InputExhausted)
        )
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        use ExecutionErrorKind::*;

        let (code, help) = match &self.kind {
            Runtime(RuntimeError::DivisionByZero) => ("R001", None),
            Runtime(RuntimeError::RemainderByZero) => ("R002", None),
            Runtime(RuntimeError::InputExhausted) => (
                "R003",
                Some("supply more whitespace-separated integers on standard input"),
            ),
            Runtime(RuntimeError::InvalidInput { .. }) => {
                ("R004", Some("input must be whitespace-separated integers"))
            }
            ResourceExceeded(_) => ("L001", None),
            Internal(_) => ("I001", None),
            Io(_) => ("IO01", None),
        };

        Diagnostic {
            severity: Severity::Error,
            message: self.kind.to_string(),
            span: self.span.clone(),
            help: help.map(str::to_string),
            code: Some(code.to_string()),
        }
    }
}

impl From<InputError> for ExecutionErrorKind {
    fn from(err: InputError) -> Self {
        match err {
            InputError::Exhausted => RuntimeError::InputExhausted.into(),
            InputError::Invalid { token } => RuntimeError::InvalidInput { token }.into(),
            InputError::Io(e) => ExecutionErrorKind::Io(e),
        }
    }
}

impl From<StackError> for ExecutionErrorKind {
    fn from(err: StackError) -> Self {
        ResourceExceededError::from(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_exhaustion_is_recoverable() {
        let exhausted = ExecutionError::new(RuntimeError::InputExhausted.into(), None);
        assert!(exhausted.is_recoverable());

        let div = ExecutionError::new(RuntimeError::DivisionByZero.into(), None);
        assert!(!div.is_recoverable());

        let internal = ExecutionError::new(
            InternalError::NotAVariable { op: "=" }.into(),
            Some(Span::new(0, 1)),
        );
        assert!(!internal.is_recoverable());
    }

    #[test]
    fn test_diagnostic_carries_span_and_code() {
        let err = ExecutionError::new(RuntimeError::DivisionByZero.into(), Some(Span::new(3, 8)));
        let diagnostic = err.to_diagnostic();
        assert_eq!(diagnostic.message, "division by zero");
        assert_eq!(diagnostic.span, Some(Span::new(3, 8)));
        assert_eq!(diagnostic.code.as_deref(), Some("R001"));
    }

    #[test]
    fn test_input_error_conversion() {
        let kind = ExecutionErrorKind::from(InputError::Invalid {
            token: "abc".to_string(),
        });
        assert!(matches!(
            kind,
            ExecutionErrorKind::Runtime(RuntimeError::InvalidInput { ref token }) if token == "abc"
        ));
    }
}
