//! Public error types for the ParaCL API.
//!
//! Parser and evaluator errors are converted to these types at the API
//! boundary. Errors that point into the program keep a copy of its source
//! so they can be rendered on their own.

use std::fmt;

use crate::evaluator::{ExecutionError, ExecutionErrorKind};
use crate::parser::{ParseError, Span};

/// Public error type for all ParaCL operations.
#[derive(Debug)]
pub enum Error {
    /// The program failed to parse.
    Compilation {
        diagnostics: Vec<Diagnostic>,
        source: String,
    },

    /// The program did something invalid while running (division by zero,
    /// bad or missing input).
    Runtime {
        diagnostic: Diagnostic,
        source: String,
        /// Set when the program only ran out of input.
        recoverable: bool,
    },

    /// A resource limit was exceeded (depth, iterations, stack slots).
    ResourceExceeded(String),

    /// The tree handed to the evaluator was malformed.
    Internal(String),

    /// Reading input or writing output failed.
    Io(std::io::Error),
}

impl Error {
    pub fn from_parse(err: ParseError, source: &str) -> Self {
        Error::Compilation {
            diagnostics: vec![err.to_diagnostic()],
            source: source.to_string(),
        }
    }

    pub fn from_execution(err: ExecutionError, source: &str) -> Self {
        let message = err.kind.to_string();
        let recoverable = err.is_recoverable();
        match err.kind {
            ExecutionErrorKind::Runtime(_) => Error::Runtime {
                diagnostic: err.to_diagnostic(),
                source: source.to_string(),
                recoverable,
            },
            ExecutionErrorKind::ResourceExceeded(_) => Error::ResourceExceeded(message),
            ExecutionErrorKind::Internal(_) => Error::Internal(message),
            ExecutionErrorKind::Io(e) => Error::Io(e),
        }
    }

    /// Whether the run stopped only because input ran out. Every other
    /// error is a fault in the program or its environment.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Runtime {
                recoverable: true,
                ..
            }
        )
    }

    /// The program text the diagnostics refer to, if any.
    pub fn source_text(&self) -> Option<&str> {
        match self {
            Error::Compilation { source, .. } | Error::Runtime { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Error::Compilation { diagnostics, .. } => diagnostics,
            Error::Runtime { diagnostic, .. } => core::slice::from_ref(diagnostic),
            _ => &[],
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Compilation { diagnostics, .. } => {
                let error_count = diagnostics
                    .iter()
                    .filter(|d| d.severity == Severity::Error)
                    .count();
                write!(f, "Compilation failed with {} error(s)", error_count)
            }
            Error::Runtime { diagnostic, .. } => write!(f, "Runtime error: {}", diagnostic.message),
            Error::ResourceExceeded(msg) => write!(f, "Resource limit exceeded: {}", msg),
            Error::Internal(msg) => write!(f, "Internal error: {}", msg),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// A diagnostic message (error, warning, or info) with source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level (error, warning, info).
    pub severity: Severity,

    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the primary issue, when known.
    pub span: Option<Span>,

    /// Optional help text suggesting how to fix the issue.
    pub help: Option<String>,

    /// Optional error code (e.g., "P001").
    pub code: Option<String>,
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}
