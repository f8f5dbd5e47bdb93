pub mod error;
pub mod parser;
mod syntax;

// Re-export the parser and rule enum for external use
pub use parser::ProgramParser;
pub use parser::Rule;
pub use parser::{ParsedProgram, parse};

pub use error::{ParseError, ParseErrorKind};
pub use syntax::{AnnotatedSource, Span};



#[cfg(test)]
mod precedence_test;
