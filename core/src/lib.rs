//! Core of the ParaCL interpreter: syntax tree, parser, scope resolver,
//! runtime stack and tree-walking evaluator.

pub mod api;
pub mod ast;
pub mod evaluator;
pub mod parser;
pub mod resolver;
pub mod stack;
pub mod value;
