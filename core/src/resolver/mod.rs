//! Variable slot resolution.
//!
//! ParaCL has a single flat namespace: the first occurrence of a name is its
//! declaration, and every later occurrence, in any block, refers to the same
//! storage. The resolver walks the finished tree once, in source order, and
//! annotates it before anything is evaluated:
//!
//! - every variable reference gets its slot,
//! - every block gets its diagnostics numbering ([`BlockInfo`]),
//! - every node gets its parent back-reference.
//!
//! [`BlockInfo`]: crate::ast::BlockInfo

mod resolver;

#[cfg(test)]
mod resolver_test;

pub use resolver::{Resolution, resolve};
