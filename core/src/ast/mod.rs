//! The ParaCL syntax tree.
//!
//! Nodes are allocated in a `bumpalo::Bump` arena through [`AstBuilder`] and
//! live until the arena is dropped; there is no per-node deallocation. The
//! tree shape never changes after construction. The only interior
//! mutability is the resolver's bookkeeping: variable slots, block numbering
//! and parent links, all stored in `Cell`s.

mod builder;
mod node;
mod ops;


pub use builder::AstBuilder;
pub use node::{Block, BlockInfo, ChildRole, Children, Node, NodeKind, Variable};
pub use ops::{BinaryOp, UnaryOp};
