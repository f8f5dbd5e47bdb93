//! Graphviz export of the syntax tree.
//!
//! Every node becomes a record node labelled with [`Node::label`], and every
//! parent/child link becomes an edge labelled with the child's role.
//!
//! ```
//! use bumpalo::Bump;
//! use paracl::{Program, graph};
//!
//! let arena = Bump::new();
//! let program = Program::compile(&arena, "x = 1;").unwrap();
//! let dot = graph::dump_dot(program.root());
//! assert!(dot.starts_with("digraph G {"));
//! ```

use std::fmt::Write;

use paracl_core::ast::Node;

/// Render the tree rooted at `root` as a `digraph`.
pub fn dump_dot<'a>(root: &'a Node<'a>) -> String {
    let mut out = String::from("digraph G {\n");
    // Pre-order walk without recursion.
    let mut pending = vec![root];

    while let Some(node) = pending.pop() {
        let id = node.id();
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{} [shape = record, label=\"{}\"]",
            id,
            escape_label(&node.label())
        );

        let children = node.children();
        for (role, child) in &children {
            let _ = writeln!(
                out,
                "{} -> {} [label=\"{}\"]",
                id,
                child.id(),
                escape_label(&role.to_string())
            );
        }
        pending.extend(children.iter().rev().map(|(_, child)| *child));
    }

    out.push_str("}\n");
    out
}

/// Escape text for use inside a quoted record label.
fn escape_label(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' | '>' | '{' | '}' | '|' | '"' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}
