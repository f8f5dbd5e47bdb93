use bumpalo::Bump;
use paracl::{Program, graph};
use pretty_assertions::assert_eq;

fn dump(source: &str) -> String {
    let arena = Bump::new();
    let program = Program::compile(&arena, source).unwrap();
    graph::dump_dot(program.root())
}

#[test]
fn dump_is_a_digraph() {
    let dot = dump("x = 1;");
    assert!(dot.starts_with("digraph G {\n"));
    assert!(dot.ends_with("}\n"));
}

#[test]
fn dump_has_one_node_per_tree_node() {
    // Block, Sequence, Assign, Variable, Literal
    let dot = dump("x = 1;");
    let nodes = dot.lines().filter(|l| l.contains("[shape = record")).count();
    let edges = dot.lines().filter(|l| l.contains(" -> ")).count();
    assert_eq!(nodes, 5);
    assert_eq!(edges, 4);
}

#[test]
fn dump_shows_resolved_slots_and_block_numbering() {
    let dot = dump("a = 1; { b = a; }");
    assert!(dot.contains(r#"label="a\nslot: 0""#));
    assert!(dot.contains(r#"label="b\nslot: 1""#));
    assert!(dot.contains(r#"label="Block\nid = 1, order = 1\nstatements: 2""#));
    assert!(dot.contains(r#"label="Block\nid = 2, order = 0\nstatements: 1""#));
}

#[test]
fn dump_labels_edges_with_roles() {
    let dot = dump("if (x < 1) print x; else x = 1;");
    for role in ["condition", "true", "false", "printed", "assignable", "to assign"] {
        assert!(
            dot.contains(&format!("[label=\"{}\"]", role)),
            "missing edge role {:?} in:\n{}",
            role,
            dot
        );
    }
    assert!(dot.contains(r#"label="Binary operation (\<)""#));
}
