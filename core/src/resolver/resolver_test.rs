use super::*;
use crate::ast::{AstBuilder, BinaryOp, BlockInfo, Node, NodeKind};
use crate::stack::{Slot, Stack};
use bumpalo::Bump;
use pretty_assertions::assert_eq;

fn slot_of<'a>(node: &'a Node<'a>) -> Option<Slot> {
    node.as_variable().and_then(|var| var.slot())
}

#[test]
fn test_distinct_names_get_distinct_slots() {
    crate::test_utils::init_test_logging();
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    // a = 1; b = a + c; print b;
    let program = b.block(&[
        b.statement(b.assign(b.variable("a"), b.literal(1))),
        b.statement(b.assign(
            b.variable("b"),
            b.binary(BinaryOp::Add, b.variable("a"), b.variable("c")),
        )),
        b.statement(b.print(b.variable("b"))),
    ]);

    let resolution = resolve(program);

    assert_eq!(resolution.slot_count(), 3);
    assert_eq!(resolution.names(), &["a", "b", "c"]);
    assert_eq!(resolution.slot_of("a"), Some(Slot::new(0)));
    assert_eq!(resolution.slot_of("c"), Some(Slot::new(2)));
    assert_eq!(resolution.slot_of("missing"), None);
    assert_eq!(resolution.name_of(Slot::new(1)), Some("b"));
    assert_eq!(Stack::for_resolution(&resolution).len(), 3);
}

#[test]
fn test_same_name_shares_slot_across_blocks() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let outer = b.variable("x");
    let inner = b.variable("x");
    let other = b.variable("y");
    // x = 1; { y = x; } { x = 2; }
    let program = b.block(&[
        b.statement(b.assign(outer, b.literal(1))),
        b.block(&[b.statement(b.assign(other, b.literal(0)))]),
        b.block(&[b.statement(b.assign(inner, b.literal(2)))]),
    ]);

    let resolution = resolve(program);

    assert_eq!(resolution.slot_count(), 2);
    assert_eq!(slot_of(outer), Some(Slot::new(0)));
    assert_eq!(slot_of(inner), Some(Slot::new(0)));
    assert_eq!(slot_of(other), Some(Slot::new(1)));
}

#[test]
fn test_first_seen_in_nested_block_wins() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let late = b.variable("late");
    // { late = 1; } early = late;
    let program = b.block(&[
        b.block(&[b.statement(b.assign(late, b.literal(1)))]),
        b.statement(b.assign(b.variable("early"), b.variable("late"))),
    ]);

    let resolution = resolve(program);

    assert_eq!(resolution.names(), &["late", "early"]);
    assert_eq!(slot_of(late), Some(Slot::new(0)));
}

#[test]
fn test_program_without_variables() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let program = b.block(&[b.statement(b.print(b.literal(5)))]);

    let resolution = resolve(program);

    assert_eq!(resolution.slot_count(), 0);
    assert!(Stack::for_resolution(&resolution).is_empty());
}

#[test]
fn test_resolving_twice_is_identical() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let x = b.variable("x");
    let y = b.variable("y");
    let program = b.block(&[
        b.statement(b.assign(y, b.input())),
        b.statement(b.assign(x, b.variable("y"))),
    ]);

    let first = resolve(program);
    let first_slots = (slot_of(x), slot_of(y));
    let second = resolve(program);

    assert_eq!(first, second);
    assert_eq!((slot_of(x), slot_of(y)), first_slots);
}

#[test]
fn test_every_variable_resolved() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let vars: Vec<_> = ["i", "n", "i", "acc", "n"]
        .iter()
        .map(|name| b.variable(name))
        .collect();
    let body = b.block(&vars.iter().map(|v| b.statement(v)).collect::<Vec<_>>());
    let program = b.block(&[b.while_loop(b.condition(b.literal(0)), body)]);

    let resolution = resolve(program);

    assert_eq!(resolution.slot_count(), 3);
    for var in &vars {
        assert!(slot_of(var).is_some());
    }
    assert_eq!(slot_of(vars[0]), slot_of(vars[2]));
    assert_eq!(slot_of(vars[1]), slot_of(vars[4]));
}

#[test]
fn test_block_numbering() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let first = b.block(&[]);
    let nested = b.block(&[]);
    let second = b.block(&[nested]);
    let program = b.block(&[first, second]);

    let resolution = resolve(program);

    let info = |node: &Node<'_>| node.as_block().and_then(|blk| blk.info());
    assert_eq!(resolution.block_count(), 4);
    assert_eq!(info(program), Some(BlockInfo { id: 1, order: 3 }));
    assert_eq!(info(first), Some(BlockInfo { id: 2, order: 0 }));
    assert_eq!(info(second), Some(BlockInfo { id: 3, order: 2 }));
    assert_eq!(info(nested), Some(BlockInfo { id: 4, order: 1 }));
}

#[test]
fn test_parent_links() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let x = b.variable("x");
    let assign = b.assign(x, b.literal(3));
    let stmt = b.statement(assign);
    let program = b.block(&[stmt]);

    resolve(program);

    assert!(program.parent().is_none());
    assert!(stmt.parent().is_some_and(|p| core::ptr::eq(p, program)));
    assert!(assign.parent().is_some_and(|p| core::ptr::eq(p, stmt)));
    assert!(x.parent().is_some_and(|p| core::ptr::eq(p, assign)));
    assert!(matches!(
        x.parent().map(|p| p.kind()),
        Some(NodeKind::Assign { .. })
    ));
}

#[test]
fn test_resolved_label_shows_slot() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let y = b.variable("y");
    let program = b.block(&[b.statement(b.variable("x")), b.statement(y)]);

    resolve(program);

    assert_eq!(y.label(), "y\nslot: 1");
    assert_eq!(program.label(), "Block\nid = 1, order = 0\nstatements: 2");
}

#[test]
fn test_long_expression_chain() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let x = b.variable("x");
    let mut expr = x;
    for i in 0..50_000 {
        expr = b.binary(BinaryOp::Add, expr, b.literal(i));
    }
    let program = b.block(&[b.statement(b.print(expr))]);

    let resolution = resolve(program);

    assert_eq!(resolution.slot_count(), 1);
    assert_eq!(slot_of(x), Some(Slot::new(0)));
    assert!(matches!(
        x.parent().map(|p| p.kind()),
        Some(NodeKind::Binary { .. })
    ));
}
