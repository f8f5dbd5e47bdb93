use bumpalo::Bump;
use pretty_assertions::assert_eq;

use super::parser::parse;

// Helper function to parse a single expression statement and render its tree.
//
// We test precedence by comparing whether two expressions parenthesized in
// different ways yield the same tree. Nodes compare by identity, so the
// comparison goes through their structural `Debug` rendering.
fn ast(source: &str) -> String {
    let arena = Bump::new();
    let source = arena.alloc_str(&format!("{};", source));
    let parsed = parse(&arena, source)
        .unwrap_or_else(|e| panic!("Expression parsing failed: {}\n{}", source, e));
    format!("{:?}", parsed.root)
}

#[test]
fn test_addition_vs_subtraction() {
    assert_eq!(ast("a + b - c"), ast("(a + b) - c"));
    assert_eq!(ast("a - b + c"), ast("(a - b) + c"));
    assert_eq!(
        ast("a + b - c + d - e + f"),
        ast("((((a + b) - c) + d) - e) + f")
    );
}

#[test]
fn test_multiplicative_operators() {
    assert_eq!(ast("a * b / c"), ast("(a * b) / c"));
    assert_eq!(ast("a / b * c"), ast("(a / b) * c"));
    assert_eq!(ast("a % b * c"), ast("(a % b) * c"));
}

#[test]
fn test_addition_vs_multiplication() {
    assert_eq!(ast("a + b * c"), ast("a + (b * c)"));
    assert_eq!(ast("a * b + c"), ast("(a * b) + c"));
    assert_eq!(ast("a - b % c"), ast("a - (b % c)"));
}

#[test]
fn test_comparison_vs_arithmetic() {
    assert_eq!(ast("a + 1 < b * 2"), ast("(a + 1) < (b * 2)"));
    assert_eq!(ast("a == b + c"), ast("a == (b + c)"));
    assert_eq!(ast("a < b == c"), ast("(a < b) == c"));
}

#[test]
fn test_and_or_share_a_level() {
    assert_eq!(ast("a && b || c"), ast("(a && b) || c"));
    assert_eq!(ast("a || b && c"), ast("(a || b) && c"));
}

#[test]
fn test_logical_vs_comparison() {
    assert_eq!(ast("a < b && c > d"), ast("(a < b) && (c > d)"));
    assert_eq!(ast("a != b || c >= d"), ast("(a != b) || (c >= d)"));
}

#[test]
fn test_unary_vs_binary() {
    assert_eq!(ast("-a + b"), ast("(-a) + b"));
    assert_eq!(ast("!a && b"), ast("(!a) && b"));
    assert_eq!(ast("-a * b"), ast("(-a) * b"));
}

#[test]
fn test_postfix_binds_tightest() {
    assert_eq!(ast("-i++"), ast("-(i++)"));
    assert_eq!(ast("i++ * 2"), ast("(i++) * 2"));
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(ast("a = b = c + 1"), ast("a = (b = (c + 1))"));
}

#[test]
fn test_print_takes_whole_expression() {
    assert_eq!(ast("print a + b"), ast("print (a + b)"));
}
