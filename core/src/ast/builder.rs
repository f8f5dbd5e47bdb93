use bumpalo::Bump;

use crate::ast::{BinaryOp, Block, Node, NodeKind, UnaryOp, Variable};

/// Allocates syntax tree nodes in an arena.
///
/// The builder performs no structural validation: a malformed tree (for
/// example an assignment whose target is a literal) is accepted here and
/// rejected by the evaluator.
#[derive(Clone, Copy)]
pub struct AstBuilder<'a> {
    arena: &'a Bump,
}

impl<'a> AstBuilder<'a> {
    pub fn new(arena: &'a Bump) -> Self {
        Self { arena }
    }

    pub fn arena(&self) -> &'a Bump {
        self.arena
    }

    fn alloc(&self, kind: NodeKind<'a>) -> &'a Node<'a> {
        self.arena.alloc(Node::new(kind))
    }

    pub fn literal(&self, value: i64) -> &'a Node<'a> {
        self.alloc(NodeKind::Literal(value))
    }

    pub fn input(&self) -> &'a Node<'a> {
        self.alloc(NodeKind::Input)
    }

    pub fn variable(&self, name: &str) -> &'a Node<'a> {
        let name = self.arena.alloc_str(name);
        self.alloc(NodeKind::Variable(Variable::new(name)))
    }

    pub fn binary(&self, op: BinaryOp, left: &'a Node<'a>, right: &'a Node<'a>) -> &'a Node<'a> {
        self.alloc(NodeKind::Binary { op, left, right })
    }

    pub fn unary(&self, op: UnaryOp, operand: &'a Node<'a>) -> &'a Node<'a> {
        self.alloc(NodeKind::Unary { op, operand })
    }

    pub fn assign(&self, target: &'a Node<'a>, value: &'a Node<'a>) -> &'a Node<'a> {
        self.alloc(NodeKind::Assign { target, value })
    }

    pub fn sequence(&self, current: &'a Node<'a>, rest: Option<&'a Node<'a>>) -> &'a Node<'a> {
        self.alloc(NodeKind::Sequence { current, rest })
    }

    /// An expression statement, i.e. `expr ;`.
    pub fn statement(&self, expr: &'a Node<'a>) -> &'a Node<'a> {
        self.sequence(expr, None)
    }

    pub fn block(&self, statements: &[&'a Node<'a>]) -> &'a Node<'a> {
        let statements = self.arena.alloc_slice_copy(statements);
        self.alloc(NodeKind::Block(Block::new(statements)))
    }

    /// Returns `node` unchanged if it already is a block, otherwise a block
    /// holding just `node`.
    pub fn wrap_block(&self, node: &'a Node<'a>) -> &'a Node<'a> {
        match node.kind() {
            NodeKind::Block(_) => node,
            _ => self.block(&[node]),
        }
    }

    pub fn condition(&self, expr: &'a Node<'a>) -> &'a Node<'a> {
        self.alloc(NodeKind::Condition(expr))
    }

    pub fn if_else(
        &self,
        condition: &'a Node<'a>,
        then_branch: &'a Node<'a>,
        else_branch: Option<&'a Node<'a>>,
    ) -> &'a Node<'a> {
        self.alloc(NodeKind::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    pub fn while_loop(&self, condition: &'a Node<'a>, body: &'a Node<'a>) -> &'a Node<'a> {
        self.alloc(NodeKind::While { condition, body })
    }

    pub fn print(&self, expr: &'a Node<'a>) -> &'a Node<'a> {
        self.alloc(NodeKind::Print(expr))
    }
}
