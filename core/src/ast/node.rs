use core::cell::Cell;
use core::fmt;

use smallvec::SmallVec;

use crate::ast::{BinaryOp, UnaryOp};
use crate::stack::Slot;

/// A syntax tree node allocated in a `Bump` arena.
///
/// Children are arena references owned by the tree as a whole; the parent
/// link is a non-owning back-reference stamped by the scope resolver and used
/// only for diagnostics. Nodes are compared by address, never by value.
pub struct Node<'a> {
    kind: NodeKind<'a>,
    parent: Cell<Option<&'a Node<'a>>>,
}

#[derive(Debug)]
pub enum NodeKind<'a> {
    Literal(i64),
    /// `?`: reads one integer from the program input.
    Input,
    Variable(Variable<'a>),
    Binary {
        op: BinaryOp,
        left: &'a Node<'a>,
        right: &'a Node<'a>,
    },
    Unary {
        op: UnaryOp,
        operand: &'a Node<'a>,
    },
    Assign {
        target: &'a Node<'a>,
        value: &'a Node<'a>,
    },
    /// `current ; rest`. The parser emits `rest: None` for every expression
    /// statement.
    Sequence {
        current: &'a Node<'a>,
        rest: Option<&'a Node<'a>>,
    },
    Block(Block<'a>),
    Condition(&'a Node<'a>),
    If {
        condition: &'a Node<'a>,
        then_branch: &'a Node<'a>,
        else_branch: Option<&'a Node<'a>>,
    },
    While {
        condition: &'a Node<'a>,
        body: &'a Node<'a>,
    },
    Print(&'a Node<'a>),
}

/// A variable reference. Every reference to the same name shares one slot
/// once the resolver has run.
pub struct Variable<'a> {
    name: &'a str,
    slot: Cell<Option<Slot>>,
}

impl<'a> Variable<'a> {
    pub(crate) fn new(name: &'a str) -> Self {
        Self {
            name,
            slot: Cell::new(None),
        }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The resolved slot, or `None` before resolution.
    pub fn slot(&self) -> Option<Slot> {
        self.slot.get()
    }

    pub(crate) fn set_slot(&self, slot: Slot) {
        self.slot.set(Some(slot));
    }
}

impl fmt::Debug for Variable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot() {
            Some(slot) => write!(f, "{}@{}", self.name, slot),
            None => write!(f, "{}@?", self.name),
        }
    }
}

/// Diagnostics-only numbering stamped on blocks by the resolver.
///
/// `id` counts blocks in pre-order starting at 1 (the program block is 1).
/// `order` is the 0-based position at which the block finished during the
/// walk, so the program block always has the highest `order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockInfo {
    pub id: usize,
    pub order: usize,
}

/// An ordered group of statements. Blocks group control flow only; they do
/// not introduce a storage scope.
pub struct Block<'a> {
    statements: &'a [&'a Node<'a>],
    info: Cell<Option<BlockInfo>>,
}

impl<'a> Block<'a> {
    pub(crate) fn new(statements: &'a [&'a Node<'a>]) -> Self {
        Self {
            statements,
            info: Cell::new(None),
        }
    }

    pub fn statements(&self) -> &'a [&'a Node<'a>] {
        self.statements
    }

    pub fn info(&self) -> Option<BlockInfo> {
        self.info.get()
    }

    pub(crate) fn set_info(&self, info: BlockInfo) {
        self.info.set(Some(info));
    }
}

impl fmt::Debug for Block<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.statements.iter()).finish()
    }
}

/// How a child hangs off its parent. Used to label edges in tree dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildRole {
    Left,
    Right,
    Operand,
    Target,
    Value,
    Current,
    Rest,
    /// 1-based position inside a block.
    Statement(usize),
    Condition,
    Then,
    Else,
    Body,
    Printed,
}

impl fmt::Display for ChildRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildRole::Left => f.write_str("left"),
            ChildRole::Right => f.write_str("right"),
            ChildRole::Operand => f.write_str("operand"),
            ChildRole::Target => f.write_str("assignable"),
            ChildRole::Value => f.write_str("to assign"),
            ChildRole::Current => f.write_str("expression"),
            ChildRole::Rest => f.write_str("continuing"),
            ChildRole::Statement(n) => write!(f, "statement {}", n),
            ChildRole::Condition => f.write_str("condition"),
            ChildRole::Then => f.write_str("true"),
            ChildRole::Else => f.write_str("false"),
            ChildRole::Body => f.write_str("body"),
            ChildRole::Printed => f.write_str("printed"),
        }
    }
}

pub type Children<'a> = SmallVec<[(ChildRole, &'a Node<'a>); 3]>;

impl<'a> Node<'a> {
    pub(crate) fn new(kind: NodeKind<'a>) -> Self {
        Self {
            kind,
            parent: Cell::new(None),
        }
    }

    pub fn kind(&self) -> &NodeKind<'a> {
        &self.kind
    }

    pub fn parent(&self) -> Option<&'a Node<'a>> {
        self.parent.get()
    }

    pub(crate) fn set_parent(&self, parent: Option<&'a Node<'a>>) {
        self.parent.set(parent);
    }

    pub fn as_ptr(&self) -> *const Self {
        self as *const _
    }

    /// Address-derived identity, stable for the lifetime of the arena.
    pub fn id(&self) -> String {
        format!("node{:p}", self.as_ptr())
    }

    pub fn is_leaf(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Literal(_) | NodeKind::Input | NodeKind::Variable(_)
        )
    }

    pub fn as_variable(&self) -> Option<&Variable<'a>> {
        match &self.kind {
            NodeKind::Variable(var) => Some(var),
            _ => None,
        }
    }

    pub fn as_block(&self) -> Option<&Block<'a>> {
        match &self.kind {
            NodeKind::Block(block) => Some(block),
            _ => None,
        }
    }

    /// Short name of the node kind, as used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            NodeKind::Literal(_) => "literal",
            NodeKind::Input => "input",
            NodeKind::Variable(_) => "variable",
            NodeKind::Binary { .. } => "binary operation",
            NodeKind::Unary { .. } => "unary operation",
            NodeKind::Assign { .. } => "assignment",
            NodeKind::Sequence { .. } => "expression",
            NodeKind::Block(_) => "block",
            NodeKind::Condition(_) => "condition",
            NodeKind::If { .. } => "if",
            NodeKind::While { .. } => "while",
            NodeKind::Print(_) => "print",
        }
    }

    /// Human-readable summary of the node and its key operands.
    ///
    /// May contain newlines; renderers are expected to escape them.
    pub fn label(&self) -> String {
        match &self.kind {
            NodeKind::Literal(value) => value.to_string(),
            NodeKind::Input => "Input".to_string(),
            NodeKind::Variable(var) => match var.slot() {
                Some(slot) => format!("{}\nslot: {}", var.name(), slot),
                None => format!("{}\nslot: unresolved", var.name()),
            },
            NodeKind::Binary { op, .. } => format!("Binary operation ({})", op),
            NodeKind::Unary { op, .. } => format!("Unary operation ({})", op),
            NodeKind::Assign { .. } => "Assignment (a = b)".to_string(),
            NodeKind::Sequence { .. } => "Expression".to_string(),
            NodeKind::Block(block) => {
                let count = block.statements().len();
                match block.info() {
                    Some(info) => format!(
                        "Block\nid = {}, order = {}\nstatements: {}",
                        info.id, info.order, count
                    ),
                    None => format!("Block\nstatements: {}", count),
                }
            }
            NodeKind::Condition(_) => "Condition".to_string(),
            NodeKind::If {
                else_branch: None, ..
            } => "If".to_string(),
            NodeKind::If { .. } => "If / else".to_string(),
            NodeKind::While { .. } => "While".to_string(),
            NodeKind::Print(_) => "Print".to_string(),
        }
    }

    /// Direct children in evaluation order, tagged with their role.
    pub fn children(&self) -> Children<'a> {
        let mut children = Children::new();
        match &self.kind {
            NodeKind::Literal(_) | NodeKind::Input | NodeKind::Variable(_) => {}
            NodeKind::Binary { left, right, .. } => {
                children.push((ChildRole::Left, *left));
                children.push((ChildRole::Right, *right));
            }
            NodeKind::Unary { operand, .. } => children.push((ChildRole::Operand, *operand)),
            NodeKind::Assign { target, value } => {
                children.push((ChildRole::Target, *target));
                children.push((ChildRole::Value, *value));
            }
            NodeKind::Sequence { current, rest } => {
                children.push((ChildRole::Current, *current));
                if let Some(rest) = rest {
                    children.push((ChildRole::Rest, *rest));
                }
            }
            NodeKind::Block(block) => {
                children.extend(
                    block
                        .statements()
                        .iter()
                        .enumerate()
                        .map(|(i, stmt)| (ChildRole::Statement(i + 1), *stmt)),
                );
            }
            NodeKind::Condition(expr) => children.push((ChildRole::Operand, *expr)),
            NodeKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                children.push((ChildRole::Condition, *condition));
                children.push((ChildRole::Then, *then_branch));
                if let Some(else_branch) = else_branch {
                    children.push((ChildRole::Else, *else_branch));
                }
            }
            NodeKind::While { condition, body } => {
                children.push((ChildRole::Condition, *condition));
                children.push((ChildRole::Body, *body));
            }
            NodeKind::Print(expr) => children.push((ChildRole::Printed, *expr)),
        }
        children
    }
}

// Skips the parent link, which points back up the tree.
impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.kind, f)
    }
}
