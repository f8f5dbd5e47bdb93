use hashbrown::HashMap;
use tracing::{debug, trace};

use crate::ast::{BlockInfo, Node, NodeKind};
use crate::stack::Slot;

/// Outcome of a resolver pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<'a> {
    /// Slot index to variable name.
    names: Vec<&'a str>,
    slots: HashMap<&'a str, Slot>,
    block_count: usize,
}

impl<'a> Resolution<'a> {
    /// Number of slots the runtime stack needs. Zero for a program without
    /// variables.
    pub fn slot_count(&self) -> usize {
        self.names.len()
    }

    /// Variable names ordered by slot.
    pub fn names(&self) -> &[&'a str] {
        &self.names
    }

    pub fn slot_of(&self, name: &str) -> Option<Slot> {
        self.slots.get(name).copied()
    }

    pub fn name_of(&self, slot: Slot) -> Option<&'a str> {
        self.names.get(slot.index()).copied()
    }

    pub fn block_count(&self) -> usize {
        self.block_count
    }
}

/// Annotate the tree rooted at `root` and return the slot layout.
///
/// Running the pass again on the same tree rewrites identical annotations.
pub fn resolve<'a>(root: &'a Node<'a>) -> Resolution<'a> {
    let mut resolver = Resolver {
        slots: HashMap::new(),
        names: Vec::new(),
        next_block_id: 1,
        finished_blocks: 0,
    };
    resolver.visit(root, None);

    debug!(
        slots = resolver.names.len(),
        blocks = resolver.finished_blocks,
        "resolved program"
    );

    Resolution {
        names: resolver.names,
        slots: resolver.slots,
        block_count: resolver.finished_blocks,
    }
}

struct Resolver<'a> {
    slots: HashMap<&'a str, Slot>,
    names: Vec<&'a str>,
    next_block_id: usize,
    finished_blocks: usize,
}

enum Step<'a> {
    Enter(&'a Node<'a>, Option<&'a Node<'a>>),
    /// All statements of the block have been visited.
    Leave(&'a Node<'a>, usize),
}

impl<'a> Resolver<'a> {
    /// Pre-order walk in source order. Uses an explicit worklist so that
    /// deeply nested expressions cannot exhaust the native stack.
    fn visit(&mut self, root: &'a Node<'a>, parent: Option<&'a Node<'a>>) {
        let mut work = vec![Step::Enter(root, parent)];

        while let Some(step) = work.pop() {
            match step {
                Step::Enter(node, parent) => {
                    node.set_parent(parent);

                    match node.kind() {
                        NodeKind::Variable(var) => {
                            let slot = self.slot_for(var.name());
                            var.set_slot(slot);
                        }
                        NodeKind::Block(_) => {
                            let id = self.next_block_id;
                            self.next_block_id += 1;
                            work.push(Step::Leave(node, id));
                        }
                        _ => {}
                    }

                    for (_, child) in node.children().into_iter().rev() {
                        work.push(Step::Enter(child, Some(node)));
                    }
                }
                Step::Leave(node, id) => {
                    if let NodeKind::Block(block) = node.kind() {
                        let order = self.finished_blocks;
                        self.finished_blocks += 1;
                        block.set_info(BlockInfo { id, order });
                        trace!(id, order, statements = block.statements().len(), "numbered block");
                    }
                }
            }
        }
    }

    fn slot_for(&mut self, name: &'a str) -> Slot {
        if let Some(slot) = self.slots.get(name) {
            return *slot;
        }
        let slot = Slot::new(self.names.len());
        self.names.push(name);
        self.slots.insert(name, slot);
        debug!(name, %slot, "assigned slot");
        slot
    }
}
